//! HTTP adapter for policy compliance checks.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AnalysisResponse, AnalyzePolicyRequest, CategoriesResponse, ComparePoliciesRequest,
    ComparisonResponse, PolicySource, RulesResponse,
};
pub use routes::policy_routes;
