//! Response plan repository port.
//!
//! Stores plans produced by the emergency coordinator so they can be
//! listed and viewed after the request that created them.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::emergency::EmergencyResponsePlan;
use crate::domain::foundation::{DomainError, ErrorCode};

#[async_trait]
pub trait PlanRepository: Send + Sync {
    /// Save a plan, replacing any plan with the same id.
    async fn save(&self, plan: &EmergencyResponsePlan) -> Result<(), PlanStoreError>;

    /// Find a plan by its id. Returns `None` if not found.
    async fn find_by_id(&self, plan_id: &str) -> Result<Option<EmergencyResponsePlan>, PlanStoreError>;

    /// All stored plans, newest activation first.
    async fn list(&self) -> Result<Vec<EmergencyResponsePlan>, PlanStoreError>;
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanStoreError {
    #[error("Plan not found: {0}")]
    NotFound(String),

    #[error("Plan store unavailable: {0}")]
    Unavailable(String),
}

impl From<PlanStoreError> for DomainError {
    fn from(err: PlanStoreError) -> Self {
        let code = match err {
            PlanStoreError::NotFound(_) => ErrorCode::PlanNotFound,
            PlanStoreError::Unavailable(_) => ErrorCode::StorageError,
        };
        DomainError::new(code, err.to_string())
    }
}
