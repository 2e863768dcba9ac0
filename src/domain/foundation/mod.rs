//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps and error types shared by the
//! emergency, compliance, citizen and eligibility domains.

mod errors;
mod ids;
mod text;
mod timestamp;

pub use errors::{DomainError, ErrorCode};
pub use ids::{QueryId, TaskId};
pub use text::{is_all_uppercase, title_case, truncate_chars};
pub use timestamp::{format_timedelta, Timestamp};
