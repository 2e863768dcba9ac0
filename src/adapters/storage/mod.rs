//! Storage adapters.
//!
//! - `InMemoryPlanRepository` - Most recent response plans, bounded by capacity

mod in_memory_plan_repository;

pub use in_memory_plan_repository::{InMemoryPlanRepository, DEFAULT_PLAN_CAPACITY};
