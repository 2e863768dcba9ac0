//! Domain layer containing the civic agents' business logic.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, text helpers, errors)
//! - `emergency` - Scenarios, assessment, response planning, multi-agent tasks
//! - `compliance` - Policy documents, rules engine, AI review prompts
//! - `citizen` - Query classification, scheduling, service catalog, chat
//! - `eligibility` - Benefit documents, extraction, program eligibility

pub mod citizen;
pub mod compliance;
pub mod eligibility;
pub mod emergency;
pub mod foundation;
