//! HTTP adapter for multi-agent collaboration and status.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CollaborateRequest, CollaborateResponse, HealthResponse, StatusResponse, TaskListResponse,
};
pub use routes::agent_routes;
