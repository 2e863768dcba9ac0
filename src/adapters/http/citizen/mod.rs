//! HTTP adapter for the virtual citizen assistant.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AvailabilityQuery, ChatRequest, ChatResponse, ClassificationResponse, HistoryResponse,
    TextResponse,
};
pub use routes::citizen_routes;
