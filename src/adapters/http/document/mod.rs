//! HTTP adapter for document processing and eligibility.

mod dto;
mod handlers;
mod routes;

pub use dto::{InboxRequest, InboxResponse, ProcessDocumentRequest, ProcessDocumentResponse};
pub use routes::document_routes;
