//! HTML pages for the web console.

mod handlers;
mod routes;
mod templates;

pub use routes::page_routes;
