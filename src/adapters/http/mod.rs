//! HTTP adapters - JSON API and browser pages.
//!
//! Each agent has its own module of DTOs, handlers and routes. All of them
//! share `AppState` and report failures through `ApiError`.

pub mod agents;
pub mod citizen;
pub mod document;
pub mod emergency;
pub mod error;
pub mod pages;
pub mod policy;
pub mod state;

use axum::{middleware, Router};
use http::HeaderValue;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;

pub use error::{mask_internal_errors, ApiError, ErrorResponse};
pub use state::AppState;

/// Every route, without middleware.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(pages::page_routes())
        .merge(emergency::emergency_routes())
        .merge(policy::policy_routes())
        .merge(citizen::citizen_routes())
        .merge(document::document_routes())
        .merge(agents::agent_routes())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// The served application: routes plus tracing, request ids, CORS,
/// timeout, compression and 500-body masking.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let layers = ServiceBuilder::new()
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(&config.server.cors_origins_list()))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(CompressionLayer::new());

    api_router(state)
        .layer(middleware::map_response_with_state(
            config.features.verbose_errors,
            mask_internal_errors,
        ))
        .layer(layers)
}
