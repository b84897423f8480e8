//! Caller Lookup web front end
//!
//! Serves the lookup page and a JSON variant of the same workflow.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /lookup` | empty form, issuing country preset to US |
//! | `POST /lookup` | run the lookup, re-render the page |
//! | `POST /api/v1/lookup` | JSON lookup |
//! | `GET /health` | liveness |

pub mod config;
pub mod models;
pub mod page;
pub mod routes;

use axum::response::Redirect;
use axum::{routing::get, Router};
use caller_lookup_core::LookupWorkflow;
use page::{LookupPage, PageError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state
pub struct AppState {
    pub workflow: LookupWorkflow,
    pub page: LookupPage,
}

impl AppState {
    /// Fails if the page template does not compile
    pub fn new(workflow: LookupWorkflow) -> Result<Self, PageError> {
        Ok(Self { workflow, page: LookupPage::new()? })
    }
}

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { Redirect::to("/lookup") }))
        .route("/health", get(routes::health::health_check))
        .merge(routes::lookup::router())
        .nest("/api/v1", routes::lookup::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}
