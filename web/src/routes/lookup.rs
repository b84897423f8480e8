//! Lookup page and JSON endpoint

use crate::models::{ApiResponse, LookupForm};
use crate::page::PageError;
use crate::AppState;
use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use caller_lookup_core::{LookupOutcome, PhoneNumberInfo};
use std::sync::Arc;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/lookup", get(show_form).post(submit_form))
}

pub fn api_router() -> Router<Arc<AppState>> {
    Router::new().route("/lookup", post(lookup_json))
}

/// Render the empty form with the default issuing country
pub async fn show_form(State(state): State<Arc<AppState>>) -> Result<Html<String>, PageError> {
    let info = state.workflow.on_load();
    Ok(Html(state.page.render(&info, &[])?))
}

/// Run the lookup and re-render the page
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LookupForm>,
) -> Result<Html<String>, PageError> {
    let outcome = state.workflow.on_submit(form.into()).await;
    Ok(Html(state.page.render(outcome.info(), outcome.errors())?))
}

/// JSON variant of the form submission
pub async fn lookup_json(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PhoneNumberInfo>,
) -> (StatusCode, Json<ApiResponse<PhoneNumberInfo>>) {
    match state.workflow.on_submit(input).await {
        LookupOutcome::Found(info) => (StatusCode::OK, Json(ApiResponse::success(info))),
        LookupOutcome::Rejected { errors, .. } => {
            (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::rejected(errors)))
        }
    }
}
