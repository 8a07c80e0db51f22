//! Culture selection for web applications
//!
//! Exposes the supported-culture table, resolves the culture of each request
//! and persists a user's choice in the culture cookie.

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

rust_i18n::i18n!("locales", fallback = "en-US");

use config::LocalizationConfig;
use services::{LanguageService, TracingDiagnostics};

/// Shared application state
pub struct AppState {
    pub language_service: LanguageService,
}

impl AppState {
    pub fn new(localization: &LocalizationConfig) -> Result<Self, anyhow::Error> {
        let language_service = LanguageService::new(
            localization.cookie_name()?,
            localization.default_culture()?,
            Arc::new(TracingDiagnostics),
        );
        Ok(Self { language_service })
    }

    /// State backed by an explicit service
    pub fn with_service(language_service: LanguageService) -> Self {
        Self { language_service }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::culture::list_cultures,
        handlers::culture::get_culture,
        handlers::culture::set_culture,
    ),
    components(schemas(
        models::CultureOption,
        models::CultureSource,
        models::CurrentCultureResponse,
        models::CultureChangeResponse,
        models::SetCultureRequest,
    )),
    tags((name = "Culture", description = "Culture selection"))
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the HTTP router with locale resolution on every route
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/cultures", get(handlers::culture::list_cultures))
        .route(
            "/api/culture",
            get(handlers::culture::get_culture).post(handlers::culture::set_culture),
        )
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::locale_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
