//! Locale resolution middleware
//!
//! Resolves the request culture from the culture cookie or the
//! Accept-Language header and stores it in request extensions.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::ACCEPT_LANGUAGE,
    middleware::Next,
    response::Response,
};

use crate::AppState;

/// Middleware to attach a [`RequestCulture`](crate::models::RequestCulture) to the request
pub async fn locale_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Response {
    let accept_language = req
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    let culture = state
        .language_service
        .resolve_request_culture(req.headers(), accept_language);

    tracing::debug!(
        "Resolved culture {} ({:?}) for {} {}",
        culture.culture,
        culture.source,
        req.method(),
        req.uri()
    );

    req.extensions_mut().insert(culture);

    next.run(req).await
}
