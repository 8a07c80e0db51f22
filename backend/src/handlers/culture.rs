use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{State, rejection::JsonRejection},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use rust_i18n::t;
use validator::Validate;

use crate::AppState;
use crate::models::{
    CultureChangeResponse, CultureOption, CurrentCultureResponse, RequestCulture,
    SetCultureRequest,
};
use crate::services::CultureChange;
use crate::utils::ApiError;

/// List supported cultures in display order
#[utoipa::path(
    get,
    path = "/api/cultures",
    responses(
        (status = 200, description = "Supported cultures", body = Vec<CultureOption>)
    ),
    tag = "Culture"
)]
pub async fn list_cultures(State(state): State<Arc<AppState>>) -> Json<&'static [CultureOption]> {
    Json(state.language_service.supported_cultures())
}

/// Get the culture active for this request
#[utoipa::path(
    get,
    path = "/api/culture",
    responses(
        (status = 200, description = "Current culture", body = CurrentCultureResponse)
    ),
    tag = "Culture"
)]
pub async fn get_culture(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestCulture>,
) -> Json<CurrentCultureResponse> {
    Json(CurrentCultureResponse {
        culture: state.language_service.current_culture(&ctx),
        source: ctx.source,
    })
}

/// Persist a culture choice in the culture cookie
///
/// Unsupported cultures are not an error: the response reports `applied: false`
/// and carries no cookie.
#[utoipa::path(
    post,
    path = "/api/culture",
    request_body = SetCultureRequest,
    responses(
        (status = 200, description = "Culture applied or rejected", body = CultureChangeResponse),
        (status = 400, description = "Malformed or invalid request body"),
    ),
    tag = "Culture"
)]
pub async fn set_culture(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestCulture>,
    payload: Result<Json<SetCultureRequest>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::debug!("Rejected culture request body: {}", rejection.body_text());
            return ApiError::from(rejection).into_response_for(&ctx.culture);
        },
    };

    if let Err(e) = payload.validate() {
        tracing::debug!("Rejected culture request body: {}", e);
        return ApiError::from(e).into_response_for(&ctx.culture);
    }

    let mut headers = HeaderMap::new();
    let body = match state.language_service.set_culture(&payload.culture, &mut headers) {
        CultureChange::Applied(option) => CultureChangeResponse {
            applied: true,
            culture: option.code.to_string(),
            message: t!("culture.changed", locale = option.code, name = option.name).to_string(),
        },
        CultureChange::Rejected => CultureChangeResponse {
            applied: false,
            message: t!("culture.unsupported", locale = &ctx.culture, culture = &payload.culture)
                .to_string(),
            culture: payload.culture,
        },
    };

    (headers, Json(body)).into_response()
}
