use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use cpbl_highlights::{HighlightsError, HighlightsPage, HighlightsQuery};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

/// Raw pairs rather than a struct so `mustAll` may repeat.
pub(super) async fn list_highlights(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<HighlightsPage>, ApiError> {
    let query = HighlightsQuery::from_pairs(&pairs, state.query_defaults);

    let page = state
        .highlights
        .fetch_page(&query, Utc::now())
        .await
        .map_err(|e| map_highlights_error(&req_id.0, &e))?;

    tracing::debug!(
        request_id = %req_id.0,
        count = page.count,
        has_next = page.next_page_token.is_some(),
        "served highlights page"
    );
    Ok(Json(page))
}

/// Upstream error statuses pass through; other upstream failures are 502 and
/// missing configuration is 500.
fn map_highlights_error(request_id: &str, error: &HighlightsError) -> ApiError {
    let status = match error {
        HighlightsError::ConfigurationMissing(_) | HighlightsError::InvalidBaseUrl { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
        _ => error
            .upstream_status()
            .and_then(|s| StatusCode::from_u16(s).ok())
            .filter(|s| s.is_client_error() || s.is_server_error())
            .unwrap_or(StatusCode::BAD_GATEWAY),
    };

    if status.is_server_error() && status != StatusCode::BAD_GATEWAY {
        tracing::error!(request_id, error = %error, status = status.as_u16(), "highlights request failed");
    } else {
        tracing::warn!(request_id, error = %error, status = status.as_u16(), "highlights upstream failed");
    }
    ApiError::new(status, error.to_string())
}
