use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use cpbl_standings::{StandingsError, StandingsRow};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StandingsResponse {
    pub source: String,
    pub updated_at: DateTime<Utc>,
    pub html: String,
    pub rows: Vec<StandingsRow>,
}

pub(super) async fn get_standings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<StandingsResponse>, ApiError> {
    let standings = state
        .standings
        .scrape()
        .await
        .map_err(|e| map_standings_error(&req_id.0, &e))?;

    tracing::debug!(request_id = %req_id.0, rows = standings.rows.len(), "served standings");

    Ok(Json(StandingsResponse {
        source: state.standings.source_url().to_owned(),
        updated_at: Utc::now(),
        html: standings.rendered_fragment,
        rows: standings.rows,
    }))
}

/// Structural failures are ours (500); anything about reaching the site is
/// the upstream's (502).
fn map_standings_error(request_id: &str, error: &StandingsError) -> ApiError {
    if error.is_parse_failure() {
        tracing::error!(request_id, error = %error, "standings page could not be parsed");
        return ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, error.to_string());
    }
    tracing::warn!(
        request_id,
        error = %error,
        upstream_status = ?error.upstream_status(),
        "standings upstream failed"
    );
    ApiError::new(StatusCode::BAD_GATEWAY, error.to_string())
}
