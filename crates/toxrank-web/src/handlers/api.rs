//! JSON endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use toxrank_common::ToxRankError;
use toxrank_ranker::run_identifier;

use crate::state::SharedState;

/// HTTP status reported to API callers for a failed run.
pub fn status_for(err: &ToxRankError) -> StatusCode {
    match err {
        ToxRankError::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
        ToxRankError::NotFound(_) | ToxRankError::NoHazardData(_) => StatusCode::NOT_FOUND,
        ToxRankError::Unauthorized
        | ToxRankError::UnexpectedStatus { .. }
        | ToxRankError::HazardUnavailable { .. }
        | ToxRankError::Http(_) => StatusCode::BAD_GATEWAY,
        ToxRankError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Unstyled ranked table and summary for one identifier.
pub async fn api_report(
    State(state): State<SharedState>,
    Path(identifier): Path<String>,
) -> Response {
    match run_identifier(state.source.as_ref(), identifier.trim()).await {
        Ok(report) => Json(json!({
            "status": "success",
            "compound": report.compound,
            "counts": report.counts,
            "summary": report.summary,
            "columns": report.table.headers(),
            "rows": report.table.rows,
        }))
        .into_response(),
        Err(e) => (
            status_for(&e),
            Json(json!({ "status": "error", "error": e.to_string() })),
        )
            .into_response(),
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_for(&ToxRankError::InvalidIdentifier("x".into())), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(&ToxRankError::NoHazardData("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(status_for(&ToxRankError::Unauthorized), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_for(&ToxRankError::UnexpectedStatus { status: 500 }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&ToxRankError::HazardUnavailable { dtxsid: "x".into(), status: 500 }),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_for(&ToxRankError::NotFound("x".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(&ToxRankError::Config("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
