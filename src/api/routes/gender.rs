use axum::extract::{Path, State};
use axum::Json;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, AnalyticsError};
use crate::models::{GenderSplit, Orientation, OrientationReport};

pub async fn orientation(
    State(state): State<AppState>,
) -> Result<Json<OrientationReport>, ApiError> {
    Ok(Json(calculate::gender_orientation(&state.store)?))
}

/// One partition, e.g. `/api/gender/orientation/Male-Oriented`.
pub async fn orientation_partition(
    State(state): State<AppState>,
    Path(orientation): Path<String>,
) -> Result<Json<Vec<GenderSplit>>, ApiError> {
    let orientation: Orientation = orientation.parse().map_err(AnalyticsError::from)?;
    let report = calculate::gender_orientation(&state.store)?;

    Ok(Json(report.partition(orientation).to_vec()))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_app, get_json, test_app};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_orientation() {
        let (status, json) = get_json(test_app(), "/api/gender/orientation").await;

        assert_eq!(status, StatusCode::OK);
        // Swimming: 2 men, 2 women; Athletics: 1 woman
        assert_eq!(json["balanced"][0]["discipline_title"], "Swimming");
        assert_eq!(json["balanced"][0]["orientation"], "Balanced");
        assert_eq!(json["female_oriented"][0]["discipline_title"], "Athletics");
        assert_eq!(json["female_oriented"][0]["female_proportion"], 1.0);
        assert!(json["male_oriented"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_orientation_partition() {
        let (status, json) = get_json(test_app(), "/api/gender/orientation/Female-Oriented").await;

        assert_eq!(status, StatusCode::OK);
        let splits = json.as_array().unwrap();
        assert_eq!(splits.len(), 1);
        assert_eq!(splits[0]["orientation"], "Female-Oriented");
    }

    #[tokio::test]
    async fn test_orientation_partition_invalid() {
        let (status, json) = get_json(test_app(), "/api/gender/orientation/Sideways").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_orientation_empty_store() {
        let (status, json) = get_json(empty_app(), "/api/gender/orientation").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NO_DATA");
    }
}
