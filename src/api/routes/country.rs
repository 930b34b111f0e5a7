use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{
    ComparisonRow, CountryProfile, DisciplineCount, DisciplineLeader, MedalTypeTrajectoryPoint,
    TrajectoryPoint,
};

use super::required;

// ── Country overview ────────────────────────────────────────────

pub async fn profile(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<CountryProfile>, ApiError> {
    Ok(Json(calculate::country_profile(&state.store, &country)?))
}

pub async fn most_participated(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<DisciplineCount>, ApiError> {
    Ok(Json(calculate::most_participated_discipline(
        &state.store,
        &country,
    )?))
}

/// Disciplines the country leads. An empty list is a valid answer.
pub async fn best_disciplines(
    State(state): State<AppState>,
    Path(country): Path<String>,
) -> Result<Json<Vec<DisciplineLeader>>, ApiError> {
    Ok(Json(calculate::best_medal_disciplines(
        &state.store,
        &country,
    )?))
}

// ── Trajectories ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TrajectoryParams {
    pub discipline: Option<String>,
    /// Fill games without a medal with zero
    #[serde(default)]
    pub dense: bool,
}

pub async fn trajectory(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<TrajectoryParams>,
) -> Result<Json<Vec<TrajectoryPoint>>, ApiError> {
    let discipline = required(params.discipline, "discipline")?;
    let points = calculate::trajectory(&state.store, &country, &discipline)?;

    if params.dense {
        debug!(country, discipline, "reindexing trajectory onto game axis");
        return Ok(Json(calculate::reindex(&points, state.store.games())));
    }
    Ok(Json(points))
}

pub async fn trajectory_by_medal_type(
    State(state): State<AppState>,
    Path(country): Path<String>,
    Query(params): Query<TrajectoryParams>,
) -> Result<Json<Vec<MedalTypeTrajectoryPoint>>, ApiError> {
    let discipline = required(params.discipline, "discipline")?;
    Ok(Json(calculate::trajectory_by_medal_type(
        &state.store,
        &country,
        &discipline,
    )?))
}

// ── Head to head ────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub country1: Option<String>,
    pub country2: Option<String>,
    pub discipline: Option<String>,
}

pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<Vec<ComparisonRow>>, ApiError> {
    let country1 = required(params.country1, "country1")?;
    let country2 = required(params.country2, "country2")?;
    let discipline = required(params.discipline, "discipline")?;

    Ok(Json(calculate::compare(
        &state.store,
        &country1,
        &country2,
        &discipline,
    )?))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_app, get_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_profile() {
        let (status, json) = get_json(test_app(), "/api/countries/USA/profile").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["country_name"], "USA");
        assert_eq!(json["most_participated"]["discipline_title"], "Swimming");
        assert_eq!(json["most_participated"]["participation_count"], 3);
        assert_eq!(json["best_disciplines"][1]["discipline_title"], "Swimming");
        assert_eq!(json["best_disciplines"][1]["medal_count"], 3);
    }

    #[tokio::test]
    async fn test_most_participated_unknown_country() {
        let (status, json) = get_json(test_app(), "/api/countries/Atlantis/most-participated").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NO_DATA");
    }

    #[tokio::test]
    async fn test_best_disciplines() {
        let (status, json) = get_json(test_app(), "/api/countries/USA/best-disciplines").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {"country_name": "USA", "discipline_title": "Athletics", "medal_count": 1},
                {"country_name": "USA", "discipline_title": "Swimming", "medal_count": 3}
            ])
        );

        // CHN leads nothing: empty, not an error
        let (status, json) = get_json(test_app(), "/api/countries/CHN/best-disciplines").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!([]));

        let (status, _) = get_json(empty_app(), "/api/countries/USA/best-disciplines").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_trajectory() {
        let (status, json) = get_json(
            test_app(),
            "/api/countries/USA/trajectory?discipline=Swimming",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {"slug_game": "game1", "total_medals": 2},
                {"slug_game": "game2", "total_medals": 1}
            ])
        );
    }

    #[tokio::test]
    async fn test_trajectory_dense() {
        let (status, json) = get_json(
            test_app(),
            "/api/countries/CHN/trajectory?discipline=Swimming&dense=true",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {"slug_game": "game1", "total_medals": 1},
                {"slug_game": "game2", "total_medals": 0}
            ])
        );
    }

    #[tokio::test]
    async fn test_trajectory_requires_discipline() {
        let (status, json) = get_json(test_app(), "/api/countries/USA/trajectory").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_trajectory_by_medal_type() {
        let (status, json) = get_json(
            test_app(),
            "/api/countries/USA/trajectory/medals?discipline=Swimming",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json[0],
            json!({"slug_game": "game1", "GOLD": 1, "SILVER": 1, "BRONZE": 0, "total_medals": 2})
        );
        assert_eq!(json[1]["GOLD"], 1);
    }

    #[tokio::test]
    async fn test_compare() {
        let (status, json) = get_json(
            test_app(),
            "/api/compare?country1=USA&country2=CHN&discipline=Swimming",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            json,
            json!([
                {"slug_game": "game1", "total_medals_country1": 2, "total_medals_country2": 1}
            ])
        );
    }

    #[tokio::test]
    async fn test_compare_no_data() {
        let (status, json) = get_json(
            test_app(),
            "/api/compare?country1=USA&country2=CHN&discipline=Athletics",
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"]["code"], "NO_DATA");
    }
}
