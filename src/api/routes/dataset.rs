use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{ApiError, Pagination, PaginationMeta};
use crate::calculate::AnalyticsError;
use crate::models::MedalRecord;
use crate::store::{Catalog, RecordFilter};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub records: usize,
    pub games: usize,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        records: state.store.len(),
        games: state.store.games().len(),
    })
}

#[derive(Debug, Deserialize)]
pub struct RecordsParams {
    pub country: Option<String>,
    pub discipline: Option<String>,
    pub athlete: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct RecordsResponse {
    pub records: Vec<MedalRecord>,
    pub pagination: PaginationMeta,
}

/// Raw rows filtered by exact country, discipline and athlete.
pub async fn records(
    State(state): State<AppState>,
    Query(params): Query<RecordsParams>,
) -> Json<RecordsResponse> {
    let filter = RecordFilter {
        country: params.country,
        discipline: params.discipline,
        athlete: params.athlete,
    };
    let matching = state.store.filter(&filter);

    let pagination = Pagination::new(params.page, params.page_size);
    let meta = PaginationMeta::new(&pagination, matching.len() as u32);
    let records = pagination
        .apply(&matching)
        .iter()
        .map(|r| (*r).clone())
        .collect();

    Json(RecordsResponse {
        records,
        pagination: meta,
    })
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub kind: Catalog,
    pub items: Vec<String>,
}

pub async fn catalog(
    State(state): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<CatalogResponse>, ApiError> {
    let kind: Catalog = kind.parse().map_err(AnalyticsError::from)?;
    let items = state
        .store
        .catalog(kind)
        .into_iter()
        .map(str::to_string)
        .collect();

    Ok(Json(CatalogResponse { kind, items }))
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{empty_app, get_json, test_app};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_health() {
        let (status, json) = get_json(test_app(), "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json, json!({"status": "ok", "records": 5, "games": 2}));
    }

    #[tokio::test]
    async fn test_records_filtered() {
        let (status, json) = get_json(
            test_app(),
            "/api/records?country=USA&discipline=Swimming",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"].as_array().unwrap().len(), 3);
        assert_eq!(json["records"][0]["medal_type"], "GOLD");
        assert_eq!(json["pagination"]["total_items"], 3);
    }

    #[tokio::test]
    async fn test_records_paginated() {
        let (status, json) = get_json(test_app(), "/api/records?page=2&page_size=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"].as_array().unwrap().len(), 2);
        assert_eq!(json["records"][0]["discipline_title"], "Athletics");
        assert_eq!(json["pagination"]["total_pages"], 3);
        assert_eq!(json["pagination"]["has_next"], true);
    }

    #[tokio::test]
    async fn test_records_page_past_the_end() {
        let (status, json) = get_json(test_app(), "/api/records?page=100000000").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"], json!([]));
        assert_eq!(json["pagination"]["page"], 100000000);
        assert_eq!(json["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn test_records_empty_store() {
        let (status, json) = get_json(empty_app(), "/api/records").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["records"], json!([]));
        assert_eq!(json["pagination"]["total_items"], 0);
    }

    #[tokio::test]
    async fn test_catalog() {
        let (status, json) = get_json(test_app(), "/api/catalog/athletes").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["kind"], "athletes");
        assert_eq!(
            json["items"],
            json!(["Allyson Felix", "Katie Ledecky", "Michael Phelps"])
        );

        let (_, json) = get_json(test_app(), "/api/catalog/games").await;
        assert_eq!(json["items"], json!(["game1", "game2"]));
    }

    #[tokio::test]
    async fn test_catalog_unknown_kind() {
        let (status, _) = get_json(test_app(), "/api/catalog/medals").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
