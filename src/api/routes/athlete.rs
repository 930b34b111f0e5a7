use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate;
use crate::models::{AthleteComparison, AthleteTally};

use super::required;

/// Per-game tally. The name must match exactly; an unknown athlete gets an
/// empty tally, not a 404.
pub async fn tally(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Json<AthleteTally> {
    Json(calculate::athlete_tally(&state.store, &name))
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub athlete1: Option<String>,
    pub athlete2: Option<String>,
}

pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Json<AthleteComparison>, ApiError> {
    let athlete1 = required(params.athlete1, "athlete1")?;
    let athlete2 = required(params.athlete2, "athlete2")?;

    Ok(Json(calculate::compare_athletes(
        &state.store,
        &athlete1,
        &athlete2,
    )))
}
