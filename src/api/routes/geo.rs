use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{self, DisciplineSet};
use crate::models::{CountryDisciplineTotal, CountryMedals, CountryTotal};

pub async fn totals(State(state): State<AppState>) -> Result<Json<Vec<CountryTotal>>, ApiError> {
    Ok(Json(calculate::total_medals_by_country(&state.store)?))
}

pub async fn medals(State(state): State<AppState>) -> Result<Json<Vec<CountryMedals>>, ApiError> {
    Ok(Json(calculate::medals_by_type_and_country(&state.store)?))
}

#[derive(Debug, Deserialize)]
pub struct TopDisciplinesParams {
    /// Comma-separated override of the configured set
    pub disciplines: Option<String>,
}

pub async fn top_disciplines(
    State(state): State<AppState>,
    Query(params): Query<TopDisciplinesParams>,
) -> Result<Json<Vec<CountryDisciplineTotal>>, ApiError> {
    let totals = match params.disciplines {
        Some(list) => {
            let set = DisciplineSet::new(
                list.split(',')
                    .map(str::trim)
                    .filter(|d| !d.is_empty()),
            );
            if set.is_empty() {
                return Err(ApiError::BadRequest(
                    "Query parameter 'disciplines' names no discipline".to_string(),
                ));
            }
            calculate::top_disciplines_by_country(&state.store, &set)?
        }
        None => calculate::top_disciplines_by_country(&state.store, &state.top_disciplines)?,
    };

    Ok(Json(totals))
}
