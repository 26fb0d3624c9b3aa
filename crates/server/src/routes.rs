//! HTTP routes.
//!
//! ```text
//! GET /health        liveness
//! GET /api/summary   dataset stats
//! GET /api/genres    genre vocabulary
//! GET /api/years     year-range control
//! GET /api/table     query rows    (?genres=Comedy,Drama&from=1994&to=1996)
//! GET /api/chart     chart payload (same parameters)
//! ```

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use data_loader::Genre;
use pipeline::{filter_selection, resolve_year_range, ChartFigure, GenreSelection, RangeControl, YearCounts};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::state::{AppState, DatasetStats};

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn summary(State(state): State<AppState>) -> Json<DatasetStats> {
    Json(state.stats.as_ref().clone())
}

async fn genres() -> Json<Vec<&'static str>> {
    Json(Genre::ALL.iter().map(|g| g.name()).collect())
}

async fn years(State(state): State<AppState>) -> ApiResult<Json<RangeControl>> {
    RangeControl::for_table(&state.table)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("no dated movies in the dataset".to_string()))
}

/// Query parameters shared by `/api/table` and `/api/chart`
///
/// Missing parameters fall back to the dashboard's initial state: `Action`
/// over the full year span.
#[derive(Debug, Default, Deserialize)]
pub struct SliceParams {
    /// Comma-separated genre names
    pub genres: Option<String>,
    pub from: Option<i32>,
    pub to: Option<i32>,
}

impl SliceParams {
    fn selection(&self) -> ApiResult<GenreSelection> {
        match &self.genres {
            Some(list) => {
                let names: Vec<&str> = list.split(',').map(str::trim).collect();
                Ok(GenreSelection::parse(&names[..])?)
            }
            None => Ok(GenreSelection::default()),
        }
    }

    fn resolve(&self, state: &AppState) -> ApiResult<(GenreSelection, Vec<YearCounts>)> {
        let selection = self.selection()?;
        let (from, to) = resolve_year_range(&state.table, self.from, self.to);
        let rows = filter_selection(&state.table, &selection, from, to)?;
        Ok((selection, rows))
    }
}

async fn table(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> ApiResult<Json<Vec<YearCounts>>> {
    let (_, rows) = params.resolve(&state)?;
    Ok(Json(rows))
}

async fn chart(
    State(state): State<AppState>,
    Query(params): Query<SliceParams>,
) -> ApiResult<Json<ChartFigure>> {
    let (selection, rows) = params.resolve(&state)?;
    Ok(Json(ChartFigure::from_slice(&rows, &selection)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/summary", get(summary))
        .route("/api/genres", get(genres))
        .route("/api/years", get(years))
        .route("/api/table", get(table))
        .route("/api/chart", get(chart))
}
