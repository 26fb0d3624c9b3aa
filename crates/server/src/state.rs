use data_loader::Dataset;
use pipeline::GenreYearTable;
use serde::Serialize;
use std::sync::Arc;

/// Headline numbers about the loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetStats {
    pub movies: usize,
    pub ratings: usize,
    pub undated_movies: usize,
    pub mean_rating: f32,
    /// (first year, last year) of the aggregate
    pub year_span: Option<(u16, u16)>,
}

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Built once at startup and never mutated; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub table: Arc<GenreYearTable>,
    pub stats: Arc<DatasetStats>,
}

impl AppState {
    pub fn new(table: GenreYearTable, stats: DatasetStats) -> Self {
        Self {
            table: Arc::new(table),
            stats: Arc::new(stats),
        }
    }

    /// Aggregate a loaded dataset and capture its stats
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let table = GenreYearTable::from_dataset(dataset);
        let (movies, ratings) = dataset.counts();
        let stats = DatasetStats {
            movies,
            ratings,
            undated_movies: dataset.undated_movie_count(),
            mean_rating: dataset.rating_summary().mean_rating,
            year_span: table.year_span(),
        };
        Self::new(table, stats)
    }
}
