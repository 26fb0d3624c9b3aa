//! Aggregation and querying of movie counts per release year and genre.
//!
//! This crate provides:
//! - `build_genre_year_table`, run once after loading
//! - `filter_table`, run on every dashboard interaction
//! - Chart payloads built from query results
//!
//! ## Architecture
//! The aggregate is computed once and then only read:
//! 1. The loaded `Dataset` is folded into a `GenreYearTable`
//! 2. Each interaction slices the table by genres and year range
//! 3. The slice is pivoted into per-genre series for the chart
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{build_genre_year_table, filter_table};
//!
//! let table = build_genre_year_table(dataset.movies());
//! let rows = filter_table(&table, &["Comedy", "Drama"], 1994, 1996)?;
//! assert_eq!(rows.len(), 3);
//! ```

pub mod aggregate;
pub mod query;
pub mod chart;

// Re-export main types
pub use aggregate::{build_genre_year_table, GenreCounts, GenreYearTable};
pub use query::{
    filter_selection, filter_table, resolve_year_range, GenreSelection, QueryError, YearCounts, DEFAULT_GENRES,
};
pub use chart::{ChartFigure, ChartSeries, RangeControl};
