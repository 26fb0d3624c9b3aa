//! Per-interaction queries over the aggregate table.
//!
//! A query picks a set of genre columns and an inclusive year range. It only
//! reads the precomputed table, so it is cheap, pure, and safe to run from
//! any number of threads at once.

use crate::aggregate::GenreYearTable;
use data_loader::Genre;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use thiserror::Error;

/// Errors a caller can trigger with bad query input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Unknown genre, empty selection, or `year_min > year_max`
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

pub type Result<T> = std::result::Result<T, QueryError>;

/// Genres selected by default when the dashboard first loads
pub const DEFAULT_GENRES: [Genre; 1] = [Genre::Action];

/// A validated, non-empty list of distinct genres in selection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreSelection(Vec<Genre>);

impl GenreSelection {
    /// Build a selection; duplicates are dropped, first occurrence wins
    pub fn new(genres: impl IntoIterator<Item = Genre>) -> Result<Self> {
        let mut selected = Vec::new();
        for genre in genres {
            if !selected.contains(&genre) {
                selected.push(genre);
            }
        }
        if selected.is_empty() {
            return Err(QueryError::InvalidQuery(
                "at least one genre must be selected".to_string(),
            ));
        }
        Ok(Self(selected))
    }

    /// Validate genre names against the fixed vocabulary
    ///
    /// Example: ["Comedy", "Drama"] -> Ok
    ///          ["SciFi"]           -> Err(InvalidQuery)
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let genres = names
            .iter()
            .map(|name| {
                name.as_ref()
                    .parse::<Genre>()
                    .map_err(|e| QueryError::InvalidQuery(e.to_string()))
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(genres)
    }

    pub fn genres(&self) -> &[Genre] {
        &self.0
    }
}

impl Default for GenreSelection {
    fn default() -> Self {
        Self(DEFAULT_GENRES.to_vec())
    }
}

/// One row of a query result: the selected counts for a single year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCounts {
    pub year: u16,
    /// Serialized as a `{genre: count}` object in selection order
    #[serde(serialize_with = "serialize_counts")]
    pub counts: Vec<(Genre, u32)>,
}

impl YearCounts {
    pub fn get(&self, genre: Genre) -> Option<u32> {
        self.counts
            .iter()
            .find(|(g, _)| *g == genre)
            .map(|(_, count)| *count)
    }
}

fn serialize_counts<S: Serializer>(counts: &[(Genre, u32)], serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(counts.len()))?;
    for (genre, count) in counts {
        map.serialize_entry(genre.name(), count)?;
    }
    map.end()
}

/// Slice the aggregate to the given genres and inclusive year range.
///
/// Genre names must come from the 19-name vocabulary. Years are not clamped:
/// a range entirely outside the table simply yields no rows.
pub fn filter_table<S: AsRef<str>>(
    table: &GenreYearTable,
    selected_genres: &[S],
    year_min: i32,
    year_max: i32,
) -> Result<Vec<YearCounts>> {
    let selection = GenreSelection::parse(selected_genres)?;
    filter_selection(table, &selection, year_min, year_max)
}

/// Same as [`filter_table`] for an already validated selection
pub fn filter_selection(
    table: &GenreYearTable,
    selection: &GenreSelection,
    year_min: i32,
    year_max: i32,
) -> Result<Vec<YearCounts>> {
    if year_min > year_max {
        return Err(QueryError::InvalidQuery(format!(
            "year range is inverted: {} > {}",
            year_min, year_max
        )));
    }

    let Some((lo, hi)) = clamp_to_year_type(year_min, year_max) else {
        return Ok(Vec::new());
    };

    let result: Vec<YearCounts> = table
        .range(lo, hi)
        .map(|(&year, counts)| YearCounts {
            year,
            counts: selection
                .genres()
                .iter()
                .map(|&genre| (genre, counts.get(genre)))
                .collect(),
        })
        .collect();

    tracing::debug!(
        "Query {:?} [{}, {}] -> {} rows",
        selection.genres(),
        year_min,
        year_max,
        result.len()
    );
    Ok(result)
}

/// Fill missing bounds of a requested year range from the table's span.
///
/// A missing bound never inverts the range: a lone `from` past the last year
/// becomes `[from, from]`, and a lone `to` before the first year becomes
/// `[to, to]`. Both bounds given are returned as-is.
pub fn resolve_year_range(table: &GenreYearTable, from: Option<i32>, to: Option<i32>) -> (i32, i32) {
    let (first, last) = table
        .year_span()
        .map(|(lo, hi)| (i32::from(lo), i32::from(hi)))
        .unwrap_or((0, 0));
    match (from, to) {
        (Some(from), Some(to)) => (from, to),
        (Some(from), None) => (from, last.max(from)),
        (None, Some(to)) => (first.min(to), to),
        (None, None) => (first, last),
    }
}

/// Map an `i32` range onto `u16` years; `None` if no `u16` lies inside it
fn clamp_to_year_type(year_min: i32, year_max: i32) -> Option<(u16, u16)> {
    let max_year = i32::from(u16::MAX);
    if year_max < 0 || year_min > max_year {
        return None;
    }
    let lo = year_min.clamp(0, max_year) as u16;
    let hi = year_max.clamp(0, max_year) as u16;
    Some((lo, hi))
}
