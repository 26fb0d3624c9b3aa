//! Movies-per-year-per-genre aggregation.
//!
//! Groups movies by release year and sums each of the 19 genre flags within
//! a year. Movies without a release year belong to no group.

use data_loader::{Dataset, Genre, Movie};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Per-genre movie counts for a single year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GenreCounts([u32; Genre::COUNT]);

impl GenreCounts {
    pub fn get(&self, genre: Genre) -> u32 {
        self.0[genre.index()]
    }

    /// Count one movie towards every genre it is tagged with
    pub fn add_movie(&mut self, movie: &Movie) {
        for &genre in &movie.genres {
            self.0[genre.index()] += 1;
        }
    }

    pub fn merge(&mut self, other: &GenreCounts) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0.iter()) {
            *mine += theirs;
        }
    }

    /// (genre, count) pairs in column order
    pub fn iter(&self) -> impl Iterator<Item = (Genre, u32)> + '_ {
        Genre::ALL.iter().map(|&genre| (genre, self.get(genre)))
    }
}

impl Serialize for GenreCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Genre::COUNT))?;
        for (genre, count) in self.iter() {
            map.serialize_entry(genre.name(), &count)?;
        }
        map.end()
    }
}

/// Year-indexed table of per-genre movie counts.
///
/// A row exists for a year iff at least one movie was released that year.
/// Rows iterate in ascending year order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GenreYearTable {
    rows: BTreeMap<u16, GenreCounts>,
}

impl GenreYearTable {
    /// Aggregate every movie of a loaded dataset
    pub fn from_dataset(dataset: &Dataset) -> Self {
        build_genre_year_table(dataset.movies())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Years present, ascending
    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.rows.keys().copied()
    }

    /// (first year, last year), or `None` for an empty table
    pub fn year_span(&self) -> Option<(u16, u16)> {
        let first = self.rows.keys().next()?;
        let last = self.rows.keys().next_back()?;
        Some((*first, *last))
    }

    pub fn row(&self, year: u16) -> Option<&GenreCounts> {
        self.rows.get(&year)
    }

    /// Count for one cell; zero for a year with no row
    pub fn count(&self, year: u16, genre: Genre) -> u32 {
        self.row(year).map(|counts| counts.get(genre)).unwrap_or(0)
    }

    /// Sum of a genre column over all years
    pub fn column_total(&self, genre: Genre) -> u64 {
        self.rows.values().map(|counts| u64::from(counts.get(genre))).sum()
    }

    /// All rows, ascending by year
    pub fn rows(&self) -> btree_map::Iter<'_, u16, GenreCounts> {
        self.rows.iter()
    }

    /// Rows with `lo <= year <= hi`
    pub(crate) fn range(&self, lo: u16, hi: u16) -> btree_map::Range<'_, u16, GenreCounts> {
        self.rows.range(lo..=hi)
    }
}

impl Serialize for GenreYearTable {
    /// Serialized as `{"1995": {"unknown": 0, "Action": 40, ...}, ...}`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.rows.len()))?;
        for (year, counts) in &self.rows {
            map.serialize_entry(year, counts)?;
        }
        map.end()
    }
}

/// Count movies per release year and genre
///
/// ## Algorithm
/// 1. Skip movies without a release year
/// 2. Fold the remaining movies into per-thread `year -> counts` maps
/// 3. Merge the partial maps
pub fn build_genre_year_table<'a, I>(movies: I) -> GenreYearTable
where
    I: IntoIterator<Item = &'a Movie>,
{
    let movies: Vec<&Movie> = movies.into_iter().collect();

    let rows = movies
        .par_iter()
        .filter_map(|movie| movie.release_year().map(|year| (year, *movie)))
        .fold(BTreeMap::new, |mut acc: BTreeMap<u16, GenreCounts>, (year, movie)| {
            acc.entry(year).or_default().add_movie(movie);
            acc
        })
        .reduce(BTreeMap::new, |mut left, right| {
            for (year, counts) in right {
                left.entry(year).or_default().merge(&counts);
            }
            left
        });

    let table = GenreYearTable { rows };
    tracing::debug!(
        "Aggregated {} movies into {} years",
        movies.len(),
        table.len()
    );
    table
}
