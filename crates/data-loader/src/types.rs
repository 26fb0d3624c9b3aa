//! Core domain types for the MovieLens 100k dataset.
//!
//! This module defines the records parsed from `u.data` and `u.item`, the
//! fixed genre vocabulary, and the `Dataset` that holds both tables once
//! loading has finished.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a user (1-943 in MovieLens 100k)
pub type UserId = u32;

/// Unique identifier for a movie (1-1682 in MovieLens 100k)
pub type MovieId = u32;

// =============================================================================
// Genre Vocabulary
// =============================================================================

/// Movie genres from MovieLens 100k
///
/// The 19 genre flag columns of `u.item`, in column order. The derived
/// `Ord` follows that order, which is also the order of the aggregate
/// table's columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "unknown")]
    Unknown,
    Action,
    Adventure,
    Animation,
    Children,
    Comedy,
    Crime,
    Documentary,
    Drama,
    Fantasy,
    #[serde(rename = "Film-Noir")]
    FilmNoir,
    Horror,
    Musical,
    Mystery,
    Romance,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Thriller,
    War,
    Western,
}

impl Genre {
    /// Number of genre flag columns
    pub const COUNT: usize = 19;

    /// Every genre, in flag column order
    pub const ALL: [Genre; Genre::COUNT] = [
        Genre::Unknown,
        Genre::Action,
        Genre::Adventure,
        Genre::Animation,
        Genre::Children,
        Genre::Comedy,
        Genre::Crime,
        Genre::Documentary,
        Genre::Drama,
        Genre::Fantasy,
        Genre::FilmNoir,
        Genre::Horror,
        Genre::Musical,
        Genre::Mystery,
        Genre::Romance,
        Genre::SciFi,
        Genre::Thriller,
        Genre::War,
        Genre::Western,
    ];

    /// Column name as it appears in the dataset documentation
    pub fn name(self) -> &'static str {
        match self {
            Genre::Unknown => "unknown",
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Animation => "Animation",
            Genre::Children => "Children",
            Genre::Comedy => "Comedy",
            Genre::Crime => "Crime",
            Genre::Documentary => "Documentary",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::FilmNoir => "Film-Noir",
            Genre::Horror => "Horror",
            Genre::Musical => "Musical",
            Genre::Mystery => "Mystery",
            Genre::Romance => "Romance",
            Genre::SciFi => "Sci-Fi",
            Genre::Thriller => "Thriller",
            Genre::War => "War",
            Genre::Western => "Western",
        }
    }

    /// Position of this genre's flag among the 19 genre columns
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a string is not one of the 19 genre names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre '{0}'")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    /// Exact, case-sensitive match against the vocabulary
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .iter()
            .copied()
            .find(|genre| genre.name() == s)
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

// =============================================================================
// Movie and Rating Records
// =============================================================================

/// One row of `u.item`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    /// `None` when the source field is empty or unparseable
    pub release_date: Option<NaiveDate>,
    /// Always empty in the published data, kept for completeness
    pub video_release_date: Option<String>,
    pub imdb_url: Option<String>,
    /// Genres whose flag is set, in column order
    pub genres: Vec<Genre>,
}

impl Movie {
    /// Calendar year of the release date
    pub fn release_year(&self) -> Option<u16> {
        self.release_date
            .and_then(|date| u16::try_from(date.year()).ok())
    }

    pub fn has_genre(&self, genre: Genre) -> bool {
        self.genres.contains(&genre)
    }
}

/// One row of `u.data`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: UserId,
    pub movie_id: MovieId,
    /// Rating value from 1 to 5
    pub rating: u8,
    /// Unix timestamp when rating was made
    pub timestamp: i64,
}

/// Headline numbers over the ratings table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub rating_count: usize,
    pub user_count: usize,
    pub mean_rating: f32,
}

// =============================================================================
// Dataset
// =============================================================================

/// Both loaded tables.
///
/// Built once by [`Dataset::load`](crate::Dataset::load) and never mutated
/// afterwards. Movies are kept in a `BTreeMap` so iteration is ordered by id.
#[derive(Debug, Default)]
pub struct Dataset {
    pub(crate) movies: BTreeMap<MovieId, Movie>,
    pub(crate) ratings: Vec<Rating>,
    /// Positions into `ratings`, per movie
    pub(crate) movie_ratings: HashMap<MovieId, Vec<usize>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.get(&id)
    }

    /// All movies, ascending by id
    pub fn movies(&self) -> impl Iterator<Item = &Movie> + '_ {
        self.movies.values()
    }

    /// All ratings in source order
    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    /// Ratings received by one movie
    pub fn get_movie_ratings(&self, movie_id: MovieId) -> Vec<&Rating> {
        self.movie_ratings
            .get(&movie_id)
            .map(|positions| positions.iter().map(|&i| &self.ratings[i]).collect())
            .unwrap_or_default()
    }

    /// Insert a movie, replacing any previous movie with the same id.
    ///
    /// Returns the replaced movie, if any.
    pub fn insert_movie(&mut self, movie: Movie) -> Option<Movie> {
        self.movies.insert(movie.id, movie)
    }

    /// Insert a rating and update the per-movie index
    pub fn insert_rating(&mut self, rating: Rating) {
        let position = self.ratings.len();
        self.ratings.push(rating);
        self.movie_ratings
            .entry(rating.movie_id)
            .or_default()
            .push(position);
    }

    /// (movies, ratings)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.ratings.len())
    }

    /// Number of movies that have no usable release date
    pub fn undated_movie_count(&self) -> usize {
        self.movies().filter(|m| m.release_year().is_none()).count()
    }

    pub fn rating_summary(&self) -> RatingSummary {
        let rating_count = self.ratings.len();
        let user_count = self
            .ratings
            .iter()
            .map(|r| r.user_id)
            .collect::<std::collections::HashSet<_>>()
            .len();
        let mean_rating = if rating_count > 0 {
            let total: u64 = self.ratings.iter().map(|r| u64::from(r.rating)).sum();
            total as f32 / rating_count as f32
        } else {
            0.0
        };
        RatingSummary {
            rating_count,
            user_count,
            mean_rating,
        }
    }
}
