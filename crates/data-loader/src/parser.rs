//! Parser for MovieLens 100k data files.
//!
//! - u.data: userId \t movieId \t rating \t timestamp
//! - u.item: movieId | title | release date | video release date | IMDb URL | 19 genre flags
//!
//! Neither file has a header. Parsing is strict: the first malformed row
//! aborts with a `ParseError` naming the file and line.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use chrono::NaiveDate;
use tracing::warn;

/// Fields per row of u.data
pub const RATING_FIELDS: usize = 4;

/// Fields read per row of u.item; anything after the last genre flag is ignored
pub const MOVIE_FIELDS: usize = 5 + Genre::COUNT;

/// Convert ISO-8859-1 (Latin-1) bytes into a `String`
///
/// The MovieLens dataset uses ISO-8859-1 encoding, not UTF-8. Latin-1 is a
/// single-byte encoding where each byte maps directly to the Unicode code
/// point of the same value, so the conversion never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Iterate non-blank lines with their 1-based line numbers
///
/// A stray `\r` left on the last line lands in a field that is trimmed
/// before parsing.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Parse the ratings table
///
/// `file` only labels errors.
pub fn parse_ratings(content: &str, file: &str) -> Result<Vec<Rating>> {
    let mut ratings = Vec::new();

    for (line_no, line) in data_lines(content) {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() != RATING_FIELDS {
            return Err(DataLoadError::parse(
                file,
                line_no,
                format!("Expected {} fields but found {}", RATING_FIELDS, parts.len()),
            ));
        }

        let rating = Rating {
            user_id: parse_field(parts[0], "userId", file, line_no)?,
            movie_id: parse_field(parts[1], "movieId", file, line_no)?,
            rating: parse_field(parts[2], "rating", file, line_no)?,
            timestamp: parse_field(parts[3], "timestamp", file, line_no)?,
        };

        ratings.push(rating);
    }
    Ok(ratings)
}

/// Parse the movie table
///
/// Only the first 24 fields of a row are read. A row with fewer is an error.
pub fn parse_movies(content: &str, file: &str) -> Result<Vec<Movie>> {
    let mut movies = Vec::new();

    for (line_no, line) in data_lines(content) {
        let parts: Vec<&str> = line.split('|').take(MOVIE_FIELDS).collect();
        if parts.len() < MOVIE_FIELDS {
            return Err(DataLoadError::parse(
                file,
                line_no,
                format!("Expected {} fields but found {}", MOVIE_FIELDS, parts.len()),
            ));
        }

        let release_date = match parse_release_date(parts[2]) {
            Ok(date) => date,
            Err(e) => {
                warn!(
                    "Unparseable release date '{}' at line {} in {}: {}",
                    parts[2], line_no, file, e
                );
                None
            }
        };

        let movie = Movie {
            id: parse_field(parts[0], "movieId", file, line_no)?,
            title: parts[1].to_string(),
            release_date,
            video_release_date: non_empty(parts[3]),
            imdb_url: non_empty(parts[4]),
            genres: parse_genre_flags(&parts[5..], file, line_no)?,
        };

        movies.push(movie);
    }
    Ok(movies)
}

fn parse_field<T>(value: &str, name: &str, file: &str, line_no: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e| {
        DataLoadError::parse(file, line_no, format!("Invalid {}: '{}' ({})", name, value, e))
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Parse a release date field
///
/// Example: "01-Jan-1995" -> Ok(Some(1995-01-01))
///          ""            -> Ok(None)
///
/// ISO dates ("1995-01-01") are accepted as well.
pub fn parse_release_date(value: &str) -> std::result::Result<Option<NaiveDate>, chrono::ParseError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, "%d-%b-%Y")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map(Some)
}

/// Turn the 19 `0`/`1` flag columns into the list of set genres
fn parse_genre_flags(flags: &[&str], file: &str, line_no: usize) -> Result<Vec<Genre>> {
    let mut genres = Vec::new();
    for (genre, flag) in Genre::ALL.iter().zip(flags) {
        match flag.trim() {
            "1" => genres.push(*genre),
            "0" => {}
            other => {
                return Err(DataLoadError::parse(
                    file,
                    line_no,
                    format!("Invalid {} flag: '{}'", genre, other),
                ));
            }
        }
    }
    Ok(genres)
}
