//! Where the two raw tables come from.
//!
//! A source is either an HTTP(S) URL, fetched with a blocking client, or a
//! file on disk holding the same bytes. Fetching returns raw bytes; decoding
//! is the parser's job because `u.item` is Latin-1.

use crate::error::{DataLoadError, Result};
use reqwest::blocking::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// GroupLens location of the ratings table
pub const ML_100K_RATINGS_URL: &str = "http://files.grouplens.org/datasets/movielens/ml-100k/u.data";

/// GroupLens location of the movie metadata table
pub const ML_100K_MOVIES_URL: &str = "http://files.grouplens.org/datasets/movielens/ml-100k/u.item";

/// File name of the ratings table inside an extracted `ml-100k` directory
pub const RATINGS_FILE: &str = "u.data";

/// File name of the movie table inside an extracted `ml-100k` directory
pub const MOVIES_FILE: &str = "u.item";

/// A single table location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(String),
    File(PathBuf),
}

impl DataSource {
    /// Short name used in error messages and parse errors
    pub fn name(&self) -> String {
        match self {
            DataSource::Url(url) => url
                .rsplit('/')
                .next()
                .filter(|s| !s.is_empty())
                .unwrap_or(url)
                .to_string(),
            DataSource::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }

    /// Read the whole source into memory
    pub fn fetch(&self) -> Result<Vec<u8>> {
        match self {
            DataSource::Url(url) => fetch_url(url),
            DataSource::File(path) => {
                debug!("Reading {}", path.display());
                std::fs::read(path).map_err(|e| DataLoadError::unavailable(path.display().to_string(), e))
            }
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Url(url) => f.write_str(url),
            DataSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn fetch_url(url: &str) -> Result<Vec<u8>> {
    debug!("Fetching {}", url);
    let resp = Client::new()
        .get(url)
        .send()
        .map_err(|e| DataLoadError::unavailable(url, format!("request failed: {e}")))?;

    if !resp.status().is_success() {
        return Err(DataLoadError::unavailable(
            url,
            format!("request failed with status {}", resp.status()),
        ));
    }

    let body = resp
        .bytes()
        .map_err(|e| DataLoadError::unavailable(url, format!("failed to read body: {e}")))?;
    Ok(body.to_vec())
}

/// The pair of locations the loader reads from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub ratings: DataSource,
    pub movies: DataSource,
}

impl DataSources {
    /// The public GroupLens copy of MovieLens 100k
    pub fn ml_100k() -> Self {
        Self {
            ratings: DataSource::Url(ML_100K_RATINGS_URL.to_string()),
            movies: DataSource::Url(ML_100K_MOVIES_URL.to_string()),
        }
    }

    /// An extracted `ml-100k` directory containing `u.data` and `u.item`
    pub fn from_dir(dir: &Path) -> Self {
        Self {
            ratings: DataSource::File(dir.join(RATINGS_FILE)),
            movies: DataSource::File(dir.join(MOVIES_FILE)),
        }
    }
}

impl Default for DataSources {
    fn default() -> Self {
        Self::ml_100k()
    }
}
