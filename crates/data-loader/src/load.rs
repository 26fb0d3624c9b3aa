//! Dataset loading and validation.
//!
//! Fetches both sources, parses them, builds the `Dataset` and checks its
//! integrity. Both tables are fetched and parsed in parallel with rayon.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::source::{DataSource, DataSources};
use crate::types::*;
use tracing::info;

impl Dataset {
    /// Load the MovieLens 100k dataset from the given sources
    ///
    /// Steps:
    /// 1. Fetch and parse both tables in parallel
    /// 2. Insert movies and ratings
    /// 3. Validate data integrity
    pub fn load(sources: &DataSources) -> Result<Self> {
        info!(
            "Loading MovieLens dataset (ratings: {}, movies: {})",
            sources.ratings, sources.movies
        );

        let (ratings, movies) = rayon::join(
            || load_ratings(&sources.ratings),
            || load_movies(&sources.movies),
        );
        let ratings = ratings?;
        let movies = movies?;

        info!("Parsed {} movies, {} ratings", movies.len(), ratings.len());

        let dataset = Self::from_records(movies, ratings)?;

        info!(
            "Dataset ready: {} movies without a release date",
            dataset.undated_movie_count()
        );
        Ok(dataset)
    }

    /// Build and validate a dataset from already-parsed records
    pub fn from_records(movies: Vec<Movie>, ratings: Vec<Rating>) -> Result<Self> {
        let mut dataset = Dataset::new();

        for movie in movies {
            let id = movie.id;
            if dataset.insert_movie(movie).is_some() {
                return Err(DataLoadError::DuplicateMovie(id));
            }
        }

        for rating in ratings {
            dataset.insert_rating(rating);
        }

        dataset.validate()?;
        Ok(dataset)
    }

    /// Validate data integrity
    ///
    /// Check that:
    /// - All rating.movie_id references exist in movies
    /// - Ratings are in valid range (1 - 5)
    pub fn validate(&self) -> Result<()> {
        for rating in &self.ratings {
            if !self.movies.contains_key(&rating.movie_id) {
                return Err(DataLoadError::MissingReference {
                    entity: "Movie".to_string(),
                    id: rating.movie_id,
                });
            }
            if !(1..=5).contains(&rating.rating) {
                return Err(DataLoadError::InvalidValue {
                    field: "rating".to_string(),
                    value: rating.rating.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn load_ratings(source: &DataSource) -> Result<Vec<Rating>> {
    let bytes = source.fetch()?;
    parser::parse_ratings(&parser::decode_latin1(&bytes), &source.name())
}

fn load_movies(source: &DataSource) -> Result<Vec<Movie>> {
    let bytes = source.fetch()?;
    parser::parse_movies(&parser::decode_latin1(&bytes), &source.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    const MOVIES: &str = "\
1|Toy Story (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?Toy%20Story%20(1995)|0|0|0|1|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0
2|GoldenEye (1995)|01-Jan-1995||http://us.imdb.com/M/title-exact?GoldenEye%20(1995)|0|1|1|0|0|0|0|0|0|0|0|0|0|0|0|0|1|0|0
267|unknown||||1|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0|0
";

    const RATINGS: &str = "196\t1\t3\t881250949\n186\t2\t5\t891717742\n22\t1\t1\t878887116\n";

    /// Write fixture files into a temp directory removed on drop
    fn write_fixture(movies: &[u8], ratings: &[u8]) -> TempDir {
        let dir = tempfile::Builder::new().prefix("data-loader-").tempdir().unwrap();
        std::fs::write(dir.path().join("u.item"), movies).unwrap();
        std::fs::write(dir.path().join("u.data"), ratings).unwrap();
        dir
    }

    #[test]
    fn test_load_from_dir() {
        let dir = write_fixture(MOVIES.as_bytes(), RATINGS.as_bytes());
        let dataset = Dataset::load(&DataSources::from_dir(dir.path())).unwrap();

        assert_eq!(dataset.counts(), (3, 3));
        assert_eq!(dataset.undated_movie_count(), 1);
        assert_eq!(dataset.get_movie_ratings(1).len(), 2);
        assert_eq!(dataset.get_movie(2).unwrap().title, "GoldenEye (1995)");

        let summary = dataset.rating_summary();
        assert_eq!(summary.rating_count, 3);
        assert_eq!(summary.user_count, 3);
        assert!((summary.mean_rating - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_load_latin1_title() {
        let mut movies = b"1|Cit\xe9 des enfants perdus, La (1995)|01-Jan-1995|||0|0|0|0|0|0|0|0|1|0|0|0|0|0|0|0|0|0|0\n".to_vec();
        movies.extend_from_slice(b"\n");
        let dir = write_fixture(&movies, b"1\t1\t4\t881250949\n");
        let dataset = Dataset::load(&DataSources::from_dir(dir.path())).unwrap();
        assert_eq!(dataset.get_movie(1).unwrap().title, "Cité des enfants perdus, La (1995)");
    }

    #[test]
    fn test_load_missing_source() {
        let dir = Path::new("/definitely/not/here");
        let err = Dataset::load(&DataSources::from_dir(dir)).unwrap_err();
        assert!(matches!(err, DataLoadError::DataUnavailable { .. }));
    }

    #[test]
    fn test_load_after_fixture_dropped() {
        let dir = write_fixture(MOVIES.as_bytes(), RATINGS.as_bytes());
        let path = dir.path().to_path_buf();
        drop(dir);

        assert!(!path.exists());
        let err = Dataset::load(&DataSources::from_dir(&path)).unwrap_err();
        assert!(matches!(err, DataLoadError::DataUnavailable { .. }));
    }

    #[test]
    fn test_load_malformed_row_fails_fast() {
        let dir = write_fixture(MOVIES.as_bytes(), b"196\t1\t3\n");
        let err = Dataset::load(&DataSources::from_dir(dir.path())).unwrap_err();
        assert!(matches!(err, DataLoadError::ParseError { line: 1, .. }));
    }

    #[test]
    fn test_rating_for_unknown_movie() {
        let movies = parser::parse_movies(MOVIES, "u.item").unwrap();
        let ratings = vec![Rating { user_id: 1, movie_id: 999, rating: 4, timestamp: 0 }];
        let err = Dataset::from_records(movies, ratings).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingReference { id: 999, .. }));
    }

    #[test]
    fn test_rating_out_of_range() {
        let movies = parser::parse_movies(MOVIES, "u.item").unwrap();
        let ratings = vec![Rating { user_id: 1, movie_id: 1, rating: 6, timestamp: 0 }];
        let err = Dataset::from_records(movies, ratings).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidValue { .. }));
    }

    #[test]
    fn test_duplicate_movie_id() {
        let mut movies = parser::parse_movies(MOVIES, "u.item").unwrap();
        movies.push(movies[0].clone());
        let err = Dataset::from_records(movies, vec![]).unwrap_err();
        assert!(matches!(err, DataLoadError::DuplicateMovie(1)));
    }

    #[test]
    fn test_load_dataset() {
        // This test requires the actual dataset files
        // Place ml-100k data in ../../data/ml-100k/
        let data_dir = Path::new("../../data/ml-100k");

        if data_dir.exists() {
            let dataset = Dataset::load(&DataSources::from_dir(data_dir)).unwrap();

            // MovieLens 100k expected counts
            assert_eq!(dataset.counts(), (1682, 100000));
        }
    }
}
