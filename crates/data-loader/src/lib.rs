//! # Data Loader Crate
//!
//! This crate fetches and parses the MovieLens 100k dataset.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Movie, Rating, Genre, Dataset)
//! - **source**: Where the raw tables come from (GroupLens URLs or a local directory)
//! - **parser**: Parse u.data and u.item into Rust structs
//! - **load**: Build and validate the Dataset
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{Dataset, DataSources};
//!
//! // Fetch both tables from GroupLens
//! let dataset = Dataset::load(&DataSources::ml_100k())?;
//!
//! let (movies, ratings) = dataset.counts();
//! println!("{} movies, {} ratings", movies, ratings);
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod source;
pub mod parser;
pub mod load;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use source::{DataSource, DataSources};
pub use types::{
    // Type aliases
    UserId,
    MovieId,
    // Core types
    Movie,
    Rating,
    RatingSummary,
    Dataset,
    // Genre vocabulary
    Genre,
    UnknownGenre,
};
