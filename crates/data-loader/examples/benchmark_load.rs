use data_loader::{DataSources, Dataset};
use std::path::Path;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Prefer a local copy, fall back to GroupLens
    let data_dir = Path::new("data/ml-100k");
    let sources = if data_dir.exists() {
        DataSources::from_dir(data_dir)
    } else {
        DataSources::ml_100k()
    };

    println!("Loading MovieLens 100k dataset...\n");

    let start = Instant::now();
    let dataset = Dataset::load(&sources)?;
    let elapsed = start.elapsed();

    let (movies, ratings) = dataset.counts();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", movies);
    println!("Ratings: {}", ratings);
    println!("Undated movies: {}", dataset.undated_movie_count());
    println!("\nPerformance: {:.0} ratings/second",
             ratings as f64 / elapsed.as_secs_f64());
    Ok(())
}
