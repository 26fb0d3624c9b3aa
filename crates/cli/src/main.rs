use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{DataSources, Dataset, Genre};
use pipeline::{filter_selection, resolve_year_range, GenreSelection, GenreYearTable, YearCounts};
use std::path::PathBuf;
use std::time::Instant;

/// Genre Trends - movies released per year and genre (MovieLens 100k)
#[derive(Parser)]
#[command(name = "genre-trends")]
#[command(about = "Count MovieLens 100k movies per release year and genre", long_about = None)]
struct Cli {
    /// Read u.data and u.item from this directory instead of fetching from GroupLens
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dataset counts and the year span
    Summary,

    /// Print the full year x genre table
    Table,

    /// Slice the table to some genres and a year range
    Query {
        /// Comma-separated genre names, e.g. "Comedy,Drama"
        #[arg(long, value_delimiter = ',', default_value = "Action")]
        genres: Vec<String>,

        /// First year (inclusive); defaults to the earliest year in the data
        #[arg(long, allow_negative_numbers = true)]
        from: Option<i32>,

        /// Last year (inclusive); defaults to the latest year in the data
        #[arg(long, allow_negative_numbers = true)]
        to: Option<i32>,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let sources = match &cli.data_dir {
        Some(dir) => DataSources::from_dir(dir),
        None => DataSources::ml_100k(),
    };

    // Load and aggregate once
    println!("Loading MovieLens 100k from {}...", sources.movies);
    let start = Instant::now();
    let dataset = Dataset::load(&sources).context("Failed to load MovieLens dataset")?;
    let table = GenreYearTable::from_dataset(&dataset);
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Summary => handle_summary(&dataset, &table),
        Commands::Table => handle_table(&table),
        Commands::Query { genres, from, to } => handle_query(&table, &genres, from, to)?,
    }

    Ok(())
}

/// Handle the 'summary' command
fn handle_summary(dataset: &Dataset, table: &GenreYearTable) {
    let (movies, ratings) = dataset.counts();
    let rating_summary = dataset.rating_summary();

    println!("{}", "Dataset summary".bold().blue());
    println!("{}Movies: {}", "• ".green(), movies);
    println!("{}Movies without release date: {}", "• ".green(), dataset.undated_movie_count());
    println!("{}Ratings: {} from {} users", "• ".cyan(), ratings, rating_summary.user_count);
    println!("{}Mean rating: {:.2}", "• ".cyan(), rating_summary.mean_rating);

    match table.year_span() {
        Some((first, last)) => println!(
            "{}Release years: {}-{} ({} distinct)",
            "• ".yellow(),
            first,
            last,
            table.len()
        ),
        None => println!("{}Release years: none", "• ".yellow()),
    }

    println!("Movies per genre:");
    for genre in Genre::ALL {
        println!("  - {}: {}", genre, table.column_total(genre));
    }
}

/// Handle the 'table' command
fn handle_table(table: &GenreYearTable) {
    let header: Vec<String> = Genre::ALL.iter().map(|g| abbreviate(*g)).collect();
    println!("{} {}", "Year".bold(), header.join(" ").bold());

    for (year, counts) in table.rows() {
        let cells: Vec<String> = counts
            .iter()
            .map(|(genre, count)| format!("{:>width$}", count, width = abbreviate(genre).len()))
            .collect();
        println!("{} {}", year.to_string().green(), cells.join(" "));
    }
}

/// Handle the 'query' command
fn handle_query(table: &GenreYearTable, genres: &[String], from: Option<i32>, to: Option<i32>) -> Result<()> {
    let selection = GenreSelection::parse(genres)?;
    let (from, to) = resolve_year_range(table, from, to);

    let rows = filter_selection(table, &selection, from, to)?;
    print_rows(&rows, &selection, from, to);
    Ok(())
}

/// Helper function to format and print query rows
fn print_rows(rows: &[YearCounts], selection: &GenreSelection, from: i32, to: i32) {
    println!(
        "{}",
        format!("Movies released per year, {}-{}:", from, to).bold().blue()
    );
    if rows.is_empty() {
        println!("No movies released in that range.");
        return;
    }

    let header: Vec<String> = selection
        .genres()
        .iter()
        .map(|g| format!("{:>12}", g.name()))
        .collect();
    println!("{} {}", "Year".bold(), header.join("").bold());

    for row in rows {
        let cells: Vec<String> = row
            .counts
            .iter()
            .map(|(_, count)| format!("{:>12}", count))
            .collect();
        println!("{} {}", row.year.to_string().green(), cells.join(""));
    }
}

/// Short column header for the full table
fn abbreviate(genre: Genre) -> String {
    genre.name().chars().take(5).collect()
}
