use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use data_loader::{CleanReport, DataIndex, Movie, store};
use pipeline::FilterPipeline;
use pipeline::filters::{GenreFilter, LanguageFilter, MinimumVotesFilter, TitleContainsFilter};
use server::{DEFAULT_MIN_VOTES, MovieQueryService};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Raw file names looked up in the data directory by `serve --from-csv`
const RAW_MOVIES_CSV: &str = "movies_metadata.csv";
const RAW_CREDITS_CSV: &str = "credits.csv";

/// movie-api - Movie metadata cleaning and query service
#[derive(Parser)]
#[command(name = "movie-api")]
#[command(about = "Clean the movies metadata dataset and serve queries over it", long_about = None)]
struct Cli {
    /// Directory holding the cleaned tables (or the raw CSVs with --from-csv)
    #[arg(short, long, default_value = "datasets", global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the raw CSVs and write the cleaned tables
    Clean {
        /// Path to movies_metadata.csv
        #[arg(long)]
        movies_csv: PathBuf,

        /// Path to credits.csv
        #[arg(long)]
        credits_csv: PathBuf,

        /// Output directory (defaults to --data-dir)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Start the HTTP query server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8000")]
        bind: SocketAddr,

        /// Votes a film needs before /votos_titulo reports on it
        #[arg(long, default_value_t = DEFAULT_MIN_VOTES)]
        min_votes: u32,

        /// Clean the raw CSVs in --data-dir at startup instead of reading cleaned tables
        #[arg(long)]
        from_csv: bool,
    },

    /// Search movies by title
    Search {
        /// Title fragment (case-insensitive substring match)
        #[arg(long)]
        title: String,

        /// Only movies tagged with this genre
        #[arg(long)]
        genre: Option<String>,

        /// Only movies in this original language (ISO 639-1 code)
        #[arg(long)]
        language: Option<String>,

        /// Only movies with at least this many votes
        #[arg(long, default_value = "0")]
        min_votes: u32,

        /// Number of results to show
        #[arg(long, default_value = "20")]
        limit: usize,
    },

    /// Show table sizes and integrity checks for the cleaned dataset
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            movies_csv,
            credits_csv,
            out_dir,
        } => {
            let out_dir = out_dir.unwrap_or(cli.data_dir);
            handle_clean(&movies_csv, &credits_csv, &out_dir)?
        }
        Commands::Serve {
            bind,
            min_votes,
            from_csv,
        } => handle_serve(&cli.data_dir, bind, min_votes, from_csv).await?,
        Commands::Search {
            title,
            genre,
            language,
            min_votes,
            limit,
        } => {
            let data_index = load_index(&cli.data_dir)?;
            handle_search(&data_index, &title, genre, language, min_votes, limit)
        }
        Commands::Stats => {
            let data_index = load_index(&cli.data_dir)?;
            handle_stats(&data_index)
        }
    }

    Ok(())
}

fn load_index(data_dir: &Path) -> Result<DataIndex> {
    println!("Loading cleaned dataset from {}...", data_dir.display());
    let start = Instant::now();
    let data_index = DataIndex::load_from_files(data_dir).with_context(|| {
        format!(
            "Failed to load cleaned dataset from {} (run `movie-api clean` first)",
            data_dir.display()
        )
    })?;
    println!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());
    Ok(data_index)
}

/// Handle the 'clean' command
fn handle_clean(movies_csv: &Path, credits_csv: &Path, out_dir: &Path) -> Result<()> {
    let start = Instant::now();
    let (movies, credits, report) = data_loader::clean_csv_files(movies_csv, credits_csv)
        .context("Failed to clean raw dataset")?;

    store::write_tables(out_dir, &movies, &credits)
        .with_context(|| format!("Failed to write cleaned tables to {}", out_dir.display()))?;

    println!(
        "{} Cleaned dataset in {:?}",
        "✓".green(),
        start.elapsed()
    );
    print_clean_report("movies", &report.movies);
    print_clean_report("credits", &report.credits);

    let (movies_path, credits_path) = store::table_paths(out_dir);
    tracing::debug!(movies = movies.len(), credits = credits.len(), "cleaned tables written");
    println!("Wrote {}", movies_path.display());
    println!("Wrote {}", credits_path.display());
    Ok(())
}

/// Handle the 'serve' command
async fn handle_serve(
    data_dir: &Path,
    bind: SocketAddr,
    min_votes: u32,
    from_csv: bool,
) -> Result<()> {
    let data_index = if from_csv {
        let movies_csv = data_dir.join(RAW_MOVIES_CSV);
        let credits_csv = data_dir.join(RAW_CREDITS_CSV);
        let (data_index, report) = DataIndex::load_from_csv(&movies_csv, &credits_csv)
            .context("Failed to clean raw dataset")?;
        print_clean_report("movies", &report.movies);
        print_clean_report("credits", &report.credits);
        data_index
    } else {
        load_index(data_dir)?
    };

    tracing::info!(min_votes, "vote threshold for /votos_titulo");
    let service = MovieQueryService::new(Arc::new(data_index)).with_min_votes(min_votes);
    server::serve(service, bind).await
}

/// Handle the 'search' command
fn handle_search(
    data_index: &DataIndex,
    title: &str,
    genre: Option<String>,
    language: Option<String>,
    min_votes: u32,
    limit: usize,
) {
    let mut pipeline = FilterPipeline::new().add_filter(TitleContainsFilter::new(title));
    if let Some(genre) = genre.as_deref() {
        pipeline = pipeline.add_filter(GenreFilter::new(genre));
    }
    if let Some(language) = language.as_deref() {
        pipeline = pipeline.add_filter(LanguageFilter::new(language));
    }
    if min_votes > 0 {
        pipeline = pipeline.add_filter(MinimumVotesFilter::new(min_votes));
    }

    let mut matches = pipeline.run(data_index);
    let total = matches.len();

    // Exact title matches first, then most popular
    let wanted = title.trim().to_lowercase();
    matches.sort_by(|a, b| {
        let a_partial = a.title.to_lowercase() != wanted;
        let b_partial = b.title.to_lowercase() != wanted;
        a_partial
            .cmp(&b_partial)
            .then_with(|| b.popularity.total_cmp(&a.popularity))
    });

    println!(
        "{}",
        format!("Search results for '{}' ({} matches):", title, total)
            .bold()
            .blue()
    );
    for (rank, movie) in matches.iter().take(limit).enumerate() {
        print_movie(rank + 1, movie);
    }
}

/// Handle the 'stats' command
fn handle_stats(data_index: &DataIndex) {
    let (movies, credits) = data_index.counts();
    println!("{}", "Dataset".bold().blue());
    println!("{}Movies: {}", "• ".green(), movies);
    println!("{}Credits: {}", "• ".green(), credits);

    let report = data_index.validate();
    if report.is_clean() {
        println!("{}Integrity: {}", "• ".green(), "ok".green());
    } else {
        println!(
            "{}Duplicated movie ids: {}",
            "• ".yellow(),
            report.duplicate_movie_ids.len()
        );
        println!(
            "{}Credits without a movie: {}",
            "• ".yellow(),
            report.orphan_credits.len()
        );
    }

    println!("{}", "Top languages".bold().blue());
    for (language, count) in data_index.language_counts().iter().take(10) {
        println!("  - {}: {}", language, count);
    }

    let genres = data_index.genre_names();
    println!("{}", format!("Genres ({})", genres.len()).bold().blue());
    println!("  {}", genres.join(", "));
}

fn print_clean_report(table: &str, report: &CleanReport) {
    println!(
        "{}{}: kept {} of {} rows ({} bad date, {} bad id, {} undecodable)",
        "• ".cyan(),
        table,
        report.kept.to_string().green(),
        report.rows_read,
        report.dropped_invalid_date,
        report.dropped_invalid_id,
        report.undecodable
    );
}

fn print_movie(rank: usize, movie: &Movie) {
    let genres = movie
        .genres
        .iter()
        .map(|g| g.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "{}. {} ({}) [{}] - popularity {:.2}, {:.1}/10 from {} votes",
        rank.to_string().green(),
        movie.title,
        movie.release_year,
        genres,
        movie.popularity,
        movie.vote_average,
        movie.vote_count
    );
}
