use anyhow::{Context, Result, anyhow};
use catalog::{Book, BookId, Catalog, RatingMap};
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{
    BlendMode, Blender, EngineConfig, EngineContext, RecommendRequest, SimilarityConfig, Strategy,
    to_response_json,
};
use rand::Rng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;

/// BookRecs - Technical Book Recommendation Engine
#[derive(Parser)]
#[command(name = "book-recs")]
#[command(
    about = "Technical book recommendations from content, preference and popularity signals",
    long_about = None
)]
struct Cli {
    /// Catalog file (.json or .dat). Uses the built-in 25-book catalog when omitted
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Keep only the N most frequent terms in the similarity vocabulary
    #[arg(long)]
    max_features: Option<usize>,

    /// Hybrid ranking: "rating" (sort merged candidates by book rating) or "weighted"
    #[arg(long, default_value = "rating", value_parser = parse_blend)]
    blend: BlendMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend books for a set of ratings
    Recommend {
        /// A rating as ID=RATING, repeatable (e.g. --rate 1=5 --rate 3=4)
        #[arg(long = "rate", value_parser = parse_rating)]
        ratings: Vec<(BookId, f32)>,

        /// Strategy: content, collaborative or hybrid
        #[arg(long, default_value = "hybrid", value_parser = parse_strategy)]
        method: Strategy,

        /// Number of recommendations to return
        #[arg(short, long, default_value = "6")]
        n: usize,

        /// Full JSON request body instead of --rate/--method/-n
        #[arg(long, conflicts_with_all = ["ratings", "method", "n"])]
        request: Option<String>,

        /// Print the books as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Books whose content reads most like a given book
    Similar {
        id: BookId,

        #[arg(short, long, default_value = "5")]
        n: usize,
    },

    /// Nearest books by category, level, rating and year
    Neighbors {
        id: BookId,

        #[arg(short, long, default_value = "5")]
        n: usize,
    },

    /// Show one book
    Book { id: BookId },

    /// List books, optionally by category or title/author search
    Books {
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive substring of title or author
        #[arg(long)]
        search: Option<String>,
    },

    /// List categories
    Categories,

    /// Catalog statistics
    Stats,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "100")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
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

    let start = Instant::now();
    let catalog = match &cli.catalog {
        Some(path) => {
            println!("Loading catalog from {}...", path.display());
            Catalog::load_from_file(path)
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?
        }
        None => catalog::sample_catalog().context("Failed to load the built-in catalog")?,
    };

    let mut similarity = SimilarityConfig::new();
    if let Some(max) = cli.max_features {
        similarity = similarity.with_max_features(max);
    }
    let config = EngineConfig::new()
        .with_similarity(similarity)
        .with_blend(cli.blend);

    let context = EngineContext::build(catalog, config).context("Failed to build engine")?;
    let blender = Blender::new(Arc::new(context));
    println!(
        "{} Loaded {} books in {:?}",
        "✓".green(),
        blender.context().catalog.len(),
        start.elapsed()
    );

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            ratings,
            method,
            n,
            request,
            json,
        } => handle_recommend(&blender, ratings, method, n, request, json)?,
        Commands::Similar { id, n } => handle_similar(&blender, id, n)?,
        Commands::Neighbors { id, n } => handle_neighbors(&blender, id, n)?,
        Commands::Book { id } => handle_book(&blender, id)?,
        Commands::Books { category, search } => handle_books(&blender, category, search)?,
        Commands::Categories => handle_categories(&blender),
        Commands::Stats => handle_stats(&blender),
        Commands::Benchmark {
            requests,
            concurrent,
        } => handle_benchmark(blender, requests, concurrent).await?,
    }

    Ok(())
}

fn parse_rating(s: &str) -> Result<(BookId, f32), String> {
    let (id, rating) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=RATING, got '{}'", s))?;
    let id = id
        .trim()
        .parse::<BookId>()
        .map_err(|_| format!("'{}' is not a book id", id))?;
    let rating = rating
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("'{}' is not a rating", rating))?;
    Ok((id, rating))
}

fn parse_strategy(s: &str) -> Result<Strategy, String> {
    s.parse().map_err(|e: catalog::CatalogError| e.to_string())
}

fn parse_blend(s: &str) -> Result<BlendMode, String> {
    s.parse().map_err(|e: catalog::CatalogError| e.to_string())
}

/// Handle the 'recommend' command
fn handle_recommend(
    blender: &Blender,
    ratings: Vec<(BookId, f32)>,
    method: Strategy,
    n: usize,
    request: Option<String>,
    json: bool,
) -> Result<()> {
    let (books, title) = match request {
        Some(body) => {
            let request = RecommendRequest::from_json(&body).context("Invalid request body")?;
            let method = request.method;
            let books = blender.handle(request).context("Request failed")?;
            (books, format!("Recommendations ({})", method))
        }
        None => {
            let ratings: RatingMap = ratings.into_iter().collect();
            let books = blender
                .recommend(method, &ratings, n)
                .context("Failed to get recommendations")?;
            (books, format!("Recommendations ({}, {} ratings)", method, ratings.len()))
        }
    };

    if json {
        println!("{}", to_response_json(&books)?);
    } else {
        print_books(&title, &books);
    }
    Ok(())
}

/// Handle the 'similar' command
fn handle_similar(blender: &Blender, id: BookId, n: usize) -> Result<()> {
    let book = blender.context().catalog.book(id)?;
    let books = blender.similar_books(id, n)?;
    print_books(&format!("Books similar to '{}'", book.title), &books);
    Ok(())
}

/// Handle the 'neighbors' command
fn handle_neighbors(blender: &Blender, id: BookId, n: usize) -> Result<()> {
    let book = blender.context().catalog.book(id)?;
    let books = blender.neighbors(id, n)?;
    print_books(&format!("Nearest neighbors of '{}'", book.title), &books);
    Ok(())
}

/// Handle the 'book' command
fn handle_book(blender: &Blender, id: BookId) -> Result<()> {
    let book = blender
        .context()
        .catalog
        .book(id)
        .map_err(|_| anyhow!("Book {} not found", id))?;

    println!("{}", format!("Book ID: {}", book.id).bold().blue());
    println!("{}Title: {}", "• ".green(), book.title);
    println!("{}Author: {}", "• ".green(), book.author);
    println!("{}Category: {}", "• ".green(), book.category);
    println!("{}Level: {}", "• ".green(), book.level);
    println!("{}Rating: {:.1}", "• ".cyan(), book.rating);
    println!("{}Year: {}", "• ".cyan(), book.year);
    Ok(())
}

/// Handle the 'books' command
fn handle_books(blender: &Blender, category: Option<String>, search: Option<String>) -> Result<()> {
    let catalog = &blender.context().catalog;

    let mut books: Vec<&Book> = match &search {
        Some(query) => catalog.search(query),
        None => catalog.all().iter().collect(),
    };
    if let Some(category) = &category {
        if catalog.books_in_category(category).is_empty() {
            return Err(anyhow!("Unknown category '{}'", category));
        }
        books.retain(|book| &book.category == category);
    }

    let owned: Vec<Book> = books.into_iter().cloned().collect();
    print_books(&format!("{} books", owned.len()), &owned);
    Ok(())
}

/// Handle the 'categories' command
fn handle_categories(blender: &Blender) {
    let catalog = &blender.context().catalog;
    println!("{}", "Categories:".bold().blue());
    for category in catalog.categories() {
        println!(
            "  {} ({} books)",
            category,
            catalog.books_in_category(category).len()
        );
    }
}

/// Handle the 'stats' command
fn handle_stats(blender: &Blender) {
    let context = blender.context();
    let stats = context.catalog.stats();

    println!("{}", "Catalog statistics:".bold().blue());
    println!("{}Books: {}", "• ".green(), stats.total_books);
    println!("{}Average rating: {:.2}", "• ".green(), stats.avg_rating);
    if let Some((oldest, newest)) = stats.year_range {
        println!("{}Years: {}-{}", "• ".green(), oldest, newest);
    }
    println!(
        "{}Vocabulary: {} terms",
        "• ".green(),
        context.similarity.vocabulary_size()
    );

    println!("Levels:");
    for (level, count) in &stats.levels {
        println!("  - {}: {}", level, count);
    }
    println!("Categories:");
    for (category, count) in &stats.categories {
        println!("  - {}: {}", category, count);
    }
    println!("Top rated:");
    for (id, title, rating) in &stats.top_rated {
        println!("  - [{}] {} ({:.1})", id, title, rating);
    }
}

/// Handle the 'benchmark' command
async fn handle_benchmark(blender: Blender, requests: usize, concurrent: usize) -> Result<()> {
    if requests == 0 {
        return Err(anyhow!("requests must be positive"));
    }

    let ids: Vec<BookId> = blender.context().catalog.all().iter().map(|b| b.id).collect();
    if ids.is_empty() {
        return Err(anyhow!("catalog is empty"));
    }

    // Random rating maps of 1-5 books with ratings 1-5
    let mut rng = rand::rng();
    let workload: Vec<(Strategy, RatingMap)> = (0..requests)
        .map(|_| {
            let strategy = Strategy::ALL[rng.random_range(0..Strategy::ALL.len())];
            let count = rng.random_range(1..=5);
            let ratings = (0..count)
                .map(|_| {
                    let id = ids[rng.random_range(0..ids.len())];
                    (id, rng.random_range(1..=5) as f32)
                })
                .collect();
            (strategy, ratings)
        })
        .collect();

    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let started = Instant::now();

    let mut handles = vec![];
    for (strategy, ratings) in workload {
        let blender = blender.clone();
        let limiter = limiter.clone();
        let handle = tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let elapsed = tokio::task::spawn_blocking(move || {
                let start = Instant::now();
                blender.recommend(strategy, &ratings, 6)?;
                Ok::<_, anyhow::Error>(start.elapsed())
            })
            .await??;
            Ok::<_, anyhow::Error>(elapsed)
        });
        handles.push(handle);
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = vec![];
    for handle in handles {
        let elapsed = handle.await??;
        timings.push(elapsed);
    }
    let wall_time = started.elapsed();

    let busy_time: Duration = timings.iter().sum();
    let avg_latency = busy_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f32| timings[((timings.len() as f32 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f32 / wall_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Total time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);

    Ok(())
}

/// Helper function to format and print a list of books
fn print_books(title: &str, books: &[Book]) {
    println!("{}", format!("{}:", title).bold().blue());
    if books.is_empty() {
        println!("  {}", "(no books)".dimmed());
        return;
    }
    for (i, book) in books.iter().enumerate() {
        println!(
            "{}. {} by {} [{} / {}] - {:.1} ({})",
            (i + 1).to_string().green(),
            book.title,
            book.author,
            book.category,
            book.level,
            book.rating,
            book.year
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("17=4.5").unwrap(), (17, 4.5));
        assert_eq!(parse_rating(" 3 = 5 ").unwrap(), (3, 5.0));
        assert!(parse_rating("17").is_err());
        assert!(parse_rating("x=4").is_err());
        assert!(parse_rating("1=good").is_err());
    }

    #[test]
    fn test_parse_strategy_and_blend() {
        assert_eq!(parse_strategy("content").unwrap(), Strategy::Content);
        assert!(parse_strategy("nope").is_err());
        assert_eq!(parse_blend("rating").unwrap(), BlendMode::RatingSort);
    }

    #[test]
    fn test_cli_parses_recommend() {
        let cli = Cli::try_parse_from([
            "book-recs", "recommend", "--rate", "1=5", "--rate", "3=4", "--method", "content",
            "-n", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Recommend {
                ratings, method, n, ..
            } => {
                assert_eq!(ratings, vec![(1, 5.0), (3, 4.0)]);
                assert_eq!(method, Strategy::Content);
                assert_eq!(n, 3);
            }
            _ => panic!("expected recommend"),
        }
    }
}
