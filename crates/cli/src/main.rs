use analytics::{Dataset, Entity, LinkedMovieAnalytics, MetadataRow, Metric};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use data_loader::config::DEFAULT_DATA_DIR;
use data_loader::ranking::clamp_n;
use data_loader::DataPaths;
use metadata::{FieldName, ImdbConfig, ImdbProvider};
use serde::Serialize;
use std::fmt::Display;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// ReelStats - MovieLens dataset analytics
#[derive(Parser)]
#[command(name = "reel-stats")]
#[command(about = "Exploratory statistics over the MovieLens CSV tables", long_about = None)]
struct Cli {
    /// Directory holding links.csv, movies.csv, ratings.csv and tags.csv
    #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Path to links.csv (overrides --data-dir)
    #[arg(long)]
    links: Option<PathBuf>,

    /// Path to movies.csv (overrides --data-dir)
    #[arg(long)]
    movies: Option<PathBuf>,

    /// Path to ratings.csv (overrides --data-dir)
    #[arg(long)]
    ratings: Option<PathBuf>,

    /// Path to tags.csv (overrides --data-dir)
    #[arg(long)]
    tags: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn data_paths(&self) -> DataPaths {
        let mut paths = DataPaths::from_dir(&self.data_dir);
        if let Some(links) = &self.links {
            paths = paths.with_links(links);
        }
        if let Some(movies) = &self.movies {
            paths = paths.with_movies(movies);
        }
        if let Some(ratings) = &self.ratings {
            paths = paths.with_ratings(ratings);
        }
        if let Some(tags) = &self.tags {
            paths = paths.with_tags(tags);
        }
        paths
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Release-year and genre statistics from movies.csv
    Movies {
        #[command(subcommand)]
        command: MoviesCommand,
    },

    /// Rating distributions and per-movie / per-user statistics
    Ratings {
        #[command(subcommand)]
        command: RatingsCommand,
    },

    /// Tag rankings and search
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },

    /// Rankings over metadata scraped from IMDb (one request per movie)
    Links {
        /// Per-request timeout in seconds
        #[arg(long, default_value = "15")]
        timeout_secs: u64,

        #[command(subcommand)]
        command: LinksCommand,
    },
}

#[derive(Subcommand)]
enum MoviesCommand {
    /// Number of movies per release year
    ReleaseYears,

    /// Number of movies per genre
    Genres,

    /// Movies with the most genres
    MostGenres {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum RatingsCommand {
    /// Number of ratings per year
    ByYear,

    /// Number of ratings per rating value
    ByValue,

    /// Movies or users with the most ratings
    MostRated {
        #[arg(long, value_enum, default_value = "movie")]
        entity: EntityArg,

        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Movies or users ranked by a rating statistic
    Top {
        #[arg(long, value_enum, default_value = "average")]
        metric: MetricArg,

        #[arg(long, value_enum, default_value = "movie")]
        entity: EntityArg,

        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Movies or users whose ratings vary the most
    Controversial {
        #[arg(long, value_enum, default_value = "movie")]
        entity: EntityArg,

        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },
}

#[derive(Subcommand)]
enum TagsCommand {
    /// Tags with the most words
    MostWords {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Longest tags
    Longest {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Tags among both the wordiest and the longest
    MostWordsAndLongest {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Most used tags (case-insensitive)
    Popular {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Tags containing a word (case-insensitive)
    Containing {
        #[arg(long)]
        word: String,
    },
}

#[derive(Subcommand)]
enum LinksCommand {
    /// Raw scraped fields per movie
    Imdb {
        /// Comma-separated: director, budget, gross, runtime
        #[arg(long, value_delimiter = ',', default_value = "director")]
        fields: Vec<String>,

        /// Only look up the first N linked movies
        #[arg(long)]
        limit_movies: Option<usize>,
    },

    /// Directors of the most movies
    Directors {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Highest estimated budgets
    Expensive {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Highest worldwide gross minus budget
    Profitable {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Longest runtimes
    Longest {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },

    /// Highest budget per minute of runtime
    CostPerMinute {
        #[arg(long, default_value = "10", allow_negative_numbers = true)]
        limit: i64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum EntityArg {
    Movie,
    User,
}

impl From<EntityArg> for Entity {
    fn from(arg: EntityArg) -> Self {
        match arg {
            EntityArg::Movie => Entity::Movie,
            EntityArg::User => Entity::User,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum MetricArg {
    Average,
    Median,
    Variance,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::Average => Metric::Average,
            MetricArg::Median => Metric::Median,
            MetricArg::Variance => Metric::Variance,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let paths = cli.data_paths();

    // Progress goes to stderr so --json output stays parseable
    eprintln!("Loading MovieLens tables from {}...", cli.data_dir.display());
    let start = Instant::now();
    let dataset = Dataset::load(&paths);
    eprintln!("{} Loaded dataset in {:?}", "✓".green(), start.elapsed());

    let out = Output { json: cli.json };
    match cli.command {
        Commands::Movies { command } => handle_movies(&dataset, command, &out)?,
        Commands::Ratings { command } => handle_ratings(&dataset, command, &out)?,
        Commands::Tags { command } => handle_tags(&dataset, command, &out)?,
        Commands::Links {
            timeout_secs,
            command,
        } => handle_links(&dataset, timeout_secs, command, &out)?,
    }

    Ok(())
}

/// Handle the 'movies' commands
fn handle_movies(dataset: &Dataset, command: MoviesCommand, out: &Output) -> Result<()> {
    let catalog = &dataset.catalog;
    match command {
        MoviesCommand::ReleaseYears => {
            out.ranking("Movies per release year", &catalog.distribution_by_release_year())
        }
        MoviesCommand::Genres => out.ranking("Movies per genre", &catalog.distribution_by_genre()),
        MoviesCommand::MostGenres { limit } => out.ranking(
            "Movies with the most genres",
            &catalog.top_by_genre_count(clamp_n(limit)),
        ),
    }
}

/// Handle the 'ratings' commands
fn handle_ratings(dataset: &Dataset, command: RatingsCommand, out: &Output) -> Result<()> {
    let ratings = &dataset.ratings;
    match command {
        RatingsCommand::ByYear => out.ranking("Ratings per year", &ratings.distribution_by_year()),
        RatingsCommand::ByValue => {
            out.ranking("Ratings per value", &ratings.distribution_by_rating_value())
        }
        RatingsCommand::MostRated { entity, limit } => {
            let entity = Entity::from(entity);
            out.ranking(
                &format!("Most rated ({})", entity),
                &ratings.top_by_rating_count(clamp_n(limit), entity),
            )
        }
        RatingsCommand::Top {
            metric,
            entity,
            limit,
        } => {
            let (metric, entity) = (Metric::from(metric), Entity::from(entity));
            let top = ratings
                .top_by_metric(clamp_n(limit), metric, entity)
                .with_context(|| format!("Failed to rank by {}", metric))?;
            out.ranking(&format!("Top by {} rating ({})", metric, entity), &top)
        }
        RatingsCommand::Controversial { entity, limit } => {
            let entity = Entity::from(entity);
            let top = ratings
                .top_controversial(clamp_n(limit), entity)
                .context("Failed to rank by variance")?;
            out.ranking(&format!("Most controversial ({})", entity), &top)
        }
    }
}

/// Handle the 'tags' commands
fn handle_tags(dataset: &Dataset, command: TagsCommand, out: &Output) -> Result<()> {
    let tags = &dataset.tags;
    match command {
        TagsCommand::MostWords { limit } => {
            out.ranking("Tags with the most words", &tags.top_by_word_count(clamp_n(limit)))
        }
        TagsCommand::Longest { limit } => {
            out.list("Longest tags", &tags.top_by_length(clamp_n(limit)))
        }
        TagsCommand::MostWordsAndLongest { limit } => {
            let both: Vec<String> = tags
                .top_by_word_count_and_length(clamp_n(limit))
                .into_iter()
                .collect();
            out.list("Tags among the wordiest and the longest", &both)
        }
        TagsCommand::Popular { limit } => {
            out.ranking("Most popular tags", &tags.top_by_frequency(clamp_n(limit)))
        }
        TagsCommand::Containing { word } => out.list(
            &format!("Tags containing '{}'", word),
            &tags.tags_containing(&word),
        ),
    }
}

/// Handle the 'links' commands
fn handle_links(
    dataset: &Dataset,
    timeout_secs: u64,
    command: LinksCommand,
    out: &Output,
) -> Result<()> {
    let config = ImdbConfig::default().with_timeout(Duration::from_secs(timeout_secs));
    let provider = ImdbProvider::from_config(config).context("Failed to build IMDb client")?;
    let linked: LinkedMovieAnalytics<ImdbProvider> = dataset.linked(provider);

    match command {
        LinksCommand::Imdb {
            fields,
            limit_movies,
        } => {
            let fields = fields
                .iter()
                .map(|name| {
                    name.parse::<FieldName>()
                        .with_context(|| format!("Invalid --fields entry '{}'", name))
                })
                .collect::<Result<Vec<_>>>()?;
            let links = match limit_movies {
                Some(n) => &linked.links()[..n.min(linked.links().len())],
                None => linked.links(),
            };
            let rows = linked.fetch_metadata_fields(links, &fields);
            out.metadata(&fields, &rows)
        }
        LinksCommand::Directors { limit } => {
            out.ranking("Top directors", &linked.top_directors(clamp_n(limit)))
        }
        LinksCommand::Expensive { limit } => {
            out.ranking("Most expensive", &linked.top_by_budget(clamp_n(limit)))
        }
        LinksCommand::Profitable { limit } => {
            out.ranking("Most profitable", &linked.top_by_profit(clamp_n(limit)))
        }
        LinksCommand::Longest { limit } => {
            out.ranking("Longest (minutes)", &linked.top_by_runtime(clamp_n(limit)))
        }
        LinksCommand::CostPerMinute { limit } => out.ranking(
            "Highest cost per minute",
            &linked.top_by_cost_per_minute(clamp_n(limit)),
        ),
    }
}

/// Where results go: colored text on stdout, or JSON with `--json`
struct Output {
    json: bool,
}

impl Output {
    /// Print (key, value) pairs in order
    fn ranking<K, V>(&self, heading: &str, entries: &[(K, V)]) -> Result<()>
    where
        K: Display + Serialize,
        V: Display + Serialize,
    {
        if self.json {
            return self.print_json(entries);
        }

        println!("{}", heading.bold().blue());
        for (rank, (key, value)) in entries.iter().enumerate() {
            println!("{}. {}: {}", (rank + 1).to_string().green(), key, value);
        }
        Ok(())
    }

    fn list(&self, heading: &str, items: &[String]) -> Result<()> {
        if self.json {
            return self.print_json(items);
        }

        println!("{}", heading.bold().blue());
        for item in items {
            println!("{}{}", "• ".green(), item);
        }
        Ok(())
    }

    fn metadata(&self, fields: &[FieldName], rows: &[MetadataRow]) -> Result<()> {
        if self.json {
            return self.print_json(rows);
        }

        let header: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        println!("{} | {}", "movieId".bold().blue(), header.join(" | ").bold().blue());
        for row in rows {
            println!("{} | {}", row.movie_id.green(), row.values.join(" | "));
        }
        Ok(())
    }

    fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value).context("Failed to serialize results")?;
        println!("{}", json);
        Ok(())
    }
}
