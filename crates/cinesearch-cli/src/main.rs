//! cinesearch - terminal movie search client with local ratings and comments.

/// Search browser controller.
mod browser;
/// Application configuration (TOML).
mod config;
/// Pagination window computation.
mod pagination;
/// Terminal UI components.
mod tui;

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;
use url::Url;

use crate::browser::{Browser, NO_MOVIE_FOUND};
use crate::config::{API_KEY_ENV, AppConfig, resolve_config_path, resolve_log_path};
use crate::pagination::PaginationState;
use cinesearch_api::omdb::{LocalOmdbApi, OMDB_PAGE_SIZE, OmdbClient};
use cinesearch_store::{Rating, append_comment, load_annotations, open_store, set_rating};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config/data directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse search results interactively via TUI.
    Browse(BrowseArgs),
    /// Print one page of search results.
    Search(SearchArgs),
    /// Print the details, rating and comments of one movie.
    Detail(DetailArgs),
    /// Rate a movie (1-5 stars).
    Rate(RateArgs),
    /// Add a comment to a movie.
    Comment(CommentArgs),
    /// Manage the configuration file.
    Config(ConfigCommand),
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Initial search query.
    #[arg(long)]
    query: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Title to search for (e.g. "batman").
    #[arg(long, required = true)]
    query: String,
    /// Page number (1-based).
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    page: u32,
}

/// Arguments for the `detail` subcommand.
#[derive(clap::Args)]
struct DetailArgs {
    /// IMDb identifier (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
}

/// Arguments for the `rate` subcommand.
#[derive(clap::Args)]
struct RateArgs {
    /// IMDb identifier (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
    /// Number of stars.
    #[arg(long, required = true, value_parser = clap::value_parser!(u8).range(1..=5))]
    stars: u8,
}

/// Arguments for the `comment` subcommand.
#[derive(clap::Args)]
struct CommentArgs {
    /// IMDb identifier (e.g. "tt0372784").
    #[arg(long, required = true)]
    id: String,
    /// Comment text.
    #[arg(long, required = true)]
    text: String,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Store the OMDb API key in config.toml.
    SetApiKey(SetApiKeyArgs),
    /// Print the effective configuration.
    Show,
}

/// Arguments for the `config set-api-key` subcommand.
#[derive(clap::Args)]
struct SetApiKeyArgs {
    /// OMDb API key.
    #[arg(long, required = true)]
    key: String,
}

/// Loads `config.toml` from `dir` (or the default location).
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds an OMDb client from the config and `OMDB_API_KEY`.
///
/// # Errors
///
/// Returns an error if no API key is configured, `base_url` is invalid,
/// or the client fails to build.
#[instrument(skip_all)]
fn build_omdb_client(config: &AppConfig) -> Result<OmdbClient> {
    let api_key = config.resolve_api_key(std::env::var(API_KEY_ENV).ok())?;

    let mut builder = OmdbClient::builder().api_key(api_key).user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(base_url) = config.omdb.base_url.as_deref() {
        let url = Url::parse(base_url)
            .with_context(|| format!("invalid [omdb] base_url: {base_url}"))?;
        builder = builder.base_url(url);
    }

    builder.build().context("failed to build OMDb client")
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if the client or store cannot be opened or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_omdb_client(&config)?;
    let conn = open_store(dir).context("failed to open annotation store")?;

    let mut browser = Browser::new(client, conn, config.pagination.window_size);
    tui::run_browser(&mut browser, args.query.as_deref().unwrap_or_default())
        .await
        .context("browser TUI failed")
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the client fails to
/// build. Failed lookups print "No movie found!" like an empty result.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_omdb_client(&config)?;

    let found = match client.search(&args.query, args.page).await {
        Ok(found) if !found.results.is_empty() => found,
        Ok(_) => {
            tracing::info!("{NO_MOVIE_FOUND}");
            return Ok(());
        }
        Err(e) => {
            if e.is_service() {
                tracing::debug!(error = %e, "OMDb reported no matches");
            } else {
                tracing::warn!(query = %args.query, error = %e, "Error fetching movies");
            }
            tracing::info!("{NO_MOVIE_FOUND}");
            return Ok(());
        }
    };

    tracing::info!("ID\t\tYear\t\tTitle");
    for item in &found.results {
        tracing::info!("{}\t{}\t\t{}", item.id, item.year, item.title);
    }

    let mut pagination = PaginationState::new(OMDB_PAGE_SIZE);
    pagination.set_total_results(found.total_results);
    if !pagination.go_to(args.page) {
        tracing::warn!(
            page = args.page,
            total_pages = pagination.total_pages(),
            "Requested page is past the last page"
        );
    }
    let window = pagination.window(config.pagination.window_size);
    let pages: Vec<String> = window
        .buttons
        .iter()
        .map(|b| {
            if b.enabled {
                b.page.to_string()
            } else {
                format!("[{}]", b.page)
            }
        })
        .collect();
    tracing::info!(
        "Page {} of {} ({} results): {}",
        pagination.current_page(),
        pagination.total_pages(),
        found.total_results,
        pages.join(" ")
    );

    Ok(())
}

/// Runs the `detail` subcommand.
///
/// # Errors
///
/// Returns an error if the client or store fails.
#[instrument(skip_all)]
async fn run_detail(args: &DetailArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_omdb_client(&config)?;

    let detail = client
        .detail(&args.id)
        .await
        .context("OMDb detail request failed")?;
    let conn = open_store(dir).context("failed to open annotation store")?;
    let annotations = load_annotations(&conn, &args.id)?;

    tracing::info!("{} ({})", detail.title, detail.year);
    tracing::info!("Rated: {}  Runtime: {}", detail.rated, detail.runtime);
    tracing::info!("Genre: {}", detail.genre);
    tracing::info!("Director: {}", detail.director);
    tracing::info!("Actors: {}", detail.actors);
    tracing::info!("IMDb rating: {}", detail.imdb_rating);
    tracing::info!("Plot: {}", detail.plot);
    tracing::info!(
        "Your rating: {}",
        annotations
            .rating
            .map_or_else(|| String::from("-"), |r| format!("{r}/{}", Rating::MAX))
    );
    if annotations.comments.is_empty() {
        tracing::info!("No comments yet.");
    } else {
        tracing::info!("Previous comments:");
        for comment in &annotations.comments {
            tracing::info!("  - {comment}");
        }
    }

    Ok(())
}

/// Runs the `rate` subcommand.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written.
#[instrument(skip_all)]
fn run_rate(args: &RateArgs, dir: Option<&PathBuf>) -> Result<()> {
    let rating = Rating::new(args.stars)
        .with_context(|| format!("stars must be between {} and {}", Rating::MIN, Rating::MAX))?;
    let conn = open_store(dir).context("failed to open annotation store")?;

    set_rating(&conn, &args.id, rating)?;
    tracing::info!("Rated {}: {}/{}", args.id, rating, Rating::MAX);

    Ok(())
}

/// Runs the `comment` subcommand.
///
/// # Errors
///
/// Returns an error if the text is blank or the store cannot be written.
#[instrument(skip_all)]
fn run_comment(args: &CommentArgs, dir: Option<&PathBuf>) -> Result<()> {
    let text = args.text.trim();
    anyhow::ensure!(!text.is_empty(), "comment text must not be empty");

    let conn = open_store(dir).context("failed to open annotation store")?;
    let comments = append_comment(&conn, &args.id, text)?;
    tracing::info!("Comment saved for {} ({} total)", args.id, comments.len());

    Ok(())
}

/// Runs the `config set-api-key` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be read or written.
#[instrument(skip_all)]
fn run_config_set_api_key(args: &SetApiKeyArgs, dir: Option<&PathBuf>) -> Result<()> {
    let key = args.key.trim();
    anyhow::ensure!(!key.is_empty(), "API key must not be empty");

    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let mut config = AppConfig::load(&config_path).context("failed to load config")?;
    config.omdb.api_key = Some(String::from(key));
    config.save(&config_path).context("failed to save config")?;

    tracing::info!("Saved API key to {}", config_path.display());
    Ok(())
}

/// Keys shorter than this are masked completely.
const MASK_MIN_REVEAL_LEN: usize = 8;

/// Masks `key`, revealing at most its last two characters.
fn mask_key(key: &str) -> String {
    let len = key.chars().count();
    if len < MASK_MIN_REVEAL_LEN {
        return String::from("****");
    }
    let visible: String = key.chars().skip(len.saturating_sub(2)).collect();
    format!("****{visible}")
}

/// Runs the `config show` subcommand.
///
/// # Errors
///
/// Returns an error if the config cannot be read.
#[instrument(skip_all)]
fn run_config_show(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    let config = AppConfig::load(&config_path).context("failed to load config")?;

    let env_key = std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.trim().is_empty());
    let api_key = match (&env_key, config.omdb.api_key.as_deref()) {
        (Some(key), _) => format!("{} (from {API_KEY_ENV})", mask_key(key)),
        (None, Some(key)) if !key.trim().is_empty() => mask_key(key),
        _ => String::from("(not set)"),
    };

    tracing::info!("Config file: {}", config_path.display());
    tracing::info!("API key: {api_key}");
    tracing::info!(
        "Base URL: {}",
        config
            .omdb
            .base_url
            .as_deref()
            .unwrap_or(cinesearch_api::omdb::OMDB_BASE_URL)
    );
    tracing::info!("Pagination window: {}", config.pagination.window_size);

    Ok(())
}

/// Picks the log destination: a file while the TUI owns the terminal,
/// stdout otherwise.
fn log_writer(command: &Commands, dir: Option<&PathBuf>) -> Result<BoxMakeWriter> {
    if !matches!(command, Commands::Browse(_)) {
        return Ok(BoxMakeWriter::new(std::io::stdout));
    }

    let log_path = resolve_log_path(dir).context("failed to resolve log path")?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Installs the global tracing subscriber.
fn init_tracing(writer: BoxMakeWriter) {
    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .with_target(false)
            .with_writer(writer)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(writer);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(log_writer(&cli.command, cli.dir.as_ref())?);

    match cli.command {
        Commands::Browse(args) => run_browse(&args, cli.dir.as_ref()).await,
        Commands::Search(args) => run_search(&args, cli.dir.as_ref()).await,
        Commands::Detail(args) => run_detail(&args, cli.dir.as_ref()).await,
        Commands::Rate(args) => run_rate(&args, cli.dir.as_ref()),
        Commands::Comment(args) => run_comment(&args, cli.dir.as_ref()),
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::SetApiKey(args) => run_config_set_api_key(&args, cli.dir.as_ref()),
            ConfigSubcommands::Show => run_config_show(cli.dir.as_ref()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_key() {
        // Arrange & Act & Assert
        assert_eq!(mask_key("abcdef123"), "****23");
        assert_eq!(mask_key("a1b2c3d4"), "****d4");
        assert_eq!(mask_key("abcd"), "****");
        assert_eq!(mask_key(""), "****");
    }
}
