use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use app_directory::catalog::filter::FilterCriteria;
use app_directory::config::Config;
use app_directory::domain::{CatalogEntry, Category, Platform, Submission, UrlType};
use app_directory::error::CatalogError;
use app_directory::logging;
use app_directory::metrics;
use app_directory::seed::{seed_sample_apps, SAMPLE_APPS};
use app_directory::server::{start_server, AppState};
use app_directory::service::CatalogService;
use app_directory::storage::{AirtableStore, CatalogStore, InMemoryStore};

#[derive(Parser)]
#[command(name = "app_directory")]
#[command(about = "Curated directory of free iOS and macOS apps")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to a TOML config file (defaults to ./catalog.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Use an in-memory store preloaded with the sample catalog instead of Airtable
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the JSON API
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,
        /// Port for the Prometheus exporter
        #[arg(long)]
        metrics_port: Option<u16>,
    },
    /// List published apps, optionally filtered
    List(ListArgs),
    /// Show one app by slug with related apps
    Show { slug: String },
    /// Show every category with its app count
    Categories,
    /// Submit an app for review
    Submit(SubmitArgs),
    /// Write the sample catalog to the store
    Seed,
}

#[derive(Args)]
struct ListArgs {
    /// Category id, e.g. productivity
    #[arg(long)]
    category: Option<Category>,
    /// Platforms (comma-separated): iOS, macOS, Web
    #[arg(long, value_delimiter = ',')]
    platforms: Vec<Platform>,
    /// URL types (comma-separated): App Store, GitHub, Website, Direct Download
    #[arg(long, value_delimiter = ',')]
    url_types: Vec<UrlType>,
    /// Case-insensitive text search over names, descriptions and tags
    #[arg(long, short)]
    query: Option<String>,
}

#[derive(Args)]
struct SubmitArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    url: String,
    #[arg(long)]
    description: String,
    /// Why the app deserves a place in the directory
    #[arg(long)]
    why: String,
    #[arg(long)]
    email: String,
    #[arg(long, value_delimiter = ',')]
    platforms: Vec<Platform>,
    #[arg(long)]
    submitter: Option<String>,
}

fn build_store(config: &Config, memory: bool) -> anyhow::Result<Arc<dyn CatalogStore>> {
    if memory {
        info!("Using in-memory store");
        return Ok(Arc::new(InMemoryStore::new()));
    }
    config.validate_store()?;
    Ok(Arc::new(AirtableStore::new(&config.store)?))
}

fn print_entry(entry: &CatalogEntry) {
    let platforms: Vec<&str> = entry.platforms.iter().map(Platform::as_str).collect();
    println!(
        "{} {:<28} {:<14} [{}] {}",
        entry.category.info().emoji,
        entry.name,
        entry.category.as_str(),
        platforms.join(", "),
        entry.short_description
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load(cli.config.as_deref())?;

    let _guard = logging::init_logging(&config.logging.dir);

    let store = build_store(&config, cli.memory)?;
    if cli.memory && !matches!(cli.command, Commands::Seed) {
        seed_sample_apps(store.as_ref()).await;
    }
    let service = CatalogService::new(store.clone(), config.cache.ttl());

    match cli.command {
        Commands::Serve { port, metrics_port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(port) = metrics_port.or(config.server.metrics_port) {
                metrics::init_metrics(port);
            }
            info!("Starting app directory on port {}", config.server.port);
            let state = AppState::new(service, config.server.admin_token.clone());
            start_server(state, config.server.port).await?;
        }
        Commands::List(args) => {
            let criteria = FilterCriteria {
                platforms: (!args.platforms.is_empty()).then_some(args.platforms),
                url_types: (!args.url_types.is_empty()).then_some(args.url_types),
                search_query: args.query,
            };
            let apps = service.filter(args.category, &criteria).await;
            for entry in &apps {
                print_entry(entry);
            }
            println!("\n{} apps", apps.len());
        }
        Commands::Show { slug } => match service.find_by_slug(&slug).await {
            Some(app) => {
                let info = app.category.info();
                println!("{} {}", info.emoji, app.name);
                println!("   Category: {}", info.name);
                println!("   URL: {} ({})", app.primary_url, app.url_type);
                println!("   {}", app.short_description);
                if !app.tags.is_empty() {
                    println!("   Tags: {}", app.tags.join(", "));
                }
                if let Some(notes) = &app.installation_notes {
                    println!("   Installation: {}", notes);
                }
                if let Some(date) = app.last_verified {
                    println!(
                        "   Last verified: {} by {}",
                        date,
                        app.verified_by.as_deref().unwrap_or("unknown")
                    );
                }
                let related = service.related(&app).await;
                if !related.is_empty() {
                    println!("\nRelated:");
                    for entry in &related {
                        print_entry(entry);
                    }
                }
            }
            None => {
                error!("No published app with slug '{}'", slug);
                return Err(CatalogError::NotFound(format!("app '{slug}'")).into());
            }
        },
        Commands::Categories => {
            for (category, count) in service.category_counts().await {
                let info = category.info();
                println!("{} {:<16} {:>3}  {}", info.emoji, info.name, count, info.description);
            }
        }
        Commands::Submit(args) => {
            let submission = Submission {
                app_name: args.name,
                url: args.url,
                short_description: args.description,
                why_great: args.why,
                email: args.email,
                platform: (!args.platforms.is_empty()).then_some(args.platforms),
                submitter_name: args.submitter,
            };
            if let Err(e) = submission.validate() {
                anyhow::bail!("{e}");
            }
            if service.submit(&submission).await {
                println!("✅ Submitted {} for review", submission.app_name);
            } else {
                anyhow::bail!("Submission failed, see logs for details");
            }
        }
        Commands::Seed => {
            println!("🌱 Seeding {} sample apps...", SAMPLE_APPS.len());
            let report = seed_sample_apps(store.as_ref()).await;
            println!(
                "Added {}, skipped {}, failed {}",
                report.added, report.skipped, report.failed
            );
        }
    }

    Ok(())
}
