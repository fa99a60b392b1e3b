use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use duels_dashboard::api::{build_router, state::AppState};
use duels_dashboard::calculate;
use duels_dashboard::config::AppConfig;
use duels_dashboard::lookup;
use duels_dashboard::models::{StatsRecord, StatsSchema};
use duels_dashboard::present;

#[derive(Parser)]
#[command(name = "duels-dashboard")]
#[command(about = "Derived Duels statistics from game API player data")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Schema file (overrides the config and the built-in schema)
    #[arg(long)]
    schema: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive stats from a stats or player JSON file ("-" for stdin)
    Derive {
        input: String,

        /// Dotted path of the stats object inside the document
        #[arg(long)]
        path: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Render the dashboard card for a stats or player JSON file
    View {
        input: String,

        /// Dotted path of the stats object inside the document
        #[arg(long)]
        path: Option<String>,

        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the active schema as TOML
    Schema,

    /// Resolve the rank of a player JSON file
    Rank { input: String },

    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {}", cli.config.display()))?;

    // Initialize tracing
    let log_level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Starting duels-dashboard v{}", env!("CARGO_PKG_VERSION"));

    let schema = match &cli.schema {
        Some(path) => StatsSchema::from_file(path)
            .with_context(|| format!("Failed to load schema {}", path.display()))?,
        None => config.load_schema()?,
    };

    match cli.command {
        Commands::Derive {
            input,
            path,
            format,
        } => {
            let record = read_record(&input, path.as_deref(), &config)?;
            let report = calculate::build_report(&record, &schema);
            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                OutputFormat::Text => {
                    let stats = &report.stats;
                    println!("\n=== {} Stats ===", schema.title);
                    println!("Division:         {}", stats.division_label);
                    println!("Kills:            {}", stats.total_kills);
                    println!("Deaths:           {}", stats.total_deaths);
                    println!("K/D:              {}", present::format_ratio(stats.kill_death_ratio));
                    println!("W/L:              {}", present::format_ratio(stats.win_loss_ratio));
                    println!("Melee accuracy:   {}", present::format_percentage(stats.melee_accuracy));
                    println!("Arrow accuracy:   {}", present::format_percentage(stats.arrow_accuracy));
                    println!("Most played:      {}", stats.most_played_mode_name);
                }
            }
        }
        Commands::View {
            input,
            path,
            format,
        } => {
            let record = read_record(&input, path.as_deref(), &config)?;
            let view = present::build_view(&record, &schema);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
                OutputFormat::Text => print!("{}", present::render_text(&view)),
            }
        }
        Commands::Schema => {
            print!("{}", toml::to_string_pretty(&schema)?);
        }
        Commands::Rank { input } => {
            let document = read_document(&input)?;
            println!(
                "{}",
                lookup::player_rank_from_value(lookup::player_object(&document))
            );
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let state = AppState::new(schema, &config.stats_path, &config.server.cors_origin);
            let app = build_router(state);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("Dashboard API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}

fn read_document(input: &str) -> Result<Value> {
    let contents = if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(Path::new(input))
            .with_context(|| format!("Failed to read {}", input))?
    };

    if contents.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&contents).with_context(|| format!("Invalid JSON in {}", input))
}

fn read_record(input: &str, path: Option<&str>, config: &AppConfig) -> Result<StatsRecord> {
    let document = read_document(input)?;
    let record = StatsRecord::from_document(document, path, &config.stats_path);
    tracing::info!("Read {} stat fields from {}", record.len(), input);
    Ok(record)
}
