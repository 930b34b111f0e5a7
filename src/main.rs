use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use medal_insights::api::state::AppState;
use medal_insights::api::{build_router, cors_layer};
use medal_insights::calculate::{self, AnalyticsError, DisciplineSet};
use medal_insights::config::AppConfig;
use medal_insights::models::Orientation;
use medal_insights::storage::{self, JsonlWriter};
use medal_insights::store::{Catalog, RecordFilter, RecordStore};

#[derive(Parser)]
#[command(name = "medal-insights")]
#[command(about = "Olympic medal analytics over a historical medal table")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Dataset path (overrides the config file)
    #[arg(long)]
    dataset: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); defaults to the config value
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Normalize a CSV medal table into JSONL
    Normalize {
        /// Source CSV file
        #[arg(long)]
        input: PathBuf,

        /// Destination JSONL file
        #[arg(long)]
        output: PathBuf,
    },

    /// Run one analytic and print the result as JSON
    Query {
        #[command(subcommand)]
        analytic: Analytic,
    },

    /// List distinct values of the dataset
    List {
        #[arg(value_enum)]
        kind: CatalogArg,
    },
}

#[derive(Subcommand)]
enum Analytic {
    /// Most participated discipline and led disciplines of a country
    Profile { country: String },

    /// Discipline with the most medal rows for a country
    MostParticipated { country: String },

    /// Disciplines where the country has the most medals
    BestDisciplines { country: String },

    /// Per-game medal totals of a country in a discipline
    Trajectory {
        country: String,
        discipline: String,

        /// Split each game by medal type
        #[arg(long, conflicts_with = "dense")]
        by_medal_type: bool,

        /// Include games without a medal as zero
        #[arg(long)]
        dense: bool,
    },

    /// Two countries side by side in a discipline (shared games only)
    Compare {
        country1: String,
        country2: String,
        discipline: String,
    },

    /// Per-game medal tally of an athlete
    Tally { athlete: String },

    /// Two athletes side by side
    CompareAthletes { athlete1: String, athlete2: String },

    /// Disciplines by gender orientation
    Gender {
        /// Only one partition: Balanced, Male-Oriented or Female-Oriented
        #[arg(long)]
        orientation: Option<String>,
    },

    /// Total medals per country
    GeoTotals,

    /// Medals per country split by type
    GeoMedals,

    /// Medals per country across a discipline set
    TopDisciplines {
        /// Comma-separated disciplines (defaults to the configured set)
        #[arg(long, value_delimiter = ',')]
        disciplines: Vec<String>,
    },

    /// Raw medal rows filtered by exact values
    Records {
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        discipline: Option<String>,
        #[arg(long)]
        athlete: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum CatalogArg {
    Countries,
    Disciplines,
    Athletes,
    Games,
}

impl From<CatalogArg> for Catalog {
    fn from(arg: CatalogArg) -> Self {
        match arg {
            CatalogArg::Countries => Catalog::Countries,
            CatalogArg::Disciplines => Catalog::Disciplines,
            CatalogArg::Athletes => Catalog::Athletes,
            CatalogArg::Games => Catalog::Games,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    if let Some(dataset) = cli.dataset.clone() {
        config.dataset.path = dataset;
    }

    // Initialize tracing; stdout is reserved for query output
    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::info!("Starting medal-insights v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let store = load_store(&config)?;
            let state = AppState::new(store, config.analytics.top_disciplines.clone());
            let app = build_router(state).layer(cors_layer(&config.server.cors_origin)?);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;
            tracing::info!("API: http://{}/api", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Normalize { input, output } => {
            let normalizer = config.normalization.normalizer();
            let records = storage::load_records(&input, Some(storage::DatasetFormat::Csv), &normalizer)
                .with_context(|| format!("Failed to read {:?}", input))?;
            let count = JsonlWriter::new(output.clone()).write_all(&records)?;

            println!("Normalized {} medal records into {}", count, output.display());
        }
        Commands::Query { analytic } => {
            let store = load_store(&config)?;
            run_query(&store, &config, analytic)?;
        }
        Commands::List { kind } => {
            let store = load_store(&config)?;
            for item in store.catalog(kind.into()) {
                println!("{}", item);
            }
        }
    }

    Ok(())
}

fn load_store(config: &AppConfig) -> Result<RecordStore> {
    let store = storage::load_store(
        &config.dataset.path,
        config.dataset.format,
        config.dataset.game_order,
        &config.normalization.normalizer(),
    )
    .with_context(|| format!("Failed to load dataset {:?}", config.dataset.path))?;
    Ok(store)
}

fn run_query(store: &RecordStore, config: &AppConfig, analytic: Analytic) -> Result<()> {
    match analytic {
        Analytic::Profile { country } => emit(calculate::country_profile(store, &country)),
        Analytic::MostParticipated { country } => {
            emit(calculate::most_participated_discipline(store, &country))
        }
        Analytic::BestDisciplines { country } => {
            emit(calculate::best_medal_disciplines(store, &country))
        }
        Analytic::Trajectory {
            country,
            discipline,
            by_medal_type,
            dense,
        } => {
            if by_medal_type {
                emit(calculate::trajectory_by_medal_type(
                    store,
                    &country,
                    &discipline,
                ))
            } else {
                emit(
                    calculate::trajectory(store, &country, &discipline).map(|points| {
                        if dense {
                            calculate::reindex(&points, store.games())
                        } else {
                            points
                        }
                    }),
                )
            }
        }
        Analytic::Compare {
            country1,
            country2,
            discipline,
        } => emit(calculate::compare(store, &country1, &country2, &discipline)),
        Analytic::Tally { athlete } => emit(Ok(calculate::athlete_tally(store, &athlete))),
        Analytic::CompareAthletes { athlete1, athlete2 } => emit(Ok(
            calculate::compare_athletes(store, &athlete1, &athlete2),
        )),
        Analytic::Gender { orientation } => {
            let filter = orientation
                .map(|o| o.parse::<Orientation>())
                .transpose()
                .map_err(AnalyticsError::from)?;
            match (filter, calculate::gender_orientation(store)) {
                (Some(o), Ok(report)) => emit(Ok(report.partition(o))),
                (_, report) => emit(report),
            }
        }
        Analytic::GeoTotals => emit(calculate::total_medals_by_country(store)),
        Analytic::GeoMedals => emit(calculate::medals_by_type_and_country(store)),
        Analytic::TopDisciplines { disciplines } => {
            let set = if disciplines.is_empty() {
                config.analytics.top_disciplines.clone()
            } else {
                DisciplineSet::new(disciplines)
            };
            emit(calculate::top_disciplines_by_country(store, &set))
        }
        Analytic::Records {
            country,
            discipline,
            athlete,
        } => {
            let filter = RecordFilter {
                country,
                discipline,
                athlete,
            };
            emit(Ok(store.filter(&filter)))
        }
    }
}

/// Print a result as pretty JSON. An empty result is reported, not failed.
fn emit<T: Serialize>(result: Result<T, AnalyticsError>) -> Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) if e.is_empty_result() => {
            println!("No data to display ({})", e);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
