//! Depot CLI - session, validation and import tools for the warehouse admin.
//!
//! # Usage
//!
//! ```bash
//! # Sign in against DEPOT_API_URL
//! depot login -e manager@depot.example
//!
//! # Check the stored session as a page load at /orders would
//! depot status --path /orders
//!
//! # Validate an order draft against the selectable warehouses
//! depot validate order draft.yaml -w "Casablanca North" -w "Rabat Port"
//!
//! # Queue a spreadsheet import
//! depot import stock.xlsx --kind products
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` / `whoami` / `status` - Session management
//! - `validate` - Check order, shipment, product, warehouse or user drafts
//! - `import` - Submit an Excel workbook to the (mock) import backend

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use secrecy::ExposeSecret;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use depot_admin::import::ImportKind;
use depot_admin::{AdminConfig, ApiClient, ConfigError, FileStore, MockImportBackend, SessionManager};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "depot")]
#[command(author, version, about = "Depot warehouse admin CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (falls back to `DEPOT_PASSWORD`)
        #[arg(short, long)]
        password: Option<String>,
    },
    /// Clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Reconcile the stored session for a page path
    Status {
        /// Path of the page being loaded
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Validate a draft read from a YAML or JSON file
    Validate {
        #[command(subcommand)]
        target: ValidateTarget,
    },
    /// Submit an Excel workbook for import
    Import {
        /// Workbook path (.xlsx or .xls)
        file: PathBuf,

        /// Records in the workbook (`orders`, `products`, `warehouses`, `shipments`)
        #[arg(short, long)]
        kind: ImportKind,
    },
}

#[derive(Subcommand)]
enum ValidateTarget {
    /// Validate an order draft
    Order {
        /// Draft file
        file: PathBuf,

        /// Existing order the draft edits
        #[arg(long)]
        original: Option<PathBuf>,

        /// Selectable warehouse name (repeatable)
        #[arg(short, long = "warehouse")]
        warehouses: Vec<String>,
    },
    /// Validate a shipment draft
    Shipment {
        /// Draft file
        file: PathBuf,

        /// Selectable warehouse name (repeatable)
        #[arg(short, long = "warehouse")]
        warehouses: Vec<String>,
    },
    /// Validate a product draft
    Product {
        /// Draft file
        file: PathBuf,
    },
    /// Validate a warehouse draft
    Warehouse {
        /// Draft file
        file: PathBuf,
    },
    /// Validate a user draft
    User {
        /// Draft file
        file: PathBuf,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &AdminConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.expose_secret(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "depot_cli=info,depot_admin=info".into());

    // JSON for log shippers, text for terminals
    let json = std::env::var("DEPOT_LOG_JSON").is_ok();
    let json_layer = json.then(|| tracing_subscriber::fmt::layer().json().flatten_event(true));
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_target(false));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    // Validation works without an API, so a config error only surfaces
    // for commands that need one.
    let config = AdminConfig::from_env();
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);

    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli, config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Session manager over the configured API and session file.
fn session_manager(
    config: Result<AdminConfig, ConfigError>,
) -> Result<SessionManager<FileStore>, ConfigError> {
    let config = config?;
    Ok(SessionManager::new(
        ApiClient::new(config.api_url.clone()),
        FileStore::new(&config.session_file),
        config.session_paths(),
    ))
}

async fn run(cli: Cli, config: Result<AdminConfig, ConfigError>) -> Result<(), CliError> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::session::login(&session_manager(config)?, &email, password).await
        }
        Commands::Logout => commands::session::logout(&session_manager(config)?),
        Commands::Whoami => commands::session::whoami(&session_manager(config)?),
        Commands::Status { path } => commands::session::status(&session_manager(config)?, &path),
        Commands::Validate { target } => match target {
            ValidateTarget::Order {
                file,
                original,
                warehouses,
            } => commands::validate::order(&file, original.as_deref(), &warehouses).await,
            ValidateTarget::Shipment { file, warehouses } => {
                commands::validate::shipment(&file, &warehouses).await
            }
            ValidateTarget::Product { file } => commands::validate::product(&file).await,
            ValidateTarget::Warehouse { file } => commands::validate::warehouse(&file).await,
            ValidateTarget::User { file } => commands::validate::user(&file).await,
        },
        Commands::Import { file, kind } => {
            commands::import::submit(&session_manager(config)?, &MockImportBackend, &file, kind)
        }
    }
}
