mod config;
pub mod error;
mod flash;
mod forms;
mod routes;

pub use config::{AppConfig, ConfigError};
pub use routes::create_router as app;

use std::process::ExitCode;

use blogly_service::{
    sea_orm::{Database, DatabaseConnection},
    setup_schema,
};
use tera::Tera;
use tower_cookies::Key;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "info,sea_orm=debug,sqlx=warn";

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub templates: Tera,
    pub conn: DatabaseConnection,
    pub flash_key: Key,
}

impl AppState {
    pub fn new(conn: DatabaseConnection, flash_key: Key) -> Result<Self, tera::Error> {
        Ok(Self {
            templates: load_templates()?,
            conn,
            flash_key,
        })
    }
}

fn load_templates() -> Result<Tera, tera::Error> {
    let mut templates = Tera::new(concat!(env!("CARGO_MANIFEST_DIR"), "/templates/**/*"))?;
    templates.autoescape_on(vec![".html.tera"]);
    templates.set_escape_fn(escape_html);
    Ok(templates)
}

/// Tera's HTML escaping, minus the `/` escape, so URLs stay readable.
fn escape_html(input: &str) -> String {
    tera::escape_html(input).replace("&#x2F;", "/")
}

#[tokio::main]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config = AppConfig::from_env()?;
    info!(?config, "configuration loaded");

    let conn = Database::connect(&config.database_url).await?;
    setup_schema(&conn).await?;

    let state = AppState::new(conn, config.flash_key()?)?;
    let app = app(state);

    let listener = tokio::net::TcpListener::bind(config.server_url()).await?;
    info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn main() -> ExitCode {
    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
