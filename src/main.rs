use anyhow::Context;
use donatedesk::config::{DatabaseConfig, ServerConfig};
use donatedesk::{create_app, AppState};
use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::DatabaseConnection;
use std::env;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialise tracing (INFO level)
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    // Load .env (if present) so DB_* settings from file are visible
    let _ = dotenv();

    let args: Vec<String> = env::args().collect();
    let migrate = args.iter().any(|a| a == "--migrate");

    // Database is optional for local runs; DB_HOST decides
    let db_conn: Option<DatabaseConnection> = if env::var("DB_HOST").is_ok() {
        let config = DatabaseConfig::from_env()?;
        match config.connect().await {
            Ok(conn) => Some(conn),
            Err(e) => {
                error!(%e, "failed to connect to database");
                None
            }
        }
    } else {
        info!("DB_HOST not set; continuing without DB");
        None
    };

    if migrate {
        let conn = db_conn
            .as_ref()
            .context("--migrate needs a reachable database")?;
        Migrator::up(conn, None).await.context("applying migrations")?;
        info!("Migrations applied");
    }

    let server = ServerConfig::from_env()?;
    let app = create_app(AppState::new(db_conn));
    let listener = tokio::net::TcpListener::bind(server.bind_addr)
        .await
        .with_context(|| format!("binding {}", server.bind_addr))?;
    info!("Server running on http://{}", server.bind_addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
