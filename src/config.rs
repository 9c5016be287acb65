use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use url::Url;

use crate::error::AppError;

pub const DEFAULT_DB_PORT: u16 = 5432;
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Postgres connection settings read from `DB_*` environment variables.
///
/// The connection always requests TLS (`sslmode=require`), which encrypts
/// the transport without verifying the server certificate.
#[derive(Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
    pub logging: bool,
}

// Password stays out of logs
impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("name", &self.name)
            .field("user", &self.user)
            .field("password", &"***")
            .field("logging", &self.logging)
            .finish()
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| AppError::Config(format!("{} must be set", key)))
        };

        let port = match lookup("DB_PORT").filter(|v| !v.is_empty()) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AppError::Config(format!("DB_PORT is not a valid port: {}", raw)))?,
            None => DEFAULT_DB_PORT,
        };

        let logging = match lookup("DB_LOGGING").as_deref() {
            None | Some("") | Some("1") | Some("true") => true,
            Some("0") | Some("false") => false,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "DB_LOGGING must be true or false, got {}",
                    other
                )))
            }
        };

        Ok(Self {
            host: required("DB_HOST")?,
            port,
            name: required("DB_NAME")?,
            user: required("DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            logging,
        })
    }

    /// Connection URL with credentials percent-encoded and TLS required.
    pub fn url(&self) -> Result<Url, AppError> {
        let mut url = Url::parse(&format!("postgres://{}", self.host))
            .map_err(|e| AppError::Config(format!("invalid DB_HOST {}: {}", self.host, e)))?;
        let invalid = |_| AppError::Config("database URL cannot carry credentials".to_string());
        url.set_port(Some(self.port)).map_err(invalid)?;
        url.set_username(&self.user).map_err(invalid)?;
        if !self.password.is_empty() {
            url.set_password(Some(&self.password)).map_err(invalid)?;
        }
        url.set_path(&self.name);
        url.query_pairs_mut().append_pair("sslmode", "require");
        Ok(url)
    }

    pub fn connect_options(&self) -> Result<ConnectOptions, AppError> {
        let mut options = ConnectOptions::new(self.url()?.to_string());
        options
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(self.logging);
        Ok(options)
    }

    pub async fn connect(&self) -> Result<DatabaseConnection, AppError> {
        tracing::info!(host = %self.host, port = self.port, db = %self.name, "Connecting to database");
        let conn = Database::connect(self.connect_options()?).await?;
        Ok(conn)
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw
            .parse()
            .map_err(|_| AppError::Config(format!("BIND_ADDR is not a socket address: {}", raw)))?;
        Ok(Self { bind_addr })
    }
}
