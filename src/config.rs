//! Process configuration, built once at startup from the environment.

use crate::error::ConfigError;
use sqlx::postgres::PgConnectOptions;
use std::fmt;
use std::str::FromStr;

const DEFAULT_DB_USER: &str = "postgres";
const DEFAULT_DB_HOST: &str = "localhost";
const DEFAULT_DB_PORT: u16 = 5432;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Database used outside test mode.
pub const DATABASE_NAME: &str = "books";
/// Database selected when `APP_ENV=test`.
pub const TEST_DATABASE_NAME: &str = "books_test";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
}

#[derive(Clone)]
pub struct Config {
    pub environment: Environment,
    pub connect_options: PgConnectOptions,
    /// Create the target database at startup when it is missing.
    pub create_database: bool,
    pub max_connections: u32,
    pub bind_addr: String,
}

impl Config {
    /// Read from process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `DATABASE_URL` wins outside test mode; otherwise the
    /// connection is assembled from `DB_USER`, `DB_HOST`, `DB_PORT` and the secret.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("test") => Environment::Test,
            _ => Environment::Development,
        };

        let explicit_url = lookup("DATABASE_URL").filter(|s| !s.trim().is_empty());
        let connect_options = match (environment, explicit_url) {
            (Environment::Development, Some(url)) => PgConnectOptions::from_str(url.trim())
                .map_err(|source| ConfigError::InvalidUrl { source })?,
            (env, _) => {
                let port = match lookup("DB_PORT") {
                    Some(v) => v.trim().parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                        key: "DB_PORT",
                        value: v,
                    })?,
                    None => DEFAULT_DB_PORT,
                };
                let database = match env {
                    Environment::Test => TEST_DATABASE_NAME,
                    Environment::Development => DATABASE_NAME,
                };
                PgConnectOptions::new_without_pgpass()
                    .host(&lookup("DB_HOST").unwrap_or_else(|| DEFAULT_DB_HOST.into()))
                    .port(port)
                    .username(&lookup("DB_USER").unwrap_or_else(|| DEFAULT_DB_USER.into()))
                    .password(&read_secret(&lookup)?)
                    .database(database)
            }
        };

        let create_database = match lookup("DB_CREATE_DATABASE") {
            Some(v) => parse_flag(&v).ok_or(ConfigError::InvalidValue {
                key: "DB_CREATE_DATABASE",
                value: v,
            })?,
            None => environment == Environment::Test,
        };

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::InvalidValue {
                    key: "DATABASE_MAX_CONNECTIONS",
                    value: v,
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Config {
            environment,
            connect_options,
            create_database,
            max_connections,
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
        })
    }

    pub fn is_test(&self) -> bool {
        self.environment == Environment::Test
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opts = &self.connect_options;
        f.debug_struct("Config")
            .field("environment", &self.environment)
            .field("host", &opts.get_host())
            .field("port", &opts.get_port())
            .field("username", &opts.get_username())
            .field("database", &opts.get_database())
            .field("create_database", &self.create_database)
            .field("max_connections", &self.max_connections)
            .field("bind_addr", &self.bind_addr)
            .finish()
    }
}

/// `DB_PASSWORD` if set, else the trimmed contents of `DB_PASSWORD_FILE`.
fn read_secret<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(p) = lookup("DB_PASSWORD").filter(|p| !p.is_empty()) {
        return Ok(p);
    }
    let path = lookup("DB_PASSWORD_FILE").ok_or(ConfigError::MissingSecret)?;
    let raw = std::fs::read_to_string(&path).map_err(|source| ConfigError::SecretFile { path, source })?;
    let secret = raw.trim();
    if secret.is_empty() {
        return Err(ConfigError::MissingSecret);
    }
    Ok(secret.to_string())
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
