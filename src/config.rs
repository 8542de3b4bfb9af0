use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_options: PgConnectOptions,
    pub server_addr: String,
    pub db_max_connections: u32,

    pub api_prefix: String,
    pub log_dir: String,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            db_options: db_options()?,
            server_addr: env::var("SERVER_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", 5)?,
            api_prefix: env::var("API_PREFIX").unwrap_or_default(),
            log_dir: env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string()),
            run_migrations: parse_or("RUN_MIGRATIONS", false)?,
        })
    }
}

/// `DATABASE_URL` wins; otherwise the options come from the `RP_*` settings.
fn db_options() -> Result<PgConnectOptions> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return PgConnectOptions::from_str(&url).context("DATABASE_URL is not a valid postgres URL");
    }

    let host = env::var("RP_HOST").context("DATABASE_URL or RP_HOST must be set")?;
    let database = env::var("RP_DATABASE").context("RP_DATABASE must be set")?;
    let username = env::var("RP_USERNAME").context("RP_USERNAME must be set")?;
    let password = env::var("RP_PASSWORD").context("RP_PASSWORD must be set")?;

    store_options(&host, &database, &username, &password)
}

/// `host` may carry a port as `host:port`.
fn store_options(host: &str, database: &str, username: &str, password: &str) -> Result<PgConnectOptions> {
    let options = match host.rsplit_once(':') {
        Some((name, port)) => {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("RP_HOST has an invalid port: {host}"))?;
            PgConnectOptions::new().host(name).port(port)
        }
        None => PgConnectOptions::new().host(host),
    };

    Ok(options.database(database).username(username).password(password))
}

fn parse_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn host_and_port_from_store_settings() {
        let options = store_options("db.internal:6543", "hr", "svc", "s3cret").unwrap();

        assert_eq!(options.get_host(), "db.internal");
        assert_eq!(options.get_port(), 6543);
        assert_eq!(options.get_database(), Some("hr"));
        assert_eq!(options.get_username(), "svc");
    }

    #[test]
    fn settings_are_taken_verbatim() {
        let options = store_options("localhost", "hr/archive ?2024", "svc@corp", "p:ss/w#rd").unwrap();

        assert_eq!(options.get_host(), "localhost");
        assert_eq!(options.get_database(), Some("hr/archive ?2024"));
        assert_eq!(options.get_username(), "svc@corp");
    }

    #[test]
    fn bad_port_is_reported() {
        let err = store_options("localhost:pg", "hr", "svc", "s3cret").unwrap_err();
        assert!(err.to_string().contains("RP_HOST"));
    }

    #[test]
    fn unset_values_fall_back_to_default() {
        let value: u32 = parse_or("USER_STATUS_TEST_SURELY_UNSET", 5).unwrap();
        assert_eq!(value, 5);
    }
}
