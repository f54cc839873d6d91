//! Application-level configuration loading: database location, listen address and SQLite tuning.

use std::{
    env, fs,
    io::ErrorKind,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};

use serde::Deserialize;
use tracing::{info, warn};

use crate::dao::game_state_store::sqlite::{DEFAULT_BUSY_TIMEOUT, SqliteConfig, SqliteResult};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "SHATTERED_REALMS_CONFIG_PATH";
/// Local file-backed database used when nothing else is configured.
const DEFAULT_DATABASE_URL: &str = "sqlite:///game.db";
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    database_url: String,
    host: IpAddr,
    port: u16,
    busy_timeout: Duration,
}

impl AppConfig {
    /// Load the configuration file (if any), then apply environment overrides.
    pub fn load() -> Self {
        let file_config = read_config_file();
        Self::from_sources(file_config, |key| env::var(key).ok())
    }

    /// Combine an optional file configuration with environment lookups.
    ///
    /// Environment values win over file values, which win over built-in defaults.
    /// Unparsable values are ignored with a warning.
    pub fn from_sources<E>(file: Option<RawConfig>, env_lookup: E) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = file {
            if let Some(url) = raw.database_url {
                config.database_url = url;
            }
            if let Some(host) = raw.host {
                config.host = host;
            }
            if let Some(port) = raw.port {
                config.port = port;
            }
            if let Some(ms) = raw.busy_timeout_ms {
                config.busy_timeout = Duration::from_millis(ms);
            }
        }

        if let Some(url) = env_lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            config.database_url = url;
        }
        if let Some(host) = parse_env(&env_lookup, "HOST") {
            config.host = host;
        }
        if let Some(port) =
            parse_env(&env_lookup, "PORT").or_else(|| parse_env(&env_lookup, "SERVER_PORT"))
        {
            config.port = port;
        }
        if let Some(ms) = parse_env::<u64, _>(&env_lookup, "DATABASE_BUSY_TIMEOUT_MS") {
            config.busy_timeout = Duration::from_millis(ms);
        }

        config
    }

    /// Connection string of the backing database.
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Address the HTTP server binds to.
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Resolve the database URL into a SQLite store configuration.
    pub fn sqlite_config(&self) -> SqliteResult<SqliteConfig> {
        Ok(SqliteConfig::from_url(&self.database_url)?.with_busy_timeout(self.busy_timeout))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            busy_timeout: DEFAULT_BUSY_TIMEOUT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
pub struct RawConfig {
    database_url: Option<String>,
    host: Option<IpAddr>,
    port: Option<u16>,
    busy_timeout_ms: Option<u64>,
}

fn parse_env<T, E>(env_lookup: &E, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    E: Fn(&str) -> Option<String>,
{
    let value = env_lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!(key, value = %value, "ignoring unparsable environment override");
            None
        }
    }
}

/// Read and parse the configuration file, falling back to `None` on any problem.
fn read_config_file() -> Option<RawConfig> {
    let path = resolve_config_path();
    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                info!(path = %path.display(), "loaded configuration file");
                Some(raw)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse config; falling back to defaults"
                );
                None
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "config file not found; using built-in defaults"
            );
            None
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read config; falling back to defaults"
            );
            None
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, path::Path};

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_game_db() {
        let config = AppConfig::from_sources(None, lookup(&[]));
        assert_eq!(config.database_url(), "sqlite:///game.db");
        assert_eq!(config.listen_addr(), "127.0.0.1:5000".parse().unwrap());

        let sqlite = config.sqlite_config().unwrap();
        assert_eq!(sqlite.path, Path::new("game.db"));
        assert_eq!(sqlite.busy_timeout, DEFAULT_BUSY_TIMEOUT);
    }

    #[test]
    fn file_values_override_defaults() {
        let raw: RawConfig = serde_json::from_str(
            r#"{"database_url": "sqlite:///saves/realm.db", "port": 8080, "busy_timeout_ms": 250}"#,
        )
        .unwrap();
        let config = AppConfig::from_sources(Some(raw), lookup(&[]));

        assert_eq!(config.listen_addr().port(), 8080);
        let sqlite = config.sqlite_config().unwrap();
        assert_eq!(sqlite.path, Path::new("saves/realm.db"));
        assert_eq!(sqlite.busy_timeout, Duration::from_millis(250));
    }

    #[test]
    fn environment_overrides_file() {
        let raw: RawConfig =
            serde_json::from_str(r#"{"database_url": "sqlite:///file.db", "port": 8080}"#).unwrap();
        let config = AppConfig::from_sources(
            Some(raw),
            lookup(&[
                ("DATABASE_URL", "sqlite:///env.db"),
                ("HOST", "0.0.0.0"),
                ("SERVER_PORT", "9000"),
            ]),
        );

        assert_eq!(config.database_url(), "sqlite:///env.db");
        assert_eq!(config.listen_addr(), "0.0.0.0:9000".parse().unwrap());
    }

    #[test]
    fn port_takes_precedence_over_server_port() {
        let config =
            AppConfig::from_sources(None, lookup(&[("PORT", "7000"), ("SERVER_PORT", "9000")]));
        assert_eq!(config.listen_addr().port(), 7000);
    }

    #[test]
    fn unparsable_overrides_are_ignored() {
        let config = AppConfig::from_sources(
            None,
            lookup(&[("PORT", "not-a-port"), ("DATABASE_URL", "  ")]),
        );
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn in_memory_database_is_rejected() {
        let config = AppConfig::from_sources(None, lookup(&[("DATABASE_URL", ":memory:")]));
        assert!(config.sqlite_config().is_err());
    }
}
