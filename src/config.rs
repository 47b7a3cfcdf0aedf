use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub rental: RentalConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalConfig {
    /// How long a rental stays watchable after checkout.
    pub duration_hours: i64,
    pub currency: String,
}

impl Default for RentalConfig {
    fn default() -> Self {
        Self {
            duration_hours: 48,
            currency: "LAK".to_string(),
        }
    }
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout_secs() -> u64 {
    8
}

fn get_env(name: &str) -> Option<String> {
    env::var(name).ok()
}

fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // No file: everything comes from the environment.
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                        min_connections: get_env_parse(
                            "DB_MIN_CONNECTIONS",
                            default_min_connections(),
                        ),
                        connect_timeout_secs: get_env_parse(
                            "DB_CONNECT_TIMEOUT_SECS",
                            default_connect_timeout_secs(),
                        ),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                    },
                    rental: RentalConfig {
                        duration_hours: get_env_parse(
                            "RENTAL_DURATION_HOURS",
                            RentalConfig::default().duration_hours,
                        ),
                        currency: get_env("RENTAL_CURRENCY")
                            .unwrap_or_else(|| RentalConfig::default().currency),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    /// Environment variables win over values read from the file.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(v) = get_env("SERVER_PORT").and_then(|v| v.parse().ok()) {
            self.server.port = v;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Some(v) = get_env("DB_MAX_CONNECTIONS").and_then(|v| v.parse().ok()) {
            self.database.max_connections = v;
        }
        if let Some(v) = get_env("DB_MIN_CONNECTIONS").and_then(|v| v.parse().ok()) {
            self.database.min_connections = v;
        }
        if let Some(v) = get_env("DB_CONNECT_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.database.connect_timeout_secs = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.jwt.secret = v;
        }
        if let Some(v) = get_env("RENTAL_DURATION_HOURS").and_then(|v| v.parse().ok()) {
            self.rental.duration_hours = v;
        }
        if let Ok(v) = env::var("RENTAL_CURRENCY") {
            self.rental.currency = v;
        }
    }

    fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.rental.duration_hours <= 0 {
            return Err("rental.duration_hours must be positive".into());
        }
        if self.database.min_connections > self.database.max_connections {
            return Err("database.min_connections exceeds max_connections".into());
        }
        Ok(())
    }
}
