use std::str::FromStr;

use mdm_core::faults::FaultRates;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5320`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Emit JSON log lines instead of human-readable ones.
    pub log_json: bool,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Synthetic data set and fault injection.
    pub mock: MockConfig,
}

/// Settings for the generated record stores and simulated failures.
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub bom_count: usize,
    pub material_count: usize,
    /// Fixed RNG seed; a random one is drawn (and logged) when unset.
    pub seed: Option<u64>,
    /// Artificial delay added to list requests, in milliseconds.
    pub list_latency_ms: u64,
    pub fault_rates: FaultRates,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            bom_count: 500,
            material_count: 500,
            seed: None,
            list_latency_ms: 0,
            fault_rates: FaultRates::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                 |
    /// |-------------------------|-------------------------|
    /// | `HOST`                  | `0.0.0.0`               |
    /// | `PORT`                  | `5320`                  |
    /// | `CORS_ORIGINS`          | `http://localhost:5666` |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                    |
    /// | `LOG_FORMAT`            | `pretty` (or `json`)    |
    ///
    /// See [`JwtConfig::from_env`] and [`MockConfig::from_env`] for the rest.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let port: u16 = env_or("PORT", 5320);

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5666".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", 30);

        let log_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_json,
            jwt: JwtConfig::from_env(),
            mock: MockConfig::from_env(),
        }
    }
}

impl MockConfig {
    /// Load mock data settings.
    ///
    /// | Env Var                 | Default  |
    /// |-------------------------|----------|
    /// | `MOCK_BOM_COUNT`        | `500`    |
    /// | `MOCK_MATERIAL_COUNT`   | `500`    |
    /// | `MOCK_SEED`             | random   |
    /// | `MOCK_LIST_LATENCY_MS`  | `0`      |
    /// | `FAULT_DELETE_RATE`     | `0.05`   |
    /// | `FAULT_IMPORT_ROW_RATE` | `0.05`   |
    /// | `FAULT_REPORT_RATE`     | `0.02`   |
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let seed = std::env::var("MOCK_SEED")
            .ok()
            .map(|s| s.parse().expect("MOCK_SEED must be a valid u64"));

        Self {
            bom_count: env_or("MOCK_BOM_COUNT", defaults.bom_count),
            material_count: env_or("MOCK_MATERIAL_COUNT", defaults.material_count),
            seed,
            list_latency_ms: env_or("MOCK_LIST_LATENCY_MS", defaults.list_latency_ms),
            fault_rates: FaultRates {
                delete: env_or("FAULT_DELETE_RATE", defaults.fault_rates.delete),
                import_row: env_or("FAULT_IMPORT_ROW_RATE", defaults.fault_rates.import_row),
                report: env_or("FAULT_REPORT_RATE", defaults.fault_rates.report),
            },
        }
    }
}

/// Read and parse `name`, falling back to `default` when unset.
///
/// # Panics
///
/// Panics if the variable is set but does not parse.
fn env_or<T>(name: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{name} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
