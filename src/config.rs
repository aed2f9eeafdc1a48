use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

/// Configuración del servidor, leída del entorno (y de `.env` si existe).
#[derive(Debug, Clone)]
pub struct Config {
    pub bind: String,
    pub db_path: PathBuf,
    /// JSON array of `SectionRecord` imported at start-up.
    pub seed: Option<PathBuf>,
    pub suggestion_limit: usize,
    pub cors_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: "127.0.0.1:8080".to_string(),
            db_path: PathBuf::from("data/grades.db"),
            seed: None,
            suggestion_limit: 10,
            cors_origin: None,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let _ = dotenv::dotenv();
        let defaults = Config::default();

        Config {
            bind: try_load("GRADELENS_BIND", defaults.bind),
            db_path: PathBuf::from(try_load("GRADELENS_DB_PATH", defaults.db_path.display().to_string())),
            seed: optional("GRADELENS_SEED").map(PathBuf::from),
            suggestion_limit: try_load("GRADELENS_SUGGESTION_LIMIT", defaults.suggestion_limit),
            cors_origin: optional("GRADELENS_CORS_ORIGIN"),
        }
    }
}

fn optional(key: &str) -> Option<String> {
    non_blank(env::var(key).ok())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty())
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    parse_or(key, optional(key), default)
}

/// Valor ya leído del entorno; ausente, vacío o inválido da `default`.
fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match non_blank(raw) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }),
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
    }
}
