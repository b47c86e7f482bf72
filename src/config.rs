use std::env;
use std::path::PathBuf;

/// Runtime settings, read from the environment (and `.env` when present)
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    /// Signature on reminder letters
    pub landlord_name: Option<String>,
    /// Contact line on reminder letters
    pub landlord_contact: Option<String>,
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn load() -> Self {
        // A missing .env file is the normal case
        let _ = dotenvy::dotenv();

        Self {
            db_path: PathBuf::from(get_env("RENTFLOW_DB_PATH", "rentflow.db")),
            landlord_name: get_optional_env("RENTFLOW_LANDLORD_NAME"),
            landlord_contact: get_optional_env("RENTFLOW_LANDLORD_CONTACT"),
        }
    }
}

fn get_env(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn get_optional_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}
