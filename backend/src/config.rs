use std::env;

/// Runtime configuration, read once at startup and handed to handlers through
/// the shared application context.
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// SQLite database file for document metadata and placeholder rows.
    pub db_path: String,
    /// Directory for uploaded and filled document binaries.
    pub storage_dir: String,
    pub gemini_api_key: String,
    pub gemini_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("LEXFILL_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("LEXFILL_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            db_path: env::var("LEXFILL_DB").unwrap_or_else(|_| "lexfill.sqlite".to_string()),
            storage_dir: env::var("LEXFILL_STORAGE_DIR")
                .unwrap_or_else(|_| "./storage".to_string()),
            gemini_api_key: env::var("GEMINI_API_KEY").unwrap_or_default(),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
        }
    }
}
