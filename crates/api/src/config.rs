use std::path::PathBuf;
use std::time::Duration;

use thermoscan_core::thermal::python::{
    AnalyzerConfig, DEFAULT_SCRIPT_DIRS, DEFAULT_SCRIPT_NAME, DEFAULT_TIMEOUT,
};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Must stay above the
    /// analysis timeout or thermal requests are cut off before they can fail
    /// cleanly.
    pub request_timeout_secs: u64,
    /// Largest accepted request body, uploads included (default: 50 MiB).
    pub max_upload_bytes: usize,
    /// Directory uploaded images are written to (default: `./uploads`).
    pub upload_dir: PathBuf,
    /// External thermal analysis settings.
    pub analysis: AnalyzerConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                                  |
    /// |-------------------------|------------------------------------------|
    /// | `HOST`                  | `0.0.0.0`                                |
    /// | `PORT`                  | `8080`                                   |
    /// | `CORS_ORIGINS`          | `http://localhost:3000`                  |
    /// | `REQUEST_TIMEOUT_SECS`  | `60`                                     |
    /// | `MAX_UPLOAD_BYTES`      | `52428800`                               |
    /// | `UPLOAD_DIR`            | `<cwd>/uploads`                          |
    /// | `ANALYSIS_PYTHON_BIN`   | `python`                                 |
    /// | `ANALYSIS_SCRIPT_NAME`  | `analyze.py`                             |
    /// | `ANALYSIS_SCRIPT_DIRS`  | `ml_models,Backend/ml_models,ML Model`   |
    /// | `ANALYSIS_BASE_DIR`     | `<cwd>`                                  |
    /// | `ANALYSIS_TIMEOUT_SECS` | `30`                                     |
    ///
    /// Panics on unparsable values; misconfiguration should stop start-up.
    pub fn from_env() -> Self {
        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = split_list(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| "52428800".into())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| cwd.join("uploads"));

        let timeout_secs: u64 = std::env::var("ANALYSIS_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT.as_secs().to_string())
            .parse()
            .expect("ANALYSIS_TIMEOUT_SECS must be a valid u64");

        let analysis = AnalyzerConfig {
            python_bin: std::env::var("ANALYSIS_PYTHON_BIN").unwrap_or_else(|_| "python".into()),
            script_name: std::env::var("ANALYSIS_SCRIPT_NAME")
                .unwrap_or_else(|_| DEFAULT_SCRIPT_NAME.into()),
            script_dirs: std::env::var("ANALYSIS_SCRIPT_DIRS")
                .map(|v| split_list(&v))
                .unwrap_or_else(|_| DEFAULT_SCRIPT_DIRS.iter().map(|d| d.to_string()).collect()),
            base_dir: std::env::var("ANALYSIS_BASE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| cwd.clone()),
            scratch_dir: upload_dir.clone(),
            timeout: Duration::from_secs(timeout_secs),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            upload_dir,
            analysis,
        }
    }
}

/// Comma-separated list with blanks dropped. Entries keep inner spaces
/// (`ML Model` is a valid script directory).
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
