use std::path::PathBuf;

use jobcross_common::api::ApiConfig;

use crate::error::AppError;

/// CLI configuration, loaded from environment variables.
///
/// Optional:
/// - `JOBCROSS_API_URL` / `JOBCROSS_TIMEOUT_SECS`: backend client (see `ApiConfig`)
/// - `JOBCROSS_DATA_DIR`: where recent searches live (default: the platform
///   data directory under `jobcross`, falling back to the current directory)
#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let api = ApiConfig::from_env();
        if !api.base_url.starts_with("http://") && !api.base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "JOBCROSS_API_URL must be an http(s) URL, got '{}'",
                api.base_url
            )));
        }

        let data_dir = match std::env::var("JOBCROSS_DATA_DIR") {
            Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
            _ => dirs::data_dir()
                .map(|d| d.join("jobcross"))
                .unwrap_or_else(|| PathBuf::from(".")),
        };

        Ok(Self { api, data_dir })
    }
}
