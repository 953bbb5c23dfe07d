use std::path::PathBuf;

/// Runtime configuration for the SMA client.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base address of the remote analysis service.
    pub api_base: String,
    /// File holding the stored session id and session kind.
    pub state_path: PathBuf,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Directory CSV exports are written to when no explicit path is given.
    pub export_dir: PathBuf,
}
