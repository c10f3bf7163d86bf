use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub cache_ttl_secs: u64,
    pub request_timeout_secs: u64,
    pub tracking_path: Option<PathBuf>,
}
