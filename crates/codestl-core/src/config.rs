use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Timeouts for fetching the source SVG (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Total transfer timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 30,
        }
    }
}

/// Global configuration loaded from `~/.config/codestl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface the HTTP server binds to.
    pub interface: IpAddr,
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Command used to convert a fetched SVG into an STL zip archive.
    /// Invoked as `<converter> <svg-path> <zip-path>`; resolved on PATH.
    pub converter: String,
    /// Directory for per-request zip artifacts (None = system temp dir).
    #[serde(default)]
    pub temp_dir: Option<PathBuf>,
    /// Optional fetch timeouts; if missing, built-in defaults are used.
    #[serde(default)]
    pub fetch: Option<FetchConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5000,
            converter: "spotifystl".to_string(),
            temp_dir: None,
            fetch: None,
        }
    }
}

impl ServerConfig {
    /// Directory where per-request zip artifacts are written and read back.
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Fetch timeouts, falling back to built-in defaults.
    pub fn fetch(&self) -> FetchConfig {
        self.fetch.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("codestl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ServerConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ServerConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: ServerConfig = toml::from_str(&data)?;
    Ok(cfg)
}
