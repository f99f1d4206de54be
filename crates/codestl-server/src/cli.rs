//! CLI for the codestl server. Flags override config.toml values.

use clap::Parser;
use codestl_core::config::ServerConfig;
use std::net::IpAddr;
use std::path::PathBuf;

/// HTTP server turning Spotify code URLs into downloadable STL zip archives.
#[derive(Debug, Parser)]
#[command(name = "codestl-server")]
#[command(about = "codestl: Spotify-code STL archive server", long_about = None)]
pub struct Cli {
    /// Interface to bind (overrides config.toml).
    #[arg(long)]
    pub interface: Option<IpAddr>,

    /// Port to bind (overrides config.toml).
    #[arg(long)]
    pub port: Option<u16>,

    /// Converter command for SVG-to-STL generation (overrides config.toml).
    #[arg(long)]
    pub converter: Option<String>,

    /// Directory for per-request zip artifacts (overrides config.toml).
    #[arg(long, value_name = "DIR")]
    pub temp_dir: Option<PathBuf>,
}

impl Cli {
    /// Fold CLI overrides into the loaded configuration.
    pub fn apply(self, config: &mut ServerConfig) {
        if let Some(interface) = self.interface {
            config.interface = interface;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(converter) = self.converter {
            config.converter = converter;
        }
        if let Some(temp_dir) = self.temp_dir {
            config.temp_dir = Some(temp_dir);
        }
    }
}
