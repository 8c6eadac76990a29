//! Command-line arguments for mcv-ui

use clap::Parser;
use std::path::PathBuf;

use mcv_common::config::ConfigOverrides;

/// Movie catalogue viewer
#[derive(Parser, Debug)]
#[command(name = "mcv-ui")]
#[command(about = "Browse a movie catalogue with TMDB posters")]
#[command(version)]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "MCV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "MCV_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "MCV_BIND_ADDRESS")]
    pub bind: Option<String>,

    /// Movie list endpoint
    #[arg(long, env = "MCV_LIST_URL")]
    pub list_url: Option<String>,

    /// TMDB API key used for poster search
    #[arg(long, env = "MCV_TMDB_API_KEY", hide_env_values = true)]
    pub tmdb_api_key: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MCV_LOG_LEVEL")]
    pub log_level: Option<String>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            port: self.port,
            bind_address: self.bind.clone(),
            list_url: self.list_url.clone(),
            tmdb_api_key: self.tmdb_api_key.clone(),
            log_level: self.log_level.clone(),
        }
    }
}
