use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "panel_survey")]
#[command(about = "Leader panel scoring survey server")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Overrides APP_HOST
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Overrides APP_PORT
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Overrides SURVEY_DATA_FILE
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,

    /// Overrides SURVEY_ASSET_DIR
    #[arg(long, global = true)]
    pub asset_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Print a bcrypt hash suitable for INITIATOR_SECRET_BCRYPT
    HashSecret {
        secret: String,
        #[arg(long, default_value_t = bcrypt::DEFAULT_COST)]
        cost: u32,
    },
}

impl Cli {
    /// Command-line flags win over environment values.
    pub fn apply(&self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(data_file) = &self.data_file {
            config.data_file = data_file.clone();
        }
        if let Some(asset_dir) = &self.asset_dir {
            config.asset_dir = asset_dir.clone();
        }
        config
    }
}
