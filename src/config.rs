use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// How the initiator proves who they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitiatorCredential {
    /// Plain secret from `INITIATOR_SECRET`; generated at startup when `None`.
    Secret(Option<String>),
    /// Bcrypt hash from `INITIATOR_SECRET_BCRYPT`.
    BcryptHash(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub data_file: PathBuf,
    pub asset_dir: PathBuf,
    pub entry_page: String,
    pub initiator: InitiatorCredential,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            data_file: PathBuf::from("survey_results.json"),
            asset_dir: PathBuf::from("static"),
            entry_page: "survey_final.html".to_string(),
            initiator: InitiatorCredential::Secret(None),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let host = lookup("APP_HOST").unwrap_or(defaults.host);

        let port = match lookup("APP_PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("APP_PORT must be a valid u16")?,
            None => defaults.port,
        };

        let data_file = lookup("SURVEY_DATA_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_file);
        let asset_dir = lookup("SURVEY_ASSET_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.asset_dir);
        let entry_page = lookup("SURVEY_ENTRY_PAGE").unwrap_or(defaults.entry_page);

        let bcrypt_hash = lookup("INITIATOR_SECRET_BCRYPT").filter(|v| !v.trim().is_empty());
        let plain = lookup("INITIATOR_SECRET").filter(|v| !v.trim().is_empty());
        let initiator = match (bcrypt_hash, plain) {
            (Some(_), Some(_)) => {
                anyhow::bail!("set only one of INITIATOR_SECRET and INITIATOR_SECRET_BCRYPT")
            }
            (Some(hash), None) => InitiatorCredential::BcryptHash(hash.trim().to_string()),
            (None, plain) => InitiatorCredential::Secret(plain),
        };

        Ok(Self {
            host,
            port,
            data_file,
            asset_dir,
            entry_page,
            initiator,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn entry_page_path(&self) -> PathBuf {
        self.asset_dir.join(&self.entry_page)
    }
}
