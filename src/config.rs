use std::env;
use std::path::PathBuf;

use crate::error::{CtftError, Result};

const DEFAULT_BASE_URL: &str = "https://competetft.com";
const DEFAULT_DATA_DIR: &str = "data";

/// Runtime configuration, sourced from the process environment.
///
/// A `.env` file in the working directory is honoured when the binary calls
/// [`dotenvy::dotenv`] before constructing this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Site root all page URLs are built from. `CTFT_BASE_URL`.
    pub base_url: String,
    /// Connection string for the relational store. `DATABASE_URL`.
    database_url: Option<String>,
    /// Directory JSON artifacts are written to. `CTFT_DATA_DIR`.
    pub data_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        let base_url = env::var("CTFT_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        let data_dir = env::var("CTFT_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            base_url,
            database_url,
            data_dir,
        }
    }

    /// The database connection string, required for persistence commands.
    pub fn database_url(&self) -> Result<&str> {
        self.database_url.as_deref().ok_or_else(|| {
            CtftError::Config("DATABASE_URL is not set; configure it in .env".to_string())
        })
    }

    pub fn tournament_overview_url(&self, tournament_id: &str) -> String {
        format!(
            "{}/en-US/tournament/{tournament_id}/overview",
            self.base_url
        )
    }

    pub fn tournament_participants_url(&self, tournament_id: &str) -> String {
        format!(
            "{}/en-US/tournament/{tournament_id}/participants",
            self.base_url
        )
    }

    pub fn events_url(&self) -> String {
        format!("{}/en-US/tournaments", self.base_url)
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/en-US/schedule", self.base_url)
    }

    pub fn pro_points_url(&self) -> String {
        format!("{}/en-US/pro-points", self.base_url)
    }

    pub fn ladder_url(&self) -> String {
        format!("{}/en-US/ladder", self.base_url)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            database_url: None,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}
