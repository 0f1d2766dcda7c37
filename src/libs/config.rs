//! User settings for hikelog.
//!
//! Settings are stored as pretty-printed JSON in the platform data directory
//! next to the database. A missing file is not an error: defaults are used
//! until the user runs `hikelog init`.
//!
//! ```rust,no_run
//! use hikelog::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Hello, {}", config.user_name);
//! # Ok::<(), hikelog::libs::error::HikeError>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::error::Result;
use crate::libs::messages::Message;
use crate::libs::search::HikeSort;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_USER_NAME: &str = "Hiker";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Name shown in the statistics header.
    pub user_name: String,

    /// Default order for `hike list`.
    pub sort_order: HikeSort,

    /// Overrides the database location; defaults to the data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            user_name: DEFAULT_USER_NAME.to_string(),
            sort_order: HikeSort::default(),
            database_path: None,
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(config_file_path)
    }

    pub fn read_from<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(config_file_path)
    }

    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Where the journal database lives for this configuration.
    pub fn database_file(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }

    /// Interactive setup wizard, seeded with the current settings.
    pub fn init() -> anyhow::Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        config.user_name = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptUserName.to_string())
            .default(config.user_name.clone())
            .validate_with(|input: &String| -> std::result::Result<(), &str> {
                if input.trim().is_empty() {
                    Err("Please enter your name")
                } else {
                    Ok(())
                }
            })
            .interact_text()?
            .trim()
            .to_string();

        let labels: Vec<&str> = HikeSort::ALL.iter().map(HikeSort::label).collect();
        let current = HikeSort::ALL.iter().position(|s| *s == config.sort_order).unwrap_or(0);
        let selected = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSortOrder.to_string())
            .items(&labels)
            .default(current)
            .interact()?;
        config.sort_order = HikeSort::ALL[selected];

        Ok(config)
    }
}
