use dotenvy::dotenv;
use log::error;
use serde::Deserialize;
use std::env;

use crate::store::persistence::DEFAULT_STORAGE_KEY;

const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

#[derive(Deserialize, Debug, Default, Clone)]
pub struct Config {
    pub storage_path: String,
    pub storage_key: Option<String>,
    pub auto_insert_blank: Option<bool>,
}

impl Config {
    pub fn storage_key(&self) -> &str {
        self.storage_key.as_deref().unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn auto_insert_blank(&self) -> bool {
        self.auto_insert_blank.unwrap_or(true)
    }
}

pub fn create_test_config() -> Config {
    Config {
        storage_path: "apartments.json".to_string(),
        storage_key: None,
        auto_insert_blank: None,
    }
}

pub fn parse_config(bytes: &[u8]) -> Result<Config, String> {
    toml::from_slice(bytes).map_err(|e| e.to_string())
}

pub fn read_config() -> Config {
    dotenv().ok();
    env::var(CONFIG_PATH_ENV)
        .map_err(|_| format!("{CONFIG_PATH_ENV} .env not set"))
        .and_then(|config_path| std::fs::read(config_path).map_err(|e| e.to_string()))
        .and_then(|bytes| parse_config(&bytes))
        .unwrap_or_else(|err| {
            error!("failed to read config: {err}");
            std::process::exit(1);
        })
}
