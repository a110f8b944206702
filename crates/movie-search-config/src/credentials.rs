use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

const KINOPOISK_API_KEY: &str = "kinopoisk_api_key";
const TMDB_API_KEY: &str = "tmdb_api_key";
const SERPAPI_API_KEY: &str = "serpapi_api_key";

/// Environment variables that take precedence over the credentials file
const ENV_OVERRIDES: [(&str, &str); 3] = [
    ("KP_UNOFFICIAL_API_KEY", KINOPOISK_API_KEY),
    ("TMDB_API_KEY", TMDB_API_KEY),
    ("SERP_API_KEY", SERPAPI_API_KEY),
];

#[derive(Debug, Serialize, Deserialize, Default)]
struct CredentialsData {
    #[serde(flatten)]
    data: HashMap<String, String>,
}

pub struct CredentialStore {
    path: PathBuf,
    credentials: HashMap<String, String>,
}

impl CredentialStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            credentials: HashMap::new(),
        }
    }

    pub fn load(&mut self) -> Result<()> {
        if self.path.exists() {
            let content = std::fs::read_to_string(&self.path)?;
            let creds_data: CredentialsData = toml::from_str(&content)?;
            self.credentials = creds_data.data;
        }
        Ok(())
    }

    /// Apply API keys from the environment on top of whatever was loaded
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for (env_name, key) in ENV_OVERRIDES {
            if let Some(value) = lookup(env_name).filter(|v| !v.trim().is_empty()) {
                tracing::debug!("Using {} from environment", env_name);
                self.set(key.to_string(), value);
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let creds_data = CredentialsData {
            data: self.credentials.clone(),
        };
        let content = toml::to_string_pretty(&creds_data)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.credentials.get(key).filter(|v| !v.trim().is_empty())
    }

    pub fn set(&mut self, key: String, value: String) {
        self.credentials.insert(key, value);
    }

    pub fn remove(&mut self, key: &str) {
        self.credentials.remove(key);
    }

    pub fn get_kinopoisk_api_key(&self) -> Option<&String> {
        self.get(KINOPOISK_API_KEY)
    }

    pub fn set_kinopoisk_api_key(&mut self, key: String) {
        self.set(KINOPOISK_API_KEY.to_string(), key);
    }

    pub fn get_tmdb_api_key(&self) -> Option<&String> {
        self.get(TMDB_API_KEY)
    }

    pub fn set_tmdb_api_key(&mut self, key: String) {
        self.set(TMDB_API_KEY.to_string(), key);
    }

    pub fn get_serpapi_api_key(&self) -> Option<&String> {
        self.get(SERPAPI_API_KEY)
    }

    pub fn set_serpapi_api_key(&mut self, key: String) {
        self.set(SERPAPI_API_KEY.to_string(), key);
    }

    /// API key for a provider by its config name
    pub fn api_key_for(&self, provider: &str) -> Option<&String> {
        match provider {
            "kinopoisk" => self.get_kinopoisk_api_key(),
            "tmdb" => self.get_tmdb_api_key(),
            "serpapi" => self.get_serpapi_api_key(),
            _ => None,
        }
    }
}
