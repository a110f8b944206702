use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Provider keys accepted in `resolution.provider_order`
pub const KNOWN_PROVIDERS: [&str; 2] = ["kinopoisk", "tmdb"];

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub links: LinksConfig,
    #[serde(default)]
    pub resolution: ResolutionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvidersConfig {
    /// Left out of the file means enabled; only `enabled = false` turns it off
    #[serde(default = "default_kinopoisk")]
    pub kinopoisk: Option<KinopoiskConfig>,
    #[serde(default = "default_tmdb")]
    pub tmdb: Option<TmdbConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinopoiskConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Response language, e.g. "ru-RU" (TMDB defaults to English)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Watch-online link enrichment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_sites")]
    pub sites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Priority order used when the catalogs disagree; first wins
    #[serde(default = "default_provider_order")]
    pub provider_order: Vec<String>,

    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HistoryConfig {
    /// Overrides `<data_dir>/history.jsonl`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

pub fn default_sites() -> Vec<String> {
    vec!["kinogo.biz".to_string(), "rezka.ag".to_string()]
}

fn default_kinopoisk() -> Option<KinopoiskConfig> {
    Some(KinopoiskConfig { enabled: true, base_url: None })
}

fn default_tmdb() -> Option<TmdbConfig> {
    Some(TmdbConfig {
        enabled: true,
        base_url: None,
        image_base_url: None,
        language: None,
    })
}

fn default_provider_order() -> Vec<String> {
    KNOWN_PROVIDERS.iter().map(|s| s.to_string()).collect()
}

fn default_request_timeout_seconds() -> u64 {
    10
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            kinopoisk: default_kinopoisk(),
            tmdb: default_tmdb(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            sites: default_sites(),
            base_url: None,
        }
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            provider_order: default_provider_order(),
            request_timeout_seconds: default_request_timeout_seconds(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist yet
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.resolution.request_timeout_seconds == 0 {
            return Err(anyhow::anyhow!("request_timeout_seconds must be greater than zero"));
        }

        if self.resolution.provider_order.is_empty() {
            return Err(anyhow::anyhow!("provider_order is required and cannot be empty"));
        }

        let mut seen = HashSet::new();
        for provider in &self.resolution.provider_order {
            if !KNOWN_PROVIDERS.contains(&provider.as_str()) {
                return Err(anyhow::anyhow!("Invalid provider in provider_order: {}", provider));
            }
            if !seen.insert(provider.as_str()) {
                return Err(anyhow::anyhow!("Provider listed twice in provider_order: {}", provider));
            }
            if !self.is_provider_enabled(provider) {
                return Err(anyhow::anyhow!(
                    "{} is in provider_order but is not configured or not enabled",
                    provider
                ));
            }
        }

        if self.links.sites.iter().any(|site| site.trim().is_empty()) {
            return Err(anyhow::anyhow!("links.sites cannot contain empty site names"));
        }

        Ok(())
    }

    pub fn is_provider_enabled(&self, name: &str) -> bool {
        match name {
            "kinopoisk" => self.providers.kinopoisk.as_ref().map_or(false, |c| c.enabled),
            "tmdb" => self.providers.tmdb.as_ref().map_or(false, |c| c.enabled),
            _ => false,
        }
    }

    /// Enabled providers in priority order
    pub fn get_configured_providers(&self) -> Vec<String> {
        self.resolution
            .provider_order
            .iter()
            .filter(|name| self.is_provider_enabled(name))
            .cloned()
            .collect()
    }

    /// Sites used for link enrichment, empty when enrichment is disabled
    pub fn watch_sites(&self) -> Vec<String> {
        if self.links.enabled {
            self.links.sites.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        }
    }

    pub fn history_path(&self, default_path: PathBuf) -> PathBuf {
        self.history.path.clone().unwrap_or(default_path)
    }
}
