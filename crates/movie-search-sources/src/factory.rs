//! Factory pattern for creating catalog providers from configuration
//!
//! Providers are built once at startup, in the priority order from
//! `resolution.provider_order`, and then shared read-only by every request.

use anyhow::Result;
use movie_search_config::{Config, CredentialStore};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use crate::{LinkSource, MovieProvider, SerpApiClient, SourceError};

/// Factory trait for creating one kind of catalog provider
pub trait ProviderFactory: Send + Sync {
    /// Config key of the provider this factory creates
    fn provider_name(&self) -> &str;

    /// Create the provider, or None when it is disabled in config
    ///
    /// Fails with `SourceError::MissingCredentials` when enabled without an API key.
    fn create_provider(
        &self,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Option<Arc<dyn MovieProvider>>, SourceError>;
}

/// Registry of provider factories
pub struct SourceFactoryRegistry {
    factories: HashMap<String, Box<dyn ProviderFactory>>,
}

impl SourceFactoryRegistry {
    /// Create a new registry with all built-in factories registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };

        registry.register(Box::new(kinopoisk::KinopoiskProviderFactory));
        registry.register(Box::new(tmdb::TmdbProviderFactory));

        registry
    }

    pub fn register(&mut self, factory: Box<dyn ProviderFactory>) {
        self.factories.insert(factory.provider_name().to_string(), factory);
    }

    /// Create all enabled providers in priority order
    ///
    /// A provider without an API key is skipped with a warning so that the
    /// other catalog keeps working; having none at all is an error.
    pub fn create_providers(
        &self,
        config: &Config,
        credentials: &CredentialStore,
    ) -> Result<Vec<Arc<dyn MovieProvider>>> {
        let mut providers = Vec::new();

        for name in config.get_configured_providers() {
            let Some(factory) = self.factories.get(&name) else {
                warn!("No factory registered for provider '{}'", name);
                continue;
            };

            match factory.create_provider(config, credentials) {
                Ok(Some(provider)) => {
                    debug!("Registered provider '{}' at priority {}", name, providers.len());
                    providers.push(provider);
                }
                Ok(None) => {}
                Err(e) => warn!("Skipping provider '{}': {}", name, e),
            }
        }

        if providers.is_empty() {
            return Err(anyhow::anyhow!(
                "No movie providers available. Configure an API key for Kinopoisk or TMDB (see `moviefinder config keys`)"
            ));
        }

        Ok(providers)
    }

    /// Create the web search used for watch links, if enabled and keyed
    pub fn create_link_source(&self, config: &Config, credentials: &CredentialStore) -> Option<Arc<dyn LinkSource>> {
        if !config.links.enabled {
            debug!("Link enrichment disabled in config");
            return None;
        }

        let Some(api_key) = credentials.get_serpapi_api_key() else {
            warn!("No SerpApi key configured, watch links will be skipped");
            return None;
        };

        let mut client = SerpApiClient::new(api_key.clone(), request_timeout(config));
        if let Some(base_url) = &config.links.base_url {
            client = client.with_base_url(base_url.clone());
        }
        Some(Arc::new(client))
    }

}

impl Default for SourceFactoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn request_timeout(config: &Config) -> Duration {
    Duration::from_secs(config.resolution.request_timeout_seconds)
}

fn require_key(credentials: &CredentialStore, provider: &str) -> Result<String, SourceError> {
    credentials
        .api_key_for(provider)
        .cloned()
        .ok_or_else(|| SourceError::MissingCredentials(provider.to_string()))
}

mod kinopoisk {
    use super::*;
    use crate::KinopoiskClient;

    pub struct KinopoiskProviderFactory;

    impl ProviderFactory for KinopoiskProviderFactory {
        fn provider_name(&self) -> &str {
            "kinopoisk"
        }

        fn create_provider(
            &self,
            config: &Config,
            credentials: &CredentialStore,
        ) -> Result<Option<Arc<dyn MovieProvider>>, SourceError> {
            let Some(kp_config) = config.providers.kinopoisk.as_ref().filter(|c| c.enabled) else {
                return Ok(None);
            };

            let mut client = KinopoiskClient::new(require_key(credentials, "kinopoisk")?, request_timeout(config));
            if let Some(base_url) = &kp_config.base_url {
                client = client.with_base_url(base_url.clone());
            }
            Ok(Some(Arc::new(client)))
        }
    }
}

mod tmdb {
    use super::*;
    use crate::TmdbClient;

    pub struct TmdbProviderFactory;

    impl ProviderFactory for TmdbProviderFactory {
        fn provider_name(&self) -> &str {
            "tmdb"
        }

        fn create_provider(
            &self,
            config: &Config,
            credentials: &CredentialStore,
        ) -> Result<Option<Arc<dyn MovieProvider>>, SourceError> {
            let Some(tmdb_config) = config.providers.tmdb.as_ref().filter(|c| c.enabled) else {
                return Ok(None);
            };

            let mut client = TmdbClient::new(require_key(credentials, "tmdb")?, request_timeout(config))
                .with_language(tmdb_config.language.clone());
            if let Some(base_url) = &tmdb_config.base_url {
                client = client.with_base_url(base_url.clone());
            }
            if let Some(image_base_url) = &tmdb_config.image_base_url {
                client = client.with_image_base_url(image_base_url.clone());
            }
            Ok(Some(Arc::new(client)))
        }
    }
}
