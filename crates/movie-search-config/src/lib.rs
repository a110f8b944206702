pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{Config, HistoryConfig, KinopoiskConfig, LinksConfig, ProvidersConfig, ResolutionConfig, TmdbConfig, KNOWN_PROVIDERS, default_sites};
pub use credentials::CredentialStore;
pub use paths::{PathManager, container_base_path};
