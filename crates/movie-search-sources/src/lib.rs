pub mod traits;
pub mod error;
pub mod http;
pub mod factory;
pub mod kinopoisk;
pub mod tmdb;
pub mod serpapi;

pub use traits::{LinkSource, MovieProvider};
pub use error::SourceError;
pub use factory::{ProviderFactory, SourceFactoryRegistry};
pub use kinopoisk::KinopoiskClient;
pub use tmdb::TmdbClient;
pub use serpapi::SerpApiClient;
