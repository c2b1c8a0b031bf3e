//! Movie metadata service client.
//!
//! This crate provides a typed client for the TMDB-shaped metadata
//! collaborator:
//! - Title search and detail/credits/videos/providers lookups
//! - Similar-movie and genre-discovery listings
//! - Popular-movie pages for random draws
//!
//! The client carries its API key in an injected [`TmdbConfig`] rather
//! than ambient global state, and its base URL is overridable for tests.

pub mod client;
pub mod error;
pub mod types;

pub use client::{TmdbClient, TmdbConfig};
pub use error::{TmdbError, TmdbResult};
pub use types::{
    CastMember, CountryProviders, DiscoverPage, Genre, MovieDetails, MovieSummary, Video,
    WatchProvider,
};
