//! Wire types for the metadata service.
//!
//! Field names follow the service's JSON; optional fields default rather
//! than fail deserialization, since the service omits them freely.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One entry in a ranked search/discover result list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub adult: bool,
}

impl MovieSummary {
    /// Release year parsed from the date string.
    pub fn release_year(&self) -> Option<i32> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .and_then(|y| y.parse().ok())
    }
}

/// A ranked result list from search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

/// A paginated discover/popular result set.
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverPage {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<MovieSummary>,
    #[serde(default = "default_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

fn default_page() -> u32 {
    1
}

/// Full movie detail record.
#[derive(Debug, Clone, Deserialize)]
pub struct MovieDetails {
    pub id: u64,
    pub title: String,

    #[serde(default)]
    pub overview: Option<String>,

    #[serde(default)]
    pub poster_path: Option<String>,

    #[serde(default)]
    pub release_date: Option<String>,

    #[serde(default)]
    pub runtime: Option<u32>,

    #[serde(default)]
    pub genres: Vec<Genre>,

    #[serde(default)]
    pub vote_average: f64,

    #[serde(default)]
    pub popularity: f64,

    #[serde(default)]
    pub adult: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Credits response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct CreditsResponse {
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastMember {
    pub name: String,
    #[serde(default)]
    pub character: Option<String>,
    #[serde(default)]
    pub profile_path: Option<String>,
}

/// Videos response wrapper.
#[derive(Debug, Clone, Deserialize)]
pub struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Watch-providers response: providers keyed by country code.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, CountryProviders>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryProviders {
    #[serde(default)]
    pub flatrate: Vec<WatchProvider>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WatchProvider {
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}
