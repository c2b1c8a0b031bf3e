//! Metadata service client implementation.

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{TmdbError, TmdbResult};
use crate::types::{
    CastMember, CreditsResponse, DiscoverPage, MovieDetails, MovieSummary, SearchPage, Video,
    VideosResponse, WatchProvider, WatchProvidersResponse,
};

const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Configuration for the metadata client.
#[derive(Debug, Clone)]
pub struct TmdbConfig {
    /// API key credential
    pub api_key: String,
    /// API base URL (overridable for tests)
    pub base_url: String,
    /// Poster image base URL
    pub image_base_url: String,
}

impl TmdbConfig {
    /// Create a config with default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
        }
    }

    /// Create config from environment variables.
    pub fn from_env() -> TmdbResult<Self> {
        let api_key = std::env::var("TMDB_API_KEY")
            .map_err(|_| TmdbError::config_error("TMDB_API_KEY not set"))?;
        Ok(Self::new(api_key))
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Metadata service client.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    config: TmdbConfig,
    client: Client,
}

impl TmdbClient {
    /// Create a new client from configuration.
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    /// Create from environment variables.
    pub fn from_env() -> TmdbResult<Self> {
        Ok(Self::new(TmdbConfig::from_env()?))
    }

    /// Title search, returning the service's ranked result list.
    pub async fn search_movies(&self, query: &str) -> TmdbResult<Vec<MovieSummary>> {
        debug!(query, "Searching movies by title");
        let page: SearchPage = self
            .get_json("/search/movie", &[("query", query.to_string())])
            .await?;
        Ok(page.results)
    }

    /// Full detail record for a movie.
    pub async fn movie_details(&self, id: u64) -> TmdbResult<MovieDetails> {
        self.get_json(&format!("/movie/{}", id), &[]).await
    }

    /// Cast list for a movie.
    pub async fn movie_credits(&self, id: u64) -> TmdbResult<Vec<CastMember>> {
        let credits: CreditsResponse = self
            .get_json(&format!("/movie/{}/credits", id), &[])
            .await?;
        Ok(credits.cast)
    }

    /// Video list (trailers, teasers, clips) for a movie.
    pub async fn movie_videos(&self, id: u64) -> TmdbResult<Vec<Video>> {
        let videos: VideosResponse = self
            .get_json(&format!("/movie/{}/videos", id), &[])
            .await?;
        Ok(videos.results)
    }

    /// Streaming providers (flatrate) for a movie in the given country.
    pub async fn watch_providers(&self, id: u64, country: &str) -> TmdbResult<Vec<WatchProvider>> {
        let resp: WatchProvidersResponse = self
            .get_json(&format!("/movie/{}/watch/providers", id), &[])
            .await?;
        Ok(resp
            .results
            .get(country)
            .map(|c| c.flatrate.clone())
            .unwrap_or_default())
    }

    /// Movies similar to the given one.
    pub async fn similar_movies(&self, id: u64) -> TmdbResult<Vec<MovieSummary>> {
        let page: SearchPage = self
            .get_json(&format!("/movie/{}/similar", id), &[])
            .await?;
        Ok(page.results)
    }

    /// Discover movies by genre, popularity-sorted, adult content excluded
    /// at the query.
    pub async fn discover_by_genre(&self, genres: &[u32], page: u32) -> TmdbResult<DiscoverPage> {
        let with_genres = genres
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.get_json(
            "/discover/movie",
            &[
                ("with_genres", with_genres),
                ("sort_by", "popularity.desc".to_string()),
                ("include_adult", "false".to_string()),
                ("language", "en-US".to_string()),
                ("page", page.to_string()),
            ],
        )
        .await
    }

    /// A page of currently popular movies.
    pub async fn popular(&self, page: u32) -> TmdbResult<DiscoverPage> {
        self.get_json("/movie/popular", &[("page", page.to_string())])
            .await
    }

    /// Full poster URL for a summary, when it has one.
    pub fn poster_url(&self, summary: &MovieSummary) -> Option<String> {
        summary
            .poster_path
            .as_deref()
            .map(|p| format!("{}{}", self.config.image_base_url, p))
    }

    /// First YouTube trailer URL from a video list.
    pub fn trailer_url(videos: &[Video]) -> Option<String> {
        videos
            .iter()
            .find(|v| v.kind == "Trailer" && v.site == "YouTube")
            .map(|v| format!("https://www.youtube.com/watch?v={}", v.key))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> TmdbResult<T> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            let body = body.chars().take(200).collect::<String>();
            return Err(TmdbError::api(status, body));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(kind: &str, site: &str, key: &str) -> Video {
        Video {
            key: key.to_string(),
            site: site.to_string(),
            kind: kind.to_string(),
            name: None,
        }
    }

    #[test]
    fn test_trailer_url_picks_first_youtube_trailer() {
        let videos = vec![
            video("Teaser", "YouTube", "teaser1"),
            video("Trailer", "Vimeo", "vimeo1"),
            video("Trailer", "YouTube", "main1"),
            video("Trailer", "YouTube", "main2"),
        ];
        assert_eq!(
            TmdbClient::trailer_url(&videos).as_deref(),
            Some("https://www.youtube.com/watch?v=main1")
        );
    }

    #[test]
    fn test_trailer_url_none_when_absent() {
        assert_eq!(TmdbClient::trailer_url(&[]), None);
    }

    #[test]
    fn test_poster_url() {
        let client = TmdbClient::new(TmdbConfig::new("k"));
        let summary = MovieSummary {
            id: 1,
            title: "Inception".to_string(),
            release_date: None,
            poster_path: Some("/poster.jpg".to_string()),
            overview: None,
            popularity: 10.0,
            adult: false,
        };
        assert_eq!(
            client.poster_url(&summary).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
    }
}
