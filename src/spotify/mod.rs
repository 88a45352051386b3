//! Spotify Web API client.
//!
//! Token acquisition uses the client-credentials flow and happens once, at
//! construction time: a deployment with bad credentials never starts
//! serving. The resulting app token is held for the process lifetime.

pub mod types;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::SpotifyConfig;
pub use types::{Artist, ArtistSearchResult, Track, TrackSearchResult};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

const UNKNOWN_ARTIST: &str = "Unknown Artist";

/// Error returned by catalog operations, carrying the operation context.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Client-credentials token acquisition failed.
    #[error("failed to get token: {0}")]
    Token(String),
    /// Transport-level failure talking to the Web API.
    #[error("{op}: {source}")]
    Http {
        op: &'static str,
        source: reqwest::Error,
    },
    /// Non-success status from the Web API.
    #[error("{op}: status {status}: {body}")]
    Api {
        op: &'static str,
        status: u16,
        body: String,
    },
}

/// The music-catalog operations the tool set depends on.
///
/// The dispatch core and its tests only ever see this trait; [`Client`] is
/// the production implementation.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    async fn search_tracks(&self, query: &str, limit: i64) -> Result<TrackSearchResult, Error>;
    async fn search_artists(&self, query: &str, limit: i64) -> Result<ArtistSearchResult, Error>;
    async fn get_track(&self, id: &str) -> Result<Track, Error>;
}

/// Spotify Web API client holding the app token.
pub struct Client {
    http: reqwest::Client,
    token: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

// Wire shapes for the subset of the Web API responses we consume.

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    tracks: Option<Page<TrackObject>>,
    #[serde(default)]
    artists: Option<Page<ArtistObject>>,
}

#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(default = "Vec::new")]
    items: Vec<T>,
    #[serde(default)]
    total: i64,
}

#[derive(Debug, Deserialize)]
struct TrackObject {
    id: String,
    name: String,
    uri: String,
    album: AlbumObject,
    #[serde(default)]
    artists: Vec<ArtistRef>,
}

#[derive(Debug, Deserialize)]
struct AlbumObject {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArtistRef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ArtistObject {
    id: String,
    name: String,
    uri: String,
    #[serde(default)]
    popularity: i64,
}

impl Client {
    /// Exchange the configured credentials for an app token.
    pub async fn new(cfg: &SpotifyConfig) -> Result<Self, Error> {
        let http = reqwest::Client::new();

        let resp = http
            .post(TOKEN_URL)
            .basic_auth(&cfg.client_id, Some(&cfg.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(|e| Error::Token(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Token(format!("status {}: {}", status.as_u16(), body)));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| Error::Token(e.to_string()))?;

        Ok(Self {
            http,
            token: token.access_token,
        })
    }

    async fn search(
        &self,
        query: &str,
        kind: &str,
        limit: i64,
        op: &'static str,
    ) -> Result<SearchResponse, Error> {
        // `limit` goes out verbatim; out-of-range values are the API's call.
        let limit = limit.to_string();
        let resp = self
            .http
            .get(format!("{API_BASE}/search"))
            .bearer_auth(&self.token)
            .query(&[("q", query), ("type", kind), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|source| Error::Http { op, source })?;

        check(resp, op).await?.json().await.map_err(|source| Error::Http { op, source })
    }
}

async fn check(resp: reqwest::Response, op: &'static str) -> Result<reqwest::Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(Error::Api {
        op,
        status: status.as_u16(),
        body,
    })
}

fn map_track(track: TrackObject) -> Track {
    let artist = track
        .artists
        .first()
        .map(|a| a.name.clone())
        .unwrap_or_else(|| UNKNOWN_ARTIST.into());
    Track {
        id: track.id,
        name: track.name,
        artist,
        album: track.album.name,
        uri: track.uri,
    }
}

fn map_artist(artist: ArtistObject) -> Artist {
    Artist {
        id: artist.id,
        name: artist.name,
        popularity: artist.popularity,
        uri: artist.uri,
    }
}

#[async_trait]
impl MusicCatalog for Client {
    async fn search_tracks(&self, query: &str, limit: i64) -> Result<TrackSearchResult, Error> {
        const OP: &str = "failed to search tracks";
        let page = self
            .search(query, "track", limit, OP)
            .await?
            .tracks
            .unwrap_or(Page {
                items: Vec::new(),
                total: 0,
            });
        Ok(TrackSearchResult {
            tracks: page.items.into_iter().map(map_track).collect(),
            total: page.total,
        })
    }

    async fn search_artists(&self, query: &str, limit: i64) -> Result<ArtistSearchResult, Error> {
        const OP: &str = "failed to search artists";
        let page = self
            .search(query, "artist", limit, OP)
            .await?
            .artists
            .unwrap_or(Page {
                items: Vec::new(),
                total: 0,
            });
        Ok(ArtistSearchResult {
            artists: page.items.into_iter().map(map_artist).collect(),
            total: page.total,
        })
    }

    async fn get_track(&self, id: &str) -> Result<Track, Error> {
        const OP: &str = "failed to get track";
        let resp = self
            .http
            .get(format!("{API_BASE}/tracks/{id}"))
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|source| Error::Http { op: OP, source })?;

        let track: TrackObject = check(resp, OP)
            .await?
            .json()
            .await
            .map_err(|source| Error::Http { op: OP, source })?;

        Ok(map_track(track))
    }
}
