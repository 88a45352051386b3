use std::fmt;

use serde::{Deserialize, Serialize};

/// A track as returned by the catalog tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist: String,
    pub album: String,
    pub uri: String,
}

/// An artist as returned by the catalog tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    pub popularity: i64,
    pub uri: String,
}

/// Track search outcome: the page of matches plus the reported total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackSearchResult {
    pub tracks: Vec<Track>,
    pub total: i64,
}

/// Artist search outcome: the page of matches plus the reported total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistSearchResult {
    pub artists: Vec<Artist>,
    pub total: i64,
}

// The Display renderings below are what tool callers receive as
// `content[0].text`: human-readable text, not machine-parseable JSON.

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} from {} ({})",
            self.name, self.artist, self.album, self.uri
        )
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [popularity {}] ({})",
            self.name, self.popularity, self.uri
        )
    }
}

impl fmt::Display for TrackSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} tracks matched (showing {})",
            self.total,
            self.tracks.len()
        )?;
        for track in &self.tracks {
            write!(f, "\n- {track}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ArtistSearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} artists matched (showing {})",
            self.total,
            self.artists.len()
        )?;
        for artist in &self.artists {
            write!(f, "\n- {artist}")?;
        }
        Ok(())
    }
}
