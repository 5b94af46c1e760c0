// Track records - one playable entry in the playlist
// Field names on disk match the layout older saves were written with (src/cover)

use serde::{Deserialize, Serialize};

/// Cover shown when a track has no artwork of its own.
pub const PLACEHOLDER_COVER: &str = "images/placeholder.jpg";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub artist: String,
    #[serde(rename = "src")]
    pub source: String,
    pub cover: String,
    pub trending: bool,
}

fn placeholder_cover() -> String {
    PLACEHOLDER_COVER.to_string()
}

impl Track {
    pub fn new(title: impl Into<String>, artist: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            source: source.into(),
            cover: placeholder_cover(),
            trending: false,
        }
    }

    pub fn with_cover(mut self, cover: impl Into<String>) -> Self {
        let cover = cover.into();
        self.cover = if cover.trim().is_empty() { placeholder_cover() } else { cover };
        self
    }

    pub fn trending(mut self, trending: bool) -> Self {
        self.trending = trending;
        self
    }

    /// Cover reference to display, never empty.
    pub fn display_cover(&self) -> &str {
        if self.cover.trim().is_empty() {
            PLACEHOLDER_COVER
        } else {
            &self.cover
        }
    }

    pub fn display_title(&self) -> String {
        format!("{} - {}", self.title, self.artist)
    }
}

/// Raw input from the add-track form, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackDraft {
    pub title: String,
    pub artist: String,
    pub source: String,
    pub cover: String,
}

impl TrackDraft {
    pub fn new(title: &str, artist: &str, source: &str, cover: &str) -> Self {
        Self {
            title: title.to_string(),
            artist: artist.to_string(),
            source: source.to_string(),
            cover: cover.to_string(),
        }
    }

    /// Validate and normalize the draft.
    ///
    /// Returns `None` when title, artist or source is blank after trimming.
    pub fn into_track(self) -> Option<Track> {
        let title = self.title.trim();
        let artist = self.artist.trim();
        let source = self.source.trim();
        if title.is_empty() || artist.is_empty() || source.is_empty() {
            return None;
        }

        Some(Track::new(title, artist, source).with_cover(self.cover.trim()))
    }
}

/// The playlist a fresh install starts with.
pub fn default_tracks() -> Vec<Track> {
    vec![
        Track::new("Shape of You", "Ed Sheeran", "music/song1.mp3")
            .with_cover("images/song1.jpg")
            .trending(true),
        Track::new("Levitating", "Dua Lipa", "music/song2.mp3").with_cover("images/song2.jpg"),
        Track::new("Blinding Lights", "The Weeknd", "music/song3.mp3")
            .with_cover("images/song3.jpg"),
    ]
}
