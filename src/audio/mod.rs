pub mod clock;
#[cfg(feature = "audio")]
pub mod player;
pub mod playlist;
#[cfg(test)]
pub(crate) mod testing;
pub mod track;

#[cfg(feature = "audio")]
pub use player::RodioPlayer;
pub use clock::Progress;
pub use playlist::{Direction, Playlist, PlaylistError, Removal};
pub use track::{default_tracks, Track, TrackDraft, PLACEHOLDER_COVER};

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AudioConfig {
    pub volume: f32, // 0.0 to 1.0
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 0.7,
        }
    }
}

impl From<&crate::config::Config> for AudioConfig {
    fn from(config: &crate::config::Config) -> Self {
        Self {
            volume: config.audio.volume.clamp(0.0, 1.0),
        }
    }
}

/// Signals coming back from the playback engine.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    TimeUpdate { current: f64, duration: Option<f64> },
    Ended,
    Error(String),
}

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("no track loaded")]
    NoSource,
    #[error("failed to open audio file '{}': {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported audio format or corrupted file '{}': {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("audio output unavailable: {0}")]
    Output(String),
    #[error("track length unknown, cannot seek")]
    UnknownDuration,
    #[error("seek failed: {0}")]
    Seek(String),
}

/// The audio engine as the controller sees it.
///
/// Implementations report position and end-of-track through `PlayerEvent`s
/// emitted from `tick`, which the event loop calls once per iteration.
pub trait Playback {
    /// Point the engine at a new file. Stops whatever was loaded; does not start playing.
    fn set_source(&mut self, path: &Path);
    /// Unload everything (used when the playlist runs empty).
    fn clear_source(&mut self);
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// Seek to `fraction` (0..=1) of the loaded track.
    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: f32);
    fn volume(&self) -> f32;
    fn tick(&mut self);
}

/// Resolve a track reference against the library root. Absolute paths pass through.
pub fn resolve_path(root: &Path, reference: &str) -> PathBuf {
    let path = Path::new(reference);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
