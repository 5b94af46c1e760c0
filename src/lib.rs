// TuneDeck Library - playlist player core
// Playlist/storage/controller are plain Rust; audio output and the terminal UI sit behind features

pub mod audio;      // tracks, playlist cursor, playback engine
pub mod config;     // settings and preferences
pub mod controller; // turns commands into playlist/audio/storage updates
pub mod storage;    // playlist persistence
pub mod ui;         // terminal interface

// Export the stuff the binary and tests actually use
pub use audio::{Playback, PlayerEvent, Playlist, Track, TrackDraft};
pub use config::Config;
pub use controller::{Command, Controller, Outcome};
pub use storage::{BlobStore, FileBlobStore};
