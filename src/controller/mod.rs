// Player controller - owns the playlist and keeps audio, storage and screen in step
// Every user action comes in as a Command and is handled start to finish before the next one

mod command;

pub use command::{Command, Outcome, RowAction};

use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::audio::{
    resolve_path, Direction, Playback, PlayerEvent, Playlist, PlaylistError, Progress, Removal,
    Track,
};
use crate::config::Config;
use crate::storage::{self, BlobStore};

/// What the now-playing panel shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub title: String,
    pub artist: String,
    pub cover: String,
}

impl From<&Track> for NowPlaying {
    fn from(track: &Track) -> Self {
        Self {
            title: track.title.clone(),
            artist: track.artist.clone(),
            cover: track.display_cover().to_string(),
        }
    }
}

pub struct Controller<P: Playback> {
    playlist: Playlist,
    store: Box<dyn BlobStore>,
    storage_key: String,
    playback: P,
    library_root: PathBuf,
    volume_step: f32,

    now_playing: Option<NowPlaying>,
    progress: Progress,
    is_playing: bool,
    status: Option<String>,
}

impl<P: Playback> Controller<P> {
    /// Restore the saved playlist (or the defaults) and load, without playing,
    /// the first track.
    pub fn new(config: &Config, store: Box<dyn BlobStore>, playback: P) -> Self {
        let playlist = storage::load_playlist(store.as_ref(), &config.storage_key);

        let mut controller = Self {
            playlist,
            store,
            storage_key: config.storage_key.clone(),
            playback,
            library_root: config.library_root.clone(),
            volume_step: config.audio.volume_step,
            now_playing: None,
            progress: Progress::default(),
            is_playing: false,
            status: None,
        };
        controller.load_active();
        controller
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn now_playing(&self) -> Option<&NowPlaying> {
        self.now_playing.as_ref()
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn volume(&self) -> f32 {
        self.playback.volume()
    }

    pub fn volume_step(&self) -> f32 {
        self.volume_step
    }

    pub fn playback(&self) -> &P {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut P {
        &mut self.playback
    }

    /// Pop the latest user-facing warning, if any.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, PlaylistError> {
        debug!("Dispatching {:?}", command);

        match command {
            Command::Select(index) => {
                self.playlist.select(index)?;
                self.load_active();
                self.play();
            }
            Command::Delete(index) => {
                let removal = self.playlist.delete(index)?;
                self.persist();
                match removal {
                    Removal::Emptied => self.clear_now_playing(),
                    Removal::ActiveRemoved => self.load_active(),
                    Removal::Shifted | Removal::Unchanged => {}
                }
            }
            Command::ToggleTrending(index) => {
                self.playlist.toggle_trending(index)?;
                self.persist();
            }
            Command::Add(draft) => {
                let was_empty = self.playlist.is_empty();
                if !self.playlist.add(draft) {
                    return Ok(Outcome::Rejected);
                }
                self.persist();
                if was_empty {
                    self.load_active();
                }
            }
            Command::TogglePlayPause => {
                if self.is_playing {
                    self.pause();
                } else {
                    self.play();
                }
            }
            Command::Next => self.step(Direction::Next),
            Command::Previous => self.step(Direction::Previous),
            Command::SeekFraction(fraction) => self.seek(fraction),
            Command::SetVolume(volume) => self.playback.set_volume(volume),
            Command::AdjustVolume(delta) => {
                let volume = self.playback.volume() + delta;
                self.playback.set_volume(volume);
            }
            Command::Quit => {
                self.pause();
                return Ok(Outcome::Quit);
            }
        }

        Ok(Outcome::Applied)
    }

    /// React to a signal from the audio engine.
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TimeUpdate { current, duration } => {
                self.progress = Progress { current, duration };
            }
            PlayerEvent::Ended => {
                debug!("Track ended, advancing");
                self.step(Direction::Next);
            }
            PlayerEvent::Error(message) => {
                warn!("Audio engine reported: {}", message);
                self.status = Some(format!("❌ Audio Error: {}", message));
            }
        }
    }

    fn step(&mut self, direction: Direction) {
        if self.playlist.advance(direction).is_none() {
            return;
        }
        self.load_active();
        self.play();
    }

    /// Point the engine and the now-playing panel at the active track.
    fn load_active(&mut self) {
        let Some(track) = self.playlist.active_track() else {
            self.clear_now_playing();
            return;
        };

        let path = resolve_path(&self.library_root, &track.source);
        self.playback.set_source(&path);
        self.now_playing = Some(NowPlaying::from(track));
        self.progress = Progress::default();
        self.is_playing = false;
    }

    fn clear_now_playing(&mut self) {
        self.playback.clear_source();
        self.now_playing = None;
        self.progress = Progress::default();
        self.is_playing = false;
    }

    fn play(&mut self) {
        match self.playback.play() {
            Ok(()) => {
                self.is_playing = true;
                if let Some(now) = &self.now_playing {
                    info!("Playing '{} - {}'", now.title, now.artist);
                }
            }
            Err(e) => {
                warn!("Play prevented: {}", e);
                self.is_playing = false;
                self.status = Some(format!("⚠️ Play prevented: {}", e));
            }
        }
    }

    fn pause(&mut self) {
        self.playback.pause();
        self.is_playing = false;
    }

    fn seek(&mut self, fraction: f64) {
        if self.now_playing.is_none() {
            return;
        }
        match self.playback.seek_to(fraction) {
            Ok(()) => {
                if let Some(duration) = self.progress.duration {
                    self.progress.current = fraction.clamp(0.0, 1.0) * duration;
                }
            }
            Err(e) => debug!("Seek to {:.2} ignored: {}", fraction, e),
        }
    }

    fn persist(&mut self) {
        if let Err(e) = storage::save_playlist(self.store.as_ref(), &self.storage_key, &self.playlist)
        {
            warn!("Failed to save playlist: {}", e);
            self.status = Some(format!("⚠️ Could not save playlist: {}", e));
        }
    }
}
