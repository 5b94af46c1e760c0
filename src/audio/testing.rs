// Test double for the audio engine - records calls instead of making noise

use std::path::{Path, PathBuf};

use super::{Playback, PlaybackError};

#[derive(Debug, Default)]
pub struct RecordingPlayback {
    pub source: Option<PathBuf>,
    pub playing: bool,
    pub volume: f32,
    /// Refuse every `play()`, like a blocked output device.
    pub reject_play: bool,
    pub seeks: Vec<f64>,
    pub calls: Vec<String>,
}

impl Playback for RecordingPlayback {
    fn set_source(&mut self, path: &Path) {
        self.source = Some(path.to_path_buf());
        self.playing = false;
        self.calls.push(format!("set_source {}", path.display()));
    }

    fn clear_source(&mut self) {
        self.source = None;
        self.playing = false;
        self.calls.push("clear".to_string());
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        self.calls.push("play".to_string());
        if self.reject_play {
            return Err(PlaybackError::Output("autoplay blocked".to_string()));
        }
        if self.source.is_none() {
            return Err(PlaybackError::NoSource);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
        self.calls.push("pause".to_string());
    }

    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        self.seeks.push(fraction);
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn tick(&mut self) {}
}
