use super::{clock, AudioConfig, Playback, PlaybackError, PlayerEvent};
use anyhow::Result;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};

/// rodio-backed playback engine.
///
/// Files are opened lazily on the first `play`/`seek_to` after `set_source`,
/// so a missing or broken file surfaces as a rejected play.
pub struct RodioPlayer {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    sink: Option<Sink>,
    source: Option<PathBuf>,
    duration: Option<Duration>,
    config: AudioConfig,
    ended_sent: bool,
    event_sender: Option<mpsc::UnboundedSender<PlayerEvent>>,
}

impl RodioPlayer {
    pub fn new(config: AudioConfig) -> Result<Self> {
        let (stream, stream_handle) = OutputStream::try_default()?;
        info!("Opened default audio output (volume {:.2})", config.volume);

        Ok(Self {
            _stream: stream,
            stream_handle,
            sink: None,
            source: None,
            duration: None,
            config,
            ended_sent: false,
            event_sender: None,
        })
    }

    pub fn set_event_sender(&mut self, sender: mpsc::UnboundedSender<PlayerEvent>) {
        self.event_sender = Some(sender);
    }

    fn emit(&self, event: PlayerEvent) {
        if let Some(sender) = &self.event_sender {
            let _ = sender.send(event);
        }
    }

    /// Decode the current source into a paused sink if that hasn't happened yet.
    fn ensure_sink(&mut self) -> Result<&Sink, PlaybackError> {
        if self.sink.is_none() {
            let path = self.source.clone().ok_or(PlaybackError::NoSource)?;

            let file = File::open(&path).map_err(|source| PlaybackError::Open {
                path: path.clone(),
                source,
            })?;
            let decoder = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
                path: path.clone(),
                reason: e.to_string(),
            })?;
            self.duration = decoder.total_duration();

            let sink = Sink::try_new(&self.stream_handle)
                .map_err(|e| PlaybackError::Output(e.to_string()))?;
            sink.set_volume(self.config.volume);
            sink.pause();
            sink.append(decoder);

            debug!(
                "Loaded {} (duration {:?})",
                path.display(),
                self.duration.map(|d| d.as_secs())
            );
            self.ended_sent = false;
            self.sink = Some(sink);
        }

        self.sink.as_ref().ok_or(PlaybackError::NoSource)
    }

    fn stop_sink(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.duration = None;
        self.ended_sent = false;
    }

    fn duration_secs(&self) -> Option<f64> {
        self.duration.map(|d| d.as_secs_f64())
    }
}

impl Playback for RodioPlayer {
    fn set_source(&mut self, path: &Path) {
        self.stop_sink();
        debug!("Source set to {}", path.display());
        self.source = Some(path.to_path_buf());
    }

    fn clear_source(&mut self) {
        self.stop_sink();
        self.source = None;
    }

    fn play(&mut self) -> Result<(), PlaybackError> {
        // A finished sink has nothing left to play; reload the file from the start.
        if self.ended_sent {
            self.sink = None;
        }
        let sink = self.ensure_sink()?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = self.sink.as_ref() {
            sink.pause();
        }
    }

    fn seek_to(&mut self, fraction: f64) -> Result<(), PlaybackError> {
        self.ensure_sink()?;
        let target = clock::seek_target(fraction, self.duration_secs())
            .ok_or(PlaybackError::UnknownDuration)?;

        if let Some(sink) = self.sink.as_ref() {
            sink.try_seek(Duration::from_secs_f64(target))
                .map_err(|e| PlaybackError::Seek(e.to_string()))?;
        }
        self.ended_sent = false;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        let clamped_volume = volume.clamp(0.0, 1.0);
        self.config.volume = clamped_volume;

        if let Some(sink) = self.sink.as_ref() {
            sink.set_volume(clamped_volume);
        }
    }

    fn volume(&self) -> f32 {
        self.config.volume
    }

    fn tick(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };

        if sink.empty() {
            if !self.ended_sent {
                self.ended_sent = true;
                self.emit(PlayerEvent::Ended);
            }
            return;
        }

        if !sink.is_paused() {
            let current = sink.get_pos().as_secs_f64();
            self.emit(PlayerEvent::TimeUpdate {
                current,
                duration: self.duration_secs(),
            });
        }
    }
}

impl Drop for RodioPlayer {
    fn drop(&mut self) {
        if self.sink.is_some() {
            debug!("Stopping loaded track on shutdown");
        }
        self.stop_sink();
    }
}
