// Screen view model - a plain snapshot of what should be on screen
// Built fresh from the controller each frame so drawing never touches live state

use anyhow::Result;

use super::form::AddForm;
use crate::audio::{Playback, Progress};
use crate::controller::{Controller, NowPlaying};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub index: usize,
    pub title: String,
    pub artist: String,
    pub trending: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub rows: Vec<ListRow>,
    pub now_playing: Option<NowPlaying>,
    pub progress: Progress,
    pub is_playing: bool,
    pub volume: f32,
    /// Row under the keyboard highlight (not the same thing as the active track).
    pub highlighted: usize,
    pub status: Option<String>,
    pub show_help: bool,
}

impl Screen {
    pub fn build<P: Playback>(controller: &Controller<P>) -> Self {
        let playlist = controller.playlist();
        let active = playlist.active_index();

        let rows = playlist
            .tracks()
            .iter()
            .enumerate()
            .map(|(index, track)| ListRow {
                index,
                title: track.title.clone(),
                artist: track.artist.clone(),
                trending: track.trending,
                active: active == Some(index),
            })
            .collect();

        Self {
            rows,
            now_playing: controller.now_playing().cloned(),
            progress: controller.progress(),
            is_playing: controller.is_playing(),
            volume: controller.volume(),
            ..Self::default()
        }
    }

    pub fn active_row(&self) -> Option<&ListRow> {
        self.rows.iter().find(|row| row.active)
    }
}

/// Screen-space rectangle of an interactive widget, in terminal cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitBox {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl HitBox {
    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height)
    }

    /// Horizontal position of `column` inside the box, in 0..1 (never 1 itself).
    pub fn fraction_at(&self, column: u16, row: u16) -> Option<f64> {
        if !self.contains(column, row) {
            return None;
        }
        Some(f64::from(column - self.x) / f64::from(self.width))
    }
}

/// A visible playlist row and the cells it occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowHit {
    pub index: usize,
    pub area: HitBox,
}

/// Where clickable widgets landed on the last frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutHits {
    pub progress: Option<HitBox>,
    /// Only rows currently scrolled into view.
    pub rows: Vec<RowHit>,
}

impl LayoutHits {
    /// Playlist index of the row drawn at this cell, if any.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|hit| hit.area.contains(column, row))
            .map(|hit| hit.index)
    }
}

/// Something that can put a `Screen` in front of the user.
pub trait Renderer {
    fn present(&mut self, screen: &Screen, form: &AddForm) -> Result<LayoutHits>;
}
