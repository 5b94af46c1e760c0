use crate::audio::TrackDraft;

/// Everything the UI can ask the player to do.
///
/// Row-level commands address tracks by their current position in the playlist.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(usize),
    Delete(usize),
    ToggleTrending(usize),
    Add(TrackDraft),
    TogglePlayPause,
    Next,
    Previous,
    /// Seek to a fraction (0..=1) of the current track.
    SeekFraction(f64),
    SetVolume(f32),
    /// Relative volume change, e.g. `+0.1`.
    AdjustVolume(f32),
    Quit,
}

/// Result of running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// Validation said no (blank add-form fields). Nothing changed.
    Rejected,
    Quit,
}

/// The per-row buttons of the playlist view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Set,
    Trending,
    Delete,
}

impl RowAction {
    pub const ALL: [RowAction; 3] = [RowAction::Set, RowAction::Trending, RowAction::Delete];

    pub fn command(self, index: usize) -> Command {
        match self {
            RowAction::Set => Command::Select(index),
            RowAction::Trending => Command::ToggleTrending(index),
            RowAction::Delete => Command::Delete(index),
        }
    }

    /// Button face for this action on a row with the given trending flag.
    pub fn label(self, trending: bool) -> &'static str {
        match self {
            RowAction::Set => "Set",
            RowAction::Trending if trending => "★",
            RowAction::Trending => "☆",
            RowAction::Delete => "✕",
        }
    }

    pub fn key_hint(self) -> char {
        match self {
            RowAction::Set => 's',
            RowAction::Trending => 't',
            RowAction::Delete => 'd',
        }
    }
}
