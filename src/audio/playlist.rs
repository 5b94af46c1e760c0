use thiserror::Error;
use tracing::{debug, info};

use super::track::{default_tracks, Track, TrackDraft};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaylistError {
    #[error("track index {index} is out of range for a playlist of {len} tracks")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Which way `advance` moves the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// How the cursor reacted to a delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Removal {
    /// The active track was removed, cursor went back to the first track.
    ActiveRemoved,
    /// A track before the active one was removed, cursor shifted left with it.
    Shifted,
    /// A track after the active one was removed.
    Unchanged,
    /// The last track was removed.
    Emptied,
}

/// Ordered tracks plus the active cursor.
///
/// Whenever `tracks` is non-empty `active` is `Some(i)` with `i < tracks.len()`,
/// and `None` otherwise. Every mutation below keeps that true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
    active: Option<usize>,
}

impl Playlist {
    /// Build a playlist with the cursor on the first track (if any).
    pub fn new(tracks: Vec<Track>) -> Self {
        let active = if tracks.is_empty() { None } else { Some(0) };
        Self { tracks, active }
    }

    pub fn with_defaults() -> Self {
        Self::new(default_tracks())
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_track(&self) -> Option<&Track> {
        self.active.and_then(|idx| self.tracks.get(idx))
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Append a track from form input.
    ///
    /// Returns `false` (and changes nothing) when a required field is blank.
    pub fn add(&mut self, draft: TrackDraft) -> bool {
        let Some(track) = draft.into_track() else {
            debug!("Rejected track draft with blank required fields");
            return false;
        };

        info!("Added track '{}' at position {}", track.display_title(), self.tracks.len());
        self.tracks.push(track);
        if self.active.is_none() {
            self.active = Some(0);
        }
        true
    }

    /// Remove the track at `index` and re-aim the cursor.
    pub fn delete(&mut self, index: usize) -> Result<Removal, PlaylistError> {
        self.check_index(index)?;

        let removed = self.tracks.remove(index);
        info!("Deleted track '{}' from position {}", removed.display_title(), index);

        if self.tracks.is_empty() {
            self.active = None;
            return Ok(Removal::Emptied);
        }

        let active = self.active.unwrap_or(0);
        let removal = if index == active {
            self.active = Some(0);
            Removal::ActiveRemoved
        } else if index < active {
            self.active = Some(active - 1);
            Removal::Shifted
        } else {
            Removal::Unchanged
        };
        Ok(removal)
    }

    /// Flip the trending flag, returning the new value.
    pub fn toggle_trending(&mut self, index: usize) -> Result<bool, PlaylistError> {
        self.check_index(index)?;
        let track = &mut self.tracks[index];
        track.trending = !track.trending;
        debug!("Track {} trending={}", index, track.trending);
        Ok(track.trending)
    }

    pub fn select(&mut self, index: usize) -> Result<(), PlaylistError> {
        self.check_index(index)?;
        self.active = Some(index);
        Ok(())
    }

    /// Move the cursor circularly. Returns the new index, or `None` when empty.
    pub fn advance(&mut self, direction: Direction) -> Option<usize> {
        let len = self.tracks.len();
        if len == 0 {
            return None;
        }

        let current = self.active.unwrap_or(0);
        let next = match direction {
            Direction::Next => (current + 1) % len,
            Direction::Previous => (current + len - 1) % len,
        };
        self.active = Some(next);
        Some(next)
    }

    fn check_index(&self, index: usize) -> Result<(), PlaylistError> {
        if index < self.tracks.len() {
            Ok(())
        } else {
            Err(PlaylistError::IndexOutOfRange {
                index,
                len: self.tracks.len(),
            })
        }
    }
}

impl Default for Playlist {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playlist_of(n: usize) -> Playlist {
        Playlist::new(
            (0..n)
                .map(|i| Track::new(format!("T{i}"), "A", format!("{i}.mp3")))
                .collect(),
        )
    }

    fn titles(playlist: &Playlist) -> Vec<&str> {
        playlist.tracks().iter().map(|t| t.title.as_str()).collect()
    }

    fn assert_cursor_valid(playlist: &Playlist) {
        match playlist.active_index() {
            Some(idx) => assert!(idx < playlist.len()),
            None => assert!(playlist.is_empty()),
        }
    }

    #[test]
    fn test_delete_active_resets_cursor() {
        let mut playlist = playlist_of(3);
        assert_eq!(playlist.delete(0), Ok(Removal::ActiveRemoved));
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.active_index(), Some(0));
    }

    #[test]
    fn test_delete_before_active_shifts_cursor() {
        let mut playlist = playlist_of(3);
        playlist.select(2).unwrap();
        assert_eq!(playlist.delete(0), Ok(Removal::Shifted));
        assert_eq!(playlist.len(), 2);
        assert_eq!(playlist.active_index(), Some(1));
        assert_eq!(playlist.active_track().unwrap().title, "T2");
    }

    #[test]
    fn test_delete_after_active_keeps_cursor() {
        let mut playlist = playlist_of(3);
        playlist.select(1).unwrap();
        assert_eq!(playlist.delete(2), Ok(Removal::Unchanged));
        assert_eq!(playlist.active_index(), Some(1));
    }

    #[test]
    fn test_delete_active_non_first_goes_to_first() {
        let mut playlist = playlist_of(4);
        playlist.select(2).unwrap();
        assert_eq!(playlist.delete(2), Ok(Removal::ActiveRemoved));
        assert_eq!(playlist.active_index(), Some(0));
        assert_eq!(titles(&playlist), vec!["T0", "T1", "T3"]);
    }

    #[test]
    fn test_delete_last_track_empties_cursor() {
        let mut playlist = playlist_of(1);
        assert_eq!(playlist.delete(0), Ok(Removal::Emptied));
        assert!(playlist.is_empty());
        assert_eq!(playlist.active_index(), None);
        assert!(playlist.active_track().is_none());
    }

    #[test]
    fn test_delete_preserves_order_of_others() {
        for i in 0..5 {
            let mut playlist = playlist_of(5);
            let mut expected: Vec<String> = (0..5).map(|n| format!("T{n}")).collect();
            expected.remove(i);

            playlist.delete(i).unwrap();
            assert_eq!(playlist.len(), 4);
            assert_eq!(titles(&playlist), expected);
        }
    }

    #[test]
    fn test_delete_out_of_range_is_rejected() {
        let mut playlist = playlist_of(2);
        assert_eq!(
            playlist.delete(2),
            Err(PlaylistError::IndexOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn test_add_appends_without_moving_cursor() {
        let mut playlist = playlist_of(2);
        playlist.select(1).unwrap();
        assert!(playlist.add(TrackDraft::new("X", "Y", "a.mp3", "")));
        assert_eq!(playlist.len(), 3);
        assert_eq!(playlist.active_index(), Some(1));
        assert_eq!(playlist.get(2).unwrap().cover, crate::audio::PLACEHOLDER_COVER);
        assert!(!playlist.get(2).unwrap().trending);
    }

    #[test]
    fn test_add_blank_title_is_noop() {
        let mut playlist = playlist_of(2);
        assert!(!playlist.add(TrackDraft::new("", "Y", "a.mp3", "")));
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn test_add_to_empty_positions_cursor() {
        let mut playlist = Playlist::new(Vec::new());
        assert_eq!(playlist.active_index(), None);
        assert!(playlist.add(TrackDraft::new("X", "Y", "a.mp3", "")));
        assert_eq!(playlist.active_index(), Some(0));
    }

    #[test]
    fn test_toggle_trending_leaves_cursor() {
        let mut playlist = playlist_of(3);
        playlist.select(2).unwrap();
        assert_eq!(playlist.toggle_trending(0), Ok(true));
        assert_eq!(playlist.toggle_trending(0), Ok(false));
        assert_eq!(playlist.active_index(), Some(2));
    }

    #[test]
    fn test_advance_wraps_both_ways() {
        let mut playlist = playlist_of(3);
        assert_eq!(playlist.advance(Direction::Previous), Some(2));
        assert_eq!(playlist.advance(Direction::Next), Some(0));
        assert_eq!(playlist.advance(Direction::Next), Some(1));
    }

    #[test]
    fn test_advance_next_len_times_is_identity() {
        for len in 1..6 {
            let mut playlist = playlist_of(len);
            playlist.select(len / 2).unwrap();
            let start = playlist.active_index();
            for _ in 0..len {
                playlist.advance(Direction::Next);
            }
            assert_eq!(playlist.active_index(), start);
        }
    }

    #[test]
    fn test_advance_on_empty_is_noop() {
        let mut playlist = Playlist::new(Vec::new());
        assert_eq!(playlist.advance(Direction::Next), None);
        assert_eq!(playlist.active_index(), None);
    }

    #[test]
    fn test_cursor_invariant_over_mixed_operations() {
        let mut playlist = playlist_of(3);
        // deterministic sequence that walks the list down to empty and back up
        let steps: [u8; 16] = [2, 0, 3, 1, 0, 2, 0, 1, 0, 0, 3, 1, 0, 0, 2, 1];
        for (n, step) in steps.iter().enumerate() {
            match step {
                0 => {
                    if !playlist.is_empty() {
                        playlist.delete(n % playlist.len()).unwrap();
                    }
                }
                1 => {
                    playlist.add(TrackDraft::new("N", "A", "n.mp3", ""));
                }
                2 => {
                    if !playlist.is_empty() {
                        playlist.select(n % playlist.len()).unwrap();
                    }
                }
                _ => {
                    playlist.advance(Direction::Previous);
                }
            }
            assert_cursor_valid(&playlist);
        }
    }
}
