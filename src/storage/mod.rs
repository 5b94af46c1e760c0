// Playlist persistence - the whole track list lives in one string-keyed JSON blob
// The cursor is never stored; a reload always starts on the first track

mod blob;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};

use crate::audio::{Playlist, Track};
use thiserror::Error;
use tracing::{info, warn};

/// Key the playlist blob is stored under.
pub const STORAGE_KEY: &str = "mp_songs";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("saved playlist is malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub fn encode(tracks: &[Track]) -> Result<String, StorageError> {
    Ok(serde_json::to_string(tracks)?)
}

pub fn decode(blob: &str) -> Result<Vec<Track>, StorageError> {
    Ok(serde_json::from_str(blob)?)
}

/// Restore the playlist, falling back to the built-in defaults when nothing
/// usable is stored. Never fails: unreadable or malformed data is logged and
/// treated as absent.
pub fn load_playlist(store: &dyn BlobStore, key: &str) -> Playlist {
    let blob = match store.load(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            info!("No saved playlist under '{}', using defaults", key);
            return Playlist::with_defaults();
        }
        Err(e) => {
            warn!("Could not read saved playlist '{}': {}", key, e);
            return Playlist::with_defaults();
        }
    };

    match decode(&blob) {
        Ok(tracks) => {
            info!("Restored {} tracks from '{}'", tracks.len(), key);
            Playlist::new(tracks)
        }
        Err(e) => {
            warn!("Could not parse saved songs, using defaults: {}", e);
            Playlist::with_defaults()
        }
    }
}

/// Replace the stored blob with the current track list.
pub fn save_playlist(
    store: &dyn BlobStore,
    key: &str,
    playlist: &Playlist,
) -> Result<(), StorageError> {
    let blob = encode(playlist.tracks())?;
    store.save(key, &blob)?;
    info!("Saved {} tracks to '{}'", playlist.len(), key);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{default_tracks, TrackDraft, PLACEHOLDER_COVER};

    #[test]
    fn test_round_trip_preserves_tracks_and_resets_cursor() {
        let store = MemoryBlobStore::new();
        let mut playlist = Playlist::with_defaults();
        playlist.add(TrackDraft::new("X", "Y", "a.mp3", ""));
        playlist.toggle_trending(1).unwrap();
        playlist.select(3).unwrap();

        save_playlist(&store, STORAGE_KEY, &playlist).unwrap();
        let restored = load_playlist(&store, STORAGE_KEY);

        assert_eq!(restored.tracks(), playlist.tracks());
        assert_eq!(restored.active_index(), Some(0));
    }

    #[test]
    fn test_missing_blob_uses_defaults() {
        let store = MemoryBlobStore::new();
        let playlist = load_playlist(&store, STORAGE_KEY);
        assert_eq!(playlist.tracks(), default_tracks().as_slice());
        assert_eq!(playlist.active_index(), Some(0));
    }

    #[test]
    fn test_malformed_blob_uses_defaults() {
        for junk in ["not json", "{\"title\":\"x\"}", "[{\"title\":\"x\"}]", "[1,2]"] {
            let store = MemoryBlobStore::with_blob(STORAGE_KEY, junk);
            let playlist = load_playlist(&store, STORAGE_KEY);
            assert_eq!(playlist.len(), 3, "blob {junk:?} should fall back");
        }
    }

    struct UnreadableStore;

    impl BlobStore for UnreadableStore {
        fn load(&self, _key: &str) -> std::io::Result<Option<String>> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"))
        }

        fn save(&self, _key: &str, _blob: &str) -> std::io::Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
        }
    }

    #[test]
    fn test_read_error_uses_defaults() {
        let playlist = load_playlist(&UnreadableStore, STORAGE_KEY);
        assert_eq!(playlist.tracks(), default_tracks().as_slice());
        assert_eq!(playlist.active_index(), Some(0));
    }

    #[test]
    fn test_write_error_is_returned() {
        let err = save_playlist(&UnreadableStore, STORAGE_KEY, &Playlist::with_defaults())
            .unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
        assert_eq!(err.to_string(), "storage I/O failed: disk full");
    }

    #[test]
    fn test_saved_empty_list_stays_empty() {
        let store = MemoryBlobStore::with_blob(STORAGE_KEY, "[]");
        let playlist = load_playlist(&store, STORAGE_KEY);
        assert!(playlist.is_empty());
        assert_eq!(playlist.active_index(), None);
    }

    #[test]
    fn test_on_disk_layout() {
        let tracks = vec![Track::new("T", "A", "music/t.mp3")];
        let blob = encode(&tracks).unwrap();
        assert_eq!(
            blob,
            format!(
                "[{{\"title\":\"T\",\"artist\":\"A\",\"src\":\"music/t.mp3\",\"cover\":\"{}\",\"trending\":false}}]",
                PLACEHOLDER_COVER
            )
        );
    }

    #[test]
    fn test_records_missing_fields_are_malformed() {
        let no_trending = "[{\"title\":\"T\",\"artist\":\"A\",\"src\":\"t.mp3\",\"cover\":\"c.jpg\"}]";
        let no_cover = "[{\"title\":\"T\",\"artist\":\"A\",\"src\":\"t.mp3\",\"trending\":true}]";

        for blob in [no_trending, no_cover] {
            assert!(matches!(decode(blob), Err(StorageError::Malformed(_))));
            let store = MemoryBlobStore::with_blob(STORAGE_KEY, blob);
            assert_eq!(load_playlist(&store, STORAGE_KEY).tracks(), default_tracks().as_slice());
        }
    }
}
