//! Snapshot persistence for the ledger stores.
//!
//! A snapshot is the full enumeration of both stores as JSON. Saving writes a
//! temporary file next to the target and renames it into place, so a crash
//! mid-write never leaves a truncated snapshot behind.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use ticket_ledger_core::{Event, Nft};

/// Errors from snapshot operations.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Reading or writing the snapshot file failed
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] io::Error),
    /// The snapshot could not be encoded or decoded
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
    /// The temporary file could not be moved into place
    #[error("failed to persist snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
    /// The blocking save task panicked or was cancelled
    #[error("snapshot task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Full contents of both ledger stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Every stored event, in key order
    pub events: Vec<Event>,
    /// Every stored ticket, in key order
    pub nfts: Vec<Nft>,
}

impl LedgerSnapshot {
    /// Load a snapshot from `path`.
    ///
    /// Returns `Ok(None)` if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file cannot be read or decoded.
    pub fn load(path: &Path) -> Result<Option<Self>, SnapshotError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Atomically write this snapshot to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] if the file cannot be written or renamed into place.
    pub fn save(&self, path: &Path) -> Result<(), SnapshotError> {
        let dir = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        serde_json::to_writer_pretty(&mut tmp, self)?;
        tmp.write_all(b"\n")?;
        tmp.as_file().sync_all()?;
        tmp.persist(path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use tempfile::tempdir;
    use ticket_ledger_core::{EventId, EventPayload, NftId};

    fn sample() -> LedgerSnapshot {
        let payload = EventPayload {
            event_name: "Gig".to_string(),
            asset_description: "desc".to_string(),
            owner_id: "owner".to_string(),
            status: "active".to_string(),
            max_nfts: "1".to_string(),
            ..EventPayload::default()
        };
        let event = Event::from_payload(EventId::new(), payload).unwrap();
        let nft = Nft::minted_for(NftId::new(), &event);
        LedgerSnapshot {
            events: vec![event],
            nfts: vec![nft],
        }
    }

    #[test]
    fn load_missing_file_is_none() {
        let dir = tempdir().unwrap();
        assert!(LedgerSnapshot::load(&dir.path().join("absent.json"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn save_then_load_restores_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        let snapshot = sample();

        snapshot.save(&path).unwrap();

        assert_eq!(LedgerSnapshot::load(&path).unwrap(), Some(snapshot));
    }

    #[test]
    fn corrupt_file_is_a_json_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        fs::write(&path, b"{ not json").unwrap();

        assert!(matches!(
            LedgerSnapshot::load(&path),
            Err(SnapshotError::Json(_))
        ));
    }
}
