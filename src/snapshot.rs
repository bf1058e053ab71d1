//! JSON snapshot import/export.
//!
//! The snapshot is the boundary format for backing up and restoring user
//! data: a single pretty-printed JSON document with the two top-level
//! collections, `{ "labels": [...], "repositories": [...] }`. Export is a
//! verbatim dump of the store; import **appends** the snapshot's entries to
//! the existing collections and fails (leaving the store untouched) if any
//! uid would collide.

use crate::model::{Label, Repository};
use crate::store::{Store, StoreError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while importing a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid snapshot JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A full dump of user data, in the original extension's JSON shape.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub labels: Vec<Label>,
    pub repositories: Vec<Repository>,
}

impl Snapshot {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }
}

impl Store {
    /// Dump the current collections verbatim.
    pub fn export(&self) -> Snapshot {
        Snapshot { labels: self.labels().to_vec(), repositories: self.repositories().to_vec() }
    }

    /// Append a snapshot's entries to the existing collections.
    ///
    /// The combined collections must stay uid-unique; on any collision the
    /// store is left exactly as it was.
    pub fn import(&mut self, snapshot: Snapshot) -> Result<(), SnapshotError> {
        let mut repositories = self.repositories().to_vec();
        repositories.extend(snapshot.repositories);
        let mut labels = self.labels().to_vec();
        labels.extend(snapshot.labels);

        self.replace_all(repositories, labels)?;
        Ok(())
    }
}
