extern crate self as rulemark;

#[macro_use]
mod macros;
mod api;
mod engine;

pub mod model;
pub mod page;
pub mod snapshot;
pub mod store;

pub use api::{ResolveMetrics, ResolveReport, matches, resolve, resolve_verbose};
pub use engine::{CompiledRules, Matcher};
pub use model::{Action, ActionSet, Label, Repository, Rule};
pub use snapshot::{Snapshot, SnapshotError};
pub use store::{Store, StoreError};

// --- Resolver input/output ---------------------------------------------------

/// One changed file observed in a diff view.
///
/// Only the identifying text (the rendered file path) participates in
/// matching. The observer keeps its own structural handles and pairs them
/// with resolutions positionally, so entry order is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// The file's identifying text, e.g. `src/app/index.ts`.
    pub text: String,
}

impl FileEntry {
    pub fn new(text: &str) -> Self {
        FileEntry { text: text.to_string() }
    }
}

impl From<&str> for FileEntry {
    fn from(text: &str) -> Self {
        FileEntry::new(text)
    }
}

/// The outcome for one file entry: at most one applied label (first matching
/// rule with a valid label wins) and the union of actions from every
/// matching active rule.
///
/// Applying a resolution must be idempotent on the observer's side: the
/// resolver recomputes from scratch each tick and does not track what has
/// already been applied to the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The label to render next to the file, if any.
    pub label: Option<Label>,
    /// Structural actions to apply to the file's diff section.
    pub actions: ActionSet,
}

impl Resolution {
    /// True when the entry matched nothing that has an effect.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.actions.is_empty()
    }
}
