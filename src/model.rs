//! User-entered entities: labels, rules, repositories.
//!
//! These are the read-only snapshots the engine consumes. They mirror the
//! JSON shape used by the snapshot format (camelCase keys, string uids,
//! RFC 3339 timestamps), so a `Snapshot` round-trips verbatim.
//!
//! ## Design notes
//!
//! - `Rule` is an immutable value: every edit helper (`with_pattern_added`,
//!   `with_action_toggled`, ...) returns a new `Rule` with `modified`
//!   refreshed. Display and storage layers therefore never alias a rule they
//!   could mutate out from under each other.
//! - Validation that belongs to input time lives here (hex colors, duplicate
//!   patterns); the resolver assumes it already happened and never re-checks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StoreError;

// --- Actions -----------------------------------------------------------------

/// A structural action a rule can request for a matched file.
///
/// There is currently exactly one: collapsing the file's diff section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    CollapseFile,
}

impl Action {
    /// The bitmask equivalent, used when accumulating actions per file.
    pub fn mask(self) -> ActionSet {
        match self {
            Action::CollapseFile => ActionSet::COLLAPSE_FILE,
        }
    }
}

bitflags::bitflags! {
    /// Accumulated actions for one resolved file.
    ///
    /// Actions union across all matching active rules, so a set (rather than
    /// a first-wins slot) is the right shape here.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ActionSet: u8 {
        const COLLAPSE_FILE = 1 << 0;
    }
}

impl FromIterator<Action> for ActionSet {
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        iter.into_iter().fold(ActionSet::empty(), |set, a| set | a.mask())
    }
}

// --- Label -------------------------------------------------------------------

/// A display label: text plus foreground/background colors.
///
/// Labels are lifecycled independently of rules; a rule references one by uid
/// and tolerates the reference dangling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub uid: String,
    pub text: String,
    /// Foreground (text) color, `#rgb` or `#rrggbb`.
    pub color: String,
    /// Background color, `#rgb` or `#rrggbb`.
    pub background_color: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Label {
    /// Create a label with a fresh uid, validating text and colors.
    pub fn new(text: &str, color: &str, background_color: &str) -> Result<Self, StoreError> {
        if text.is_empty() {
            return Err(StoreError::EmptyLabelText);
        }
        validate_hex_color(color)?;
        validate_hex_color(background_color)?;

        let now = Utc::now();
        Ok(Label {
            uid: Uuid::new_v4().to_string(),
            text: text.to_string(),
            color: color.to_string(),
            background_color: background_color.to_string(),
            created: now,
            modified: now,
        })
    }
}

fn validate_hex_color(value: &str) -> Result<(), StoreError> {
    if regex!(r"^#(?:[0-9a-fA-F]{3}){1,2}$").is_match(value) {
        Ok(())
    } else {
        Err(StoreError::InvalidColor(value.to_string()))
    }
}

// --- Rule --------------------------------------------------------------------

/// One pattern-set binding scoped to a repository.
///
/// An inactive rule never contributes to resolution output. The pattern list
/// is semantically a set (duplicates rejected at input time); its order only
/// matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    pub uid: String,
    pub repository_uid: String,
    /// Referenced label, if any. `None` means "no label applied"; a uid that
    /// no longer resolves to a label means the same thing at resolve time.
    pub label_uid: Option<String>,
    pub patterns: Vec<String>,
    pub actions: Vec<Action>,
    pub active: bool,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Rule {
    /// Create an empty, active rule for `repository_uid` with a fresh uid.
    pub fn new(repository_uid: &str, label_uid: Option<String>) -> Self {
        let now = Utc::now();
        Rule {
            uid: Uuid::new_v4().to_string(),
            repository_uid: repository_uid.to_string(),
            label_uid,
            patterns: Vec::new(),
            actions: Vec::new(),
            active: true,
            created: now,
            modified: now,
        }
    }

    /// Return a copy with `pattern` appended. Duplicate patterns are rejected.
    pub fn with_pattern_added(&self, pattern: &str) -> Result<Self, StoreError> {
        if self.patterns.iter().any(|p| p == pattern) {
            return Err(StoreError::DuplicatePattern(pattern.to_string()));
        }
        let mut next = self.touched();
        next.patterns.push(pattern.to_string());
        Ok(next)
    }

    /// Return a copy with `pattern` removed (no-op if absent).
    pub fn with_pattern_removed(&self, pattern: &str) -> Self {
        let mut next = self.touched();
        next.patterns.retain(|p| p != pattern);
        next
    }

    /// Return a copy with `action` toggled on or off.
    pub fn with_action_toggled(&self, action: Action) -> Self {
        let mut next = self.touched();
        if let Some(pos) = next.actions.iter().position(|a| *a == action) {
            next.actions.remove(pos);
        } else {
            next.actions.push(action);
        }
        next
    }

    /// Return a copy with the active flag set to `active`.
    pub fn with_active(&self, active: bool) -> Self {
        let mut next = self.touched();
        next.active = active;
        next
    }

    /// Return a copy referencing `label_uid` (or detached, for `None`).
    pub fn with_label(&self, label_uid: Option<String>) -> Self {
        let mut next = self.touched();
        next.label_uid = label_uid;
        next
    }

    fn touched(&self) -> Self {
        let mut next = self.clone();
        next.modified = Utc::now();
        next
    }
}

// --- Repository --------------------------------------------------------------

/// A repository and its ordered rule collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub uid: String,
    pub organization: String,
    pub name: String,
    pub rules: Vec<Rule>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl Repository {
    /// Create a repository with a fresh uid and no rules.
    pub fn new(organization: &str, name: &str) -> Self {
        let now = Utc::now();
        Repository {
            uid: Uuid::new_v4().to_string(),
            organization: organization.to_string(),
            name: name.to_string(),
            rules: Vec::new(),
            created: now,
            modified: now,
        }
    }

    /// The `organization/name` key used for display and URL matching.
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.organization, self.name)
    }
}
