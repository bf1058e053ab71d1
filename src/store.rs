//! In-memory store for repositories and labels.
//!
//! This models the user-data side that the engine consumes as read-only
//! snapshots: two top-level collections (`repositories`, `labels`) edited
//! only through explicit operations. How those collections get persisted
//! (browser sync storage in the original extension) is out of scope; this
//! type is the behavior behind whatever persistence sits in front of it.
//!
//! ## Invariants
//!
//! - Uids are unique within each collection; `add_*` rejects duplicates.
//! - Repositories stay sorted by `(organization, name)`, labels by text,
//!   and each repository's rules by creation time.
//! - Removing a label detaches it from every rule that referenced it; the
//!   rules themselves survive.
//! - Failed mutations leave the store untouched (validate before commit).

use crate::model::{Label, Repository, Rule};
use thiserror::Error;

/// Errors from store mutations and entity validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("a repository with id {0:?} already exists")]
    DuplicateRepository(String),
    #[error("no repository with id {0:?}")]
    UnknownRepository(String),
    #[error("a label with id {0:?} already exists")]
    DuplicateLabel(String),
    #[error("pattern {0:?} is already on this rule")]
    DuplicatePattern(String),
    #[error("{0:?} is not a hex color (expected #rgb or #rrggbb)")]
    InvalidColor(String),
    #[error("label text must not be empty")]
    EmptyLabelText,
}

/// The two user-data collections, kept sorted and uid-unique.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Store {
    repositories: Vec<Repository>,
    labels: Vec<Label>,
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn repository(&self, uid: &str) -> Option<&Repository> {
        self.repositories.iter().find(|r| r.uid == uid)
    }

    pub fn label(&self, uid: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.uid == uid)
    }

    // --- Repositories --------------------------------------------------------

    pub fn add_repository(&mut self, repository: Repository) -> Result<(), StoreError> {
        if self.repository(&repository.uid).is_some() {
            return Err(StoreError::DuplicateRepository(repository.uid));
        }
        self.repositories.push(repository);
        sort_repositories(&mut self.repositories);
        Ok(())
    }

    /// Replace the repository with the same uid (upsert).
    pub fn update_repository(&mut self, repository: Repository) {
        self.repositories.retain(|r| r.uid != repository.uid);
        self.repositories.push(repository);
        sort_repositories(&mut self.repositories);
    }

    pub fn remove_repository(&mut self, uid: &str) {
        self.repositories.retain(|r| r.uid != uid);
    }

    pub fn remove_all_repositories(&mut self) {
        self.repositories.clear();
    }

    // --- Rules ---------------------------------------------------------------

    /// Append `rule` to its owning repository's rule list.
    pub fn add_rule(&mut self, rule: Rule) -> Result<(), StoreError> {
        let repository = self.repository_mut(&rule.repository_uid)?;
        repository.rules.push(rule);
        sort_rules(&mut repository.rules);
        Ok(())
    }

    /// Replace the rule with the same uid within its owning repository.
    pub fn update_rule(&mut self, rule: Rule) -> Result<(), StoreError> {
        let repository = self.repository_mut(&rule.repository_uid)?;
        repository.rules.retain(|r| r.uid != rule.uid);
        repository.rules.push(rule);
        sort_rules(&mut repository.rules);
        Ok(())
    }

    pub fn remove_rule(&mut self, repository_uid: &str, rule_uid: &str) -> Result<(), StoreError> {
        let repository = self.repository_mut(repository_uid)?;
        repository.rules.retain(|r| r.uid != rule_uid);
        Ok(())
    }

    fn repository_mut(&mut self, uid: &str) -> Result<&mut Repository, StoreError> {
        self.repositories
            .iter_mut()
            .find(|r| r.uid == uid)
            .ok_or_else(|| StoreError::UnknownRepository(uid.to_string()))
    }

    // --- Labels --------------------------------------------------------------

    pub fn add_label(&mut self, label: Label) -> Result<(), StoreError> {
        if self.label(&label.uid).is_some() {
            return Err(StoreError::DuplicateLabel(label.uid));
        }
        self.labels.push(label);
        sort_labels(&mut self.labels);
        Ok(())
    }

    /// Replace the label with the same uid (upsert).
    pub fn update_label(&mut self, label: Label) {
        self.labels.retain(|l| l.uid != label.uid);
        self.labels.push(label);
        sort_labels(&mut self.labels);
    }

    /// Remove a label and detach it from every rule that referenced it.
    ///
    /// Rules are not deleted, only detached: their label effect becomes a
    /// no-op while their actions keep firing.
    pub fn remove_label(&mut self, uid: &str) {
        self.labels.retain(|l| l.uid != uid);

        for repository in &mut self.repositories {
            repository.rules = repository
                .rules
                .iter()
                .map(|rule| {
                    if rule.label_uid.as_deref() == Some(uid) {
                        rule.with_label(None)
                    } else {
                        rule.clone()
                    }
                })
                .collect();
        }
    }

    pub fn remove_all_labels(&mut self) {
        self.labels.clear();
    }

    // --- Bulk replacement (used by snapshot import) --------------------------

    /// Replace both collections wholesale after validating uid uniqueness.
    /// On error nothing is mutated.
    pub(crate) fn replace_all(
        &mut self,
        mut repositories: Vec<Repository>,
        mut labels: Vec<Label>,
    ) -> Result<(), StoreError> {
        ensure_unique(repositories.iter().map(|r| &r.uid), StoreError::DuplicateRepository)?;
        ensure_unique(labels.iter().map(|l| &l.uid), StoreError::DuplicateLabel)?;

        sort_repositories(&mut repositories);
        sort_labels(&mut labels);
        self.repositories = repositories;
        self.labels = labels;
        Ok(())
    }
}

fn ensure_unique<'a>(
    uids: impl Iterator<Item = &'a String>,
    err: fn(String) -> StoreError,
) -> Result<(), StoreError> {
    let mut seen = std::collections::HashSet::new();
    for uid in uids {
        if !seen.insert(uid) {
            return Err(err(uid.clone()));
        }
    }
    Ok(())
}

fn sort_repositories(repositories: &mut [Repository]) {
    repositories.sort_by(|a, b| a.full_name().cmp(&b.full_name()));
    for repository in repositories {
        sort_rules(&mut repository.rules);
    }
}

fn sort_rules(rules: &mut [Rule]) {
    rules.sort_by_key(|r| r.created);
}

fn sort_labels(labels: &mut [Label]) {
    labels.sort_by(|a, b| a.text.cmp(&b.text));
}
