//! Rule resolution.
//!
//! Resolution is split into two phases, mirroring the compile-then-run shape
//! of the rest of the engine:
//!
//! 1. [`CompiledRules::new`] drops inactive rules and compiles every pattern
//!    once.
//! 2. [`CompiledRules::resolve_entry`] walks the compiled rules, in the order
//!    the caller gave them, for each file entry.
//!
//! Per entry, the algorithm is:
//!
//! - A rule matches if **any** of its patterns match the entry text; a rule
//!   with several matching patterns still contributes its effects only once.
//! - The first matching rule whose `labelUid` resolves to an existing label
//!   assigns that label. Later matches never override it.
//! - Actions union across **all** matching rules, so an entry can take its
//!   label from one rule and its collapse action from another.
//! - An entry matching zero rules yields an empty resolution. A dangling
//!   `labelUid` contributes the rule's actions but no label. Nothing here
//!   ever errors.
//!
//! The pass is a pure function of its inputs: running it twice over the same
//! snapshot yields structurally identical output, which is what lets the
//! observer re-run it from scratch on every polling tick.

use super::compile::Matcher;
use super::matcher;
use super::metrics::{ResolveMetrics, ResolveReport};
use crate::model::{ActionSet, Label, Rule};
use crate::{FileEntry, Resolution};
use std::time::Instant;

/// An active rule with its patterns compiled.
#[derive(Debug)]
struct CompiledRule<'a> {
    rule: &'a Rule,
    matchers: Vec<Matcher>,
}

/// A rule snapshot prepared for repeated per-entry evaluation.
///
/// Holds only active rules; order is preserved from the input slice, since
/// the resolver imposes no sort of its own.
#[derive(Debug)]
pub struct CompiledRules<'a> {
    rules: Vec<CompiledRule<'a>>,
    labels: &'a [Label],
}

impl<'a> CompiledRules<'a> {
    /// Compile the active subset of `rules` against the `labels` snapshot.
    pub fn new(rules: &'a [Rule], labels: &'a [Label]) -> Self {
        let compiled = rules
            .iter()
            .filter(|r| r.active)
            .map(|rule| CompiledRule {
                rule,
                // Pull from the process-wide cache: the observer re-runs this
                // every tick over a mostly unchanged rule set.
                matchers: rule.patterns.iter().map(|p| matcher::compiled(p)).collect(),
            })
            .collect();

        CompiledRules { rules: compiled, labels }
    }

    /// Uids of the rules that survived the active filter.
    pub fn active_rule_uids(&self) -> Vec<String> {
        self.rules.iter().map(|cr| cr.rule.uid.clone()).collect()
    }

    /// Resolve a single file entry against the compiled rule set.
    pub fn resolve_entry(&self, entry: &FileEntry) -> Resolution {
        self.resolve_entry_counted(entry).0
    }

    /// Resolve one entry, also reporting the number of pattern tests run and
    /// whether any rule matched (an entry can match a rule that carries
    /// neither label nor actions, which still counts as matched).
    fn resolve_entry_counted(&self, entry: &FileEntry) -> (Resolution, usize, bool) {
        let mut label: Option<Label> = None;
        let mut actions = ActionSet::empty();
        let mut tested = 0;
        let mut matched = false;

        for cr in &self.rules {
            let mut hit = false;
            for matcher in &cr.matchers {
                tested += 1;
                if matcher.test(&entry.text) {
                    hit = true;
                    break;
                }
            }
            if !hit {
                continue;
            }
            matched = true;

            if std::env::var_os("RULEMARK_DEBUG_RULES").is_some() {
                eprintln!("[resolve] rule={} entry={:?}", cr.rule.uid, entry.text);
            }

            if label.is_none() {
                if let Some(uid) = &cr.rule.label_uid {
                    if let Some(found) = self.find_label(uid) {
                        label = Some(found.clone());
                    }
                }
            }

            for action in &cr.rule.actions {
                actions |= action.mask();
            }
        }

        (Resolution { label, actions }, tested, matched)
    }

    fn find_label(&self, uid: &str) -> Option<&Label> {
        self.labels.iter().find(|l| l.uid == uid)
    }
}

/// Resolve every entry in `files`, producing one result per entry, same order.
pub(crate) fn resolve_all(
    files: &[FileEntry],
    rules: &[Rule],
    labels: &[Label],
) -> Vec<Resolution> {
    let compiled = CompiledRules::new(rules, labels);
    files.iter().map(|entry| compiled.resolve_entry(entry)).collect()
}

/// Like [`resolve_all`], but collects run details for inspection.
pub(crate) fn resolve_report(
    files: &[FileEntry],
    rules: &[Rule],
    labels: &[Label],
) -> ResolveReport {
    let started = Instant::now();
    let compiled = CompiledRules::new(rules, labels);

    let mut metrics = ResolveMetrics { rules_active: compiled.rules.len(), ..Default::default() };

    let resolutions: Vec<Resolution> = files
        .iter()
        .map(|entry| {
            let (resolution, tested, matched) = compiled.resolve_entry_counted(entry);
            metrics.patterns_tested += tested;
            if matched {
                metrics.files_matched += 1;
            }
            resolution
        })
        .collect();

    metrics.total = started.elapsed();

    ResolveReport { resolutions, active_rules: compiled.active_rule_uids(), metrics }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Action;
    use chrono::Utc;

    fn rule(uid: &str, patterns: &[&str], label_uid: Option<&str>, actions: &[Action]) -> Rule {
        let now = Utc::now();
        Rule {
            uid: uid.to_string(),
            repository_uid: "repo-1".to_string(),
            label_uid: label_uid.map(str::to_string),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            actions: actions.to_vec(),
            active: true,
            created: now,
            modified: now,
        }
    }

    fn label(uid: &str, text: &str) -> Label {
        let now = Utc::now();
        Label {
            uid: uid.to_string(),
            text: text.to_string(),
            color: "#ffffff".to_string(),
            background_color: "#007bff".to_string(),
            created: now,
            modified: now,
        }
    }

    fn entries(names: &[&str]) -> Vec<FileEntry> {
        names.iter().map(|n| FileEntry::new(n)).collect()
    }

    #[test]
    fn no_matching_rule_is_an_empty_resolution() {
        let rules = vec![rule("r1", &["*.rs"], Some("l1"), &[])];
        let labels = vec![label("l1", "rust")];

        let out = resolve_all(&entries(&["index.ts"]), &rules, &labels);
        assert_eq!(out.len(), 1);
        assert!(out[0].label.is_none());
        assert!(out[0].actions.is_empty());
        assert!(out[0].is_empty());
    }

    #[test]
    fn results_align_positionally_with_input() {
        let rules = vec![rule("r1", &["*.ts"], Some("l1"), &[])];
        let labels = vec![label("l1", "typescript")];

        let out = resolve_all(&entries(&["a.ts", "b.rs", "c.ts"]), &rules, &labels);
        assert_eq!(out.len(), 3);
        assert!(out[0].label.is_some());
        assert!(out[1].label.is_none());
        assert!(out[2].label.is_some());
    }

    #[test]
    fn first_matching_label_wins() {
        let rules = vec![
            rule("r1", &["src/*"], Some("l1"), &[]),
            rule("r2", &["*.ts"], Some("l2"), &[]),
        ];
        let labels = vec![label("l1", "source"), label("l2", "typescript")];

        let out = resolve_all(&entries(&["src/app.ts"]), &rules, &labels);
        assert_eq!(out[0].label.as_ref().map(|l| l.text.as_str()), Some("source"));
    }

    #[test]
    fn actions_union_across_matching_rules() {
        // Rule A: collapse, no matching label; rule B: label, no collapse.
        let rules = vec![
            rule("a", &["*.lock"], None, &[Action::CollapseFile]),
            rule("b", &["*.lock"], Some("l1"), &[]),
        ];
        let labels = vec![label("l1", "generated")];

        let out = resolve_all(&entries(&["Cargo.lock"]), &rules, &labels);
        assert_eq!(out[0].label.as_ref().map(|l| l.text.as_str()), Some("generated"));
        assert!(out[0].actions.contains(ActionSet::COLLAPSE_FILE));
    }

    #[test]
    fn inactive_rules_contribute_nothing() {
        let mut inactive = rule("r1", &["*"], Some("l1"), &[Action::CollapseFile]);
        inactive.active = false;
        let labels = vec![label("l1", "everything")];

        let out = resolve_all(&entries(&["any.ts"]), &[inactive], &labels);
        assert!(out[0].is_empty());
    }

    #[test]
    fn dangling_label_uid_contributes_actions_only() {
        let rules = vec![rule("r1", &["*.snap"], Some("gone"), &[Action::CollapseFile])];

        let out = resolve_all(&entries(&["ui.snap"]), &rules, &[]);
        assert!(out[0].label.is_none());
        assert!(out[0].actions.contains(ActionSet::COLLAPSE_FILE));
    }

    #[test]
    fn dangling_label_does_not_block_a_later_valid_one() {
        let rules = vec![
            rule("r1", &["*.ts"], Some("gone"), &[]),
            rule("r2", &["*.ts"], Some("l1"), &[]),
        ];
        let labels = vec![label("l1", "typescript")];

        let out = resolve_all(&entries(&["app.ts"]), &rules, &labels);
        assert_eq!(out[0].label.as_ref().map(|l| l.text.as_str()), Some("typescript"));
    }

    #[test]
    fn multiple_matching_patterns_contribute_once() {
        let rules = vec![rule("r1", &["*.ts", "app.*", "*"], None, &[Action::CollapseFile])];

        let out = resolve_all(&entries(&["app.ts"]), &rules, &[]);
        assert_eq!(out[0].actions, ActionSet::COLLAPSE_FILE);
    }

    #[test]
    fn empty_pattern_set_matches_nothing() {
        let rules = vec![rule("r1", &[], Some("l1"), &[Action::CollapseFile])];
        let labels = vec![label("l1", "never")];

        let out = resolve_all(&entries(&["anything"]), &rules, &labels);
        assert!(out[0].is_empty());
    }

    #[test]
    fn resolution_is_idempotent() {
        let rules = vec![
            rule("r1", &["*.test.ts"], Some("l1"), &[]),
            rule("r2", &["src/**/*"], Some("l2"), &[Action::CollapseFile]),
        ];
        let labels = vec![label("l1", "test")];
        let files = entries(&["src/app.test.ts", "README.md"]);

        let first = resolve_all(&files, &rules, &labels);
        let second = resolve_all(&files, &rules, &labels);
        assert_eq!(first, second);
    }

    #[test]
    fn end_to_end_scenario() {
        // First rule labels test files; second collapses everything under
        // src/ and points at a label that does not exist.
        let rules = vec![
            rule("r1", &["*.test.ts"], Some("L1"), &[]),
            rule("r2", &["src/**/*"], Some("L2"), &[Action::CollapseFile]),
        ];
        let labels = vec![label("L1", "test")];

        let out = resolve_all(&entries(&["src/app.test.ts"]), &rules, &labels);
        assert_eq!(out[0].label.as_ref().map(|l| l.text.as_str()), Some("test"));
        assert_eq!(out[0].actions, ActionSet::COLLAPSE_FILE);
    }

    #[test]
    fn report_counts_active_rules_and_matches() {
        let mut inactive = rule("off", &["*"], None, &[]);
        inactive.active = false;
        let rules =
            vec![rule("r1", &["*.ts"], Some("l1"), &[]), inactive, rule("r2", &["*.md"], None, &[])];
        let labels = vec![label("l1", "typescript")];

        let report = resolve_report(&entries(&["a.ts", "b.md", "c.png"]), &rules, &labels);
        assert_eq!(report.active_rules, vec!["r1".to_string(), "r2".to_string()]);
        assert_eq!(report.metrics.rules_active, 2);
        assert_eq!(report.metrics.files_matched, 2);
        assert!(report.metrics.patterns_tested >= 6);
        assert_eq!(report.resolutions.len(), 3);
    }
}
