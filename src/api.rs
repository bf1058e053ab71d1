use crate::engine;
use crate::model::{Label, Rule};
use crate::{FileEntry, Resolution};

pub use crate::engine::{ResolveMetrics, ResolveReport};

/// Test a candidate file path against a wildcard pattern.
///
/// Patterns support `*` (any run of characters), `?` (one character),
/// `{a,b}` alternation, and `**/` (zero or more path segments). Matching is
/// case-insensitive and anchored to the whole candidate.
///
/// # Example
/// ```
/// use rulemark::matches;
///
/// assert!(matches("src/index.ts", "src/*.ts"));
/// assert!(matches("component.tsx", "*.{ts,tsx}"));
/// assert!(!matches("component.js", "*.{ts,tsx}"));
/// ```
pub fn matches(candidate: &str, pattern: &str) -> bool {
    engine::matches(candidate, pattern)
}

/// Resolve `files` against a repository's `rules` and the `labels` snapshot.
///
/// Returns one [`Resolution`] per input entry, in the same order, so callers
/// can pair results positionally with their own structural handles. Rules are
/// evaluated in the order given; the resolver imposes no sort of its own.
///
/// This never fails: entries that match nothing yield empty resolutions, and
/// a rule whose label reference dangles simply contributes no label.
pub fn resolve(files: &[FileEntry], rules: &[Rule], labels: &[Label]) -> Vec<Resolution> {
    engine::resolve_all(files, rules, labels)
}

/// Like [`resolve`], but also returns timing and match counters.
///
/// Useful for profiling a polling tick or debugging why a rule did (or did
/// not) fire. The plain [`resolve`] path does not collect these.
pub fn resolve_verbose(files: &[FileEntry], rules: &[Rule], labels: &[Label]) -> ResolveReport {
    engine::resolve_report(files, rules, labels)
}
