//! Resolve run metrics.
//!
//! Metrics are opt-in: [`crate::resolve`] stays allocation-lean, while
//! [`crate::resolve_verbose`] collects the counters here for debugging and
//! performance inspection of a polling tick.

use crate::Resolution;
use std::time::Duration;

/// Timing and counters for one resolve pass.
#[derive(Debug, Default, Clone)]
pub struct ResolveMetrics {
    /// Total elapsed time for the pass, including pattern compilation.
    pub total: Duration,
    /// Number of active rules after the inactive ones were dropped.
    pub rules_active: usize,
    /// Number of individual pattern tests performed.
    pub patterns_tested: usize,
    /// Number of file entries that matched at least one rule.
    pub files_matched: usize,
}

/// Resolver output bundled with run details.
#[derive(Debug, Clone)]
pub struct ResolveReport {
    /// One resolution per input file entry, same order.
    pub resolutions: Vec<Resolution>,
    /// Uids of the rules that were active for this pass.
    pub active_rules: Vec<String>,
    /// Timing measurements for the pass.
    pub metrics: ResolveMetrics,
}
