//! Pattern compilation and rule resolution engine.
//!
//! This module is the *public entry point* for the matching core. Everything
//! here is synchronous, side-effect-free, and owns no shared mutable state:
//! rule and label snapshots come in as plain parameters, resolutions come out
//! as plain values. The surrounding observer (out of scope for this crate)
//! re-runs a full resolve pass on every polling tick and applies the output
//! positionally to its own handles.
//!
//! ## How the parts work together
//!
//! ```text
//! rules + labels ──┐
//!                  │  CompiledRules::new          (resolve.rs)
//!                  │    - drop inactive rules
//!                  │    - compile each wildcard    (compile.rs)
//!                  └───────────────┬──────────────
//!                                  │
//! file entries ────────────────────┼─ per-entry match loop (resolve.rs)
//!                                  │    - any-pattern hit per rule
//!                                  │    - first valid label wins
//!                                  │    - actions union across rules
//!                                  v
//!                          Vec<Resolution>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compile.rs`: translates a wildcard pattern (`*`, `?`, `{a,b}`, `**/`)
//!   into an anchored, case-insensitive [`Matcher`]. Never fails.
//! - `matcher.rs`: the one-shot `matches(candidate, pattern)` entry point,
//!   backed by a process-wide compiled-matcher cache.
//! - `resolve.rs`: applies an ordered rule snapshot to an ordered list of
//!   file entries and emits one [`crate::Resolution`] per entry.
//! - `metrics.rs`: optional timing/counting data for verbose runs.
//!
//! ## Debugging
//!
//! Set `RULEMARK_DEBUG_RULES=1` to print per-entry match traces.

#[path = "engine/compile.rs"]
mod compile;
#[path = "engine/matcher.rs"]
mod matcher;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/resolve.rs"]
mod resolve;

pub use compile::Matcher;
pub use matcher::matches;
pub use metrics::{ResolveMetrics, ResolveReport};
pub use resolve::CompiledRules;
pub(crate) use resolve::{resolve_all, resolve_report};
