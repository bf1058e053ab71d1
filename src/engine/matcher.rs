//! One-shot file matching.
//!
//! [`matches`] is the pure entry point used by callers that do not want to
//! manage [`Matcher`] lifetimes themselves. Compiling a wildcard on every
//! call would be wasteful on a polling loop that re-tests the same handful
//! of patterns every tick, so compiled matchers are cached process-wide,
//! keyed by the pattern string. The cache is a pure optimization: observable
//! behavior is identical to compiling fresh each call.

use super::compile::Matcher;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::Mutex;

static MATCHER_CACHE: Lazy<Mutex<HashMap<String, Matcher>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Test `candidate` against the wildcard `pattern`.
pub fn matches(candidate: &str, pattern: &str) -> bool {
    compiled(pattern).test(candidate)
}

/// Fetch the cached matcher for `pattern`, compiling it on first use.
pub(crate) fn compiled(pattern: &str) -> Matcher {
    let mut cache = match MATCHER_CACHE.lock() {
        Ok(guard) => guard,
        // A poisoned lock only means another thread panicked mid-insert;
        // the map itself is still usable.
        Err(poisoned) => poisoned.into_inner(),
    };

    cache.entry(pattern.to_string()).or_insert_with(|| Matcher::compile(pattern)).clone()
}
