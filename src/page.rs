//! Page observation helpers.
//!
//! The DOM-facing observer lives outside this crate; these are the pure
//! pieces it needs: deciding whether a URL is a diff view worth observing,
//! decoding the navigation message that restarts its polling tick, and
//! picking which repository's rules apply to the current page.

use crate::model::Repository;
use serde::{Deserialize, Serialize};

/// A browser navigation message, `{"type": "urlChanged", "url": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NavigationEvent {
    UrlChanged { url: String },
}

/// True if `url` is a pull-request file list or a commit page, the two views
/// that render a per-file diff.
pub fn is_diff_page(url: &str) -> bool {
    regex!(r"^https://github\.com/.*/.*/(pull/.*/files|commit).*$").is_match(url)
}

/// Pick the repository whose `organization/name` key occurs in `url`.
pub fn repository_for_url<'a>(
    url: &str,
    repositories: &'a [Repository],
) -> Option<&'a Repository> {
    repositories.iter().find(|r| url.contains(&r.full_name()))
}
