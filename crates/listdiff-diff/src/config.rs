//! Alignment settings.
//!
//! Field diffs inside the aligner are always identity-guarded; the settings
//! here only change how misaligned slots are resolved.

use serde::{Deserialize, Serialize};

/// Tuning knobs for the list aligner.
///
/// Missing fields deserialize to their defaults, so a partial config such as
/// `{"lookahead": false}` is valid. Unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Resolve a known identity found one slot later in the alignment as
    /// modify-then-remove instead of a plain insertion.
    pub lookahead: bool,
    /// Remove simulated slots left unconsumed once the new list is
    /// exhausted. Turning this off reproduces older scripts that can leave
    /// stale records behind.
    pub remove_tail: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            lookahead: true,
            remove_tail: true,
        }
    }
}

impl DiffConfig {
    /// The canonical configuration (same as `Default`).
    pub fn canonical() -> Self {
        Self::default()
    }
}
