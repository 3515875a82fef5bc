//! Idempotent lazy publication.
//!
//! Derived data (line tables, root facade nodes) is computed at most once per
//! owner *in effect*: racing threads may each compute a candidate, but exactly
//! one is published and every caller observes that same value.

use std::sync::OnceLock;

/// Return the published value in `cell`, computing it with `init` if absent.
///
/// `init` runs without holding any lock. When two threads race, the first to
/// publish wins and the loser's value is dropped; both return the winner.
pub fn publish_once<T>(cell: &OnceLock<T>, init: impl FnOnce() -> T) -> &T {
    if let Some(value) = cell.get() {
        return value;
    }
    let candidate = init();
    cell.get_or_init(move || candidate)
}
