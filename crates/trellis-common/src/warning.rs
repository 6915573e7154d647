//! Deduplicated warnings routed through the `log` facade.
//!
//! Style resolution runs on every recomputation pass, so a malformed value
//! would otherwise be reported once per pass. Each unique
//! `(component, message)` pair is logged exactly once until
//! [`clear_warnings`] is called.

use std::collections::HashSet;

use parking_lot::{Mutex, const_mutex};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = const_mutex(None);

fn warning_key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Warn about unsupported or malformed input (logged once per unique message)
///
/// # Example
/// ```
/// trellis_common::warning::warn_once("style", "expected a length for `width`");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let should_log = WARNED
        .lock()
        .get_or_insert_with(HashSet::new)
        .insert(warning_key(component, message));

    if should_log {
        log::warn!(target: "trellis", "[{component}] {message}");
    }
}

/// Returns true if this exact warning has been emitted since the last
/// [`clear_warnings`].
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .as_ref()
        .is_some_and(|set| set.contains(&warning_key(component, message)))
}

/// Clear all recorded warnings (call when a tree is rebuilt from scratch)
pub fn clear_warnings() {
    if let Some(set) = WARNED.lock().as_mut() {
        set.clear();
    }
}
