//! Deduplicated warnings routed through the `log` facade.
//!
//! Selector strings are often built in loops, so the same unsupported
//! construct can show up thousands of times. Each distinct message is
//! reported once until [`clear_warnings`] is called.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings we've already emitted (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about unsupported input (emits once per unique message)
///
/// The message is logged at `warn` level with `component` as the log target.
///
/// # Example
/// ```
/// use scenesel_common::warning::warn_once;
///
/// warn_once("selector", "pseudo-classes are not supported: ':hover'");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let first_time = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if first_time {
        log::warn!(target: component, "{message}");
    }
}

/// Returns true if `message` has already been reported for `component`.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}

/// Forget every recorded warning (call before processing a new input)
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(key: &str) -> usize {
        WARNED
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map_or(0, |set| set.iter().filter(|k| k.as_str() == key).count())
    }

    // One test: the registry is process-global and `clear_warnings` would
    // race with parallel tests.
    #[test]
    fn test_warning_registry() {
        warn_once("test", "first");
        assert!(was_warned("test", "first"));
        assert!(!was_warned("test", "second"));
        assert!(!was_warned("other", "first"));

        warn_once("test", "first");
        assert_eq!(recorded("[test] first"), 1);

        clear_warnings();
        assert!(!was_warned("test", "first"));
        warn_once("test", "first");
        assert!(was_warned("test", "first"));
    }
}
