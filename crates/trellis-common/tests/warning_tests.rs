//! Tests for the deduplicated warning set.
//!
//! The set is process-global and the test harness runs tests on several
//! threads, so everything that touches it lives in one test.

use trellis_common::warning::{clear_warnings, warn_once, was_warned};

#[test]
fn test_warning_set_lifecycle() {
    warn_once("test-record", "unsupported value");
    assert!(was_warned("test-record", "unsupported value"));
    assert!(!was_warned("test-record", "another value"));

    // Keyed by component as well as message.
    assert!(!was_warned("test-other", "unsupported value"));

    // Repeating is harmless.
    warn_once("test-record", "unsupported value");
    assert!(was_warned("test-record", "unsupported value"));

    clear_warnings();
    assert!(!was_warned("test-record", "unsupported value"));
}
