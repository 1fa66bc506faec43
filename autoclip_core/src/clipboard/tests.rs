//! Retry loop and UTF-16 decoding tests.

use std::time::{Duration, Instant};

use super::{OsError, RetryPolicy, decode_utf16_bounded};

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().collect()
}

#[test]
fn first_success_makes_one_attempt() {
    let mut attempts = 0;
    let ok = RetryPolicy::default().run(|| {
        attempts += 1;
        Ok::<(), OsError>(())
    });
    assert!(ok);
    assert_eq!(attempts, 1);
}

#[test]
fn succeeds_after_transient_failures() {
    let policy = RetryPolicy {
        timeout: Duration::from_secs(5),
        interval: Duration::from_millis(1),
    };
    let mut attempts = 0;
    let ok = policy.run(|| {
        attempts += 1;
        if attempts < 3 { Err(OsError(5)) } else { Ok(()) }
    });
    assert!(ok);
    assert_eq!(attempts, 3);
}

#[test]
fn zero_timeout_makes_exactly_one_attempt() {
    let policy = RetryPolicy {
        timeout: Duration::ZERO,
        interval: Duration::from_millis(10),
    };
    let mut attempts = 0;
    let ok = policy.run(|| {
        attempts += 1;
        Err(OsError(5))
    });
    assert!(!ok);
    assert_eq!(attempts, 1);
}

#[test]
fn gives_up_after_deadline() {
    let policy = RetryPolicy {
        timeout: Duration::from_millis(40),
        interval: Duration::from_millis(5),
    };
    let start = Instant::now();
    let mut attempts = 0;
    let ok = policy.run(|| {
        attempts += 1;
        Err(OsError(5))
    });
    assert!(!ok);
    assert!(attempts >= 2);
    assert!(start.elapsed() >= Duration::from_millis(40));
}

#[test]
fn os_error_displays_code() {
    assert_eq!(OsError(1418).to_string(), "os error 1418");
}

#[test]
fn decode_stops_at_nul() {
    let mut units = wide("copied");
    units.push(0);
    units.extend(wide("garbage after terminator"));
    assert_eq!(decode_utf16_bounded(&units), "copied");
}

#[test]
fn decode_without_terminator_takes_whole_buffer() {
    assert_eq!(decode_utf16_bounded(&wide("no terminator")), "no terminator");
}

#[test]
fn decode_empty_and_nul_only() {
    assert_eq!(decode_utf16_bounded(&[]), "");
    assert_eq!(decode_utf16_bounded(&[0, 0]), "");
}

#[test]
fn decode_surrogate_pairs_and_lone_surrogates() {
    assert_eq!(decode_utf16_bounded(&wide("a😀b")), "a😀b");
    assert_eq!(decode_utf16_bounded(&[0x61, 0xD800, 0x62]), "a\u{FFFD}b");
}
