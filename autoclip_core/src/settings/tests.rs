//! Settings unit tests.

use std::time::Duration;

use super::{ConfigurationView, Settings};

#[test]
fn defaults_match_documented_values() {
    let s = Settings::default();
    assert!(!s.interrupt);
    assert!(!s.remember_state);
    assert!(!s.automatic_reading);
    assert!(s.show_in_menu);
    assert_eq!(s.chunk_size, 500);
    assert_eq!(s.max_length, 15_000);
    assert!(s.split_at_word);
    assert_eq!(s.debounce_delay(), Duration::from_millis(100));
    assert_eq!(s.interrupt_delay(), Duration::from_millis(50));
}

#[test]
fn empty_toml_gives_defaults() {
    let parsed: Settings = toml::from_str("").expect("deserialize");
    assert_eq!(parsed, Settings::default());
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let parsed: Settings = toml::from_str(
        r#"
interrupt = true
chunk_size = 250
"#,
    )
    .expect("deserialize");
    assert!(parsed.interrupt);
    assert_eq!(parsed.chunk_size, 250);
    assert_eq!(parsed.max_length, 15_000);
    assert!(parsed.split_at_word);
}

#[test]
fn roundtrip_through_toml() {
    let s = Settings {
        debounce_delay_ms: 0,
        split_at_word: false,
        ..Settings::default()
    };
    let text = toml::to_string_pretty(&s).expect("serialize");
    let parsed: Settings = toml::from_str(&text).expect("deserialize");
    assert_eq!(parsed, s);
}

#[test]
fn small_chunk_size_disables_splitting() {
    let mut s = Settings::default();
    assert!(s.splitting_enabled());
    s.chunk_size = 99;
    assert!(!s.splitting_enabled());
    s.chunk_size = 100;
    assert!(s.splitting_enabled());
}

#[test]
fn chunking_mirrors_settings() {
    let s = Settings {
        chunk_size: 320,
        split_at_word: false,
        ..Settings::default()
    };
    let c = s.chunking();
    assert_eq!(c.size, 320);
    assert!(!c.split_at_word);
}

#[test]
fn settings_are_their_own_view() {
    let s = Settings {
        interrupt: true,
        ..Settings::default()
    };
    assert_eq!(s.settings(), s);
}
