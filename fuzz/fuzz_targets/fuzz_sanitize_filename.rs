#![no_main]

use libfuzzer_sys::fuzz_target;

use chatbot_audio::media::{base_name, sanitize_filename};

fuzz_target!(|data: &str| {
    // Sanitized names fit a filesystem entry and never contain separators.
    let name = sanitize_filename(data);
    assert!(name.len() <= 255);
    assert!(!name.contains('/') && !name.contains('\\'));

    let _ = base_name(data);
});
