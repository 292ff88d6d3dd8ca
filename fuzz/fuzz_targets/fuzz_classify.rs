#![no_main]

use libfuzzer_sys::fuzz_target;

use chatbot_audio::media::{classify, ClassifiedSource, ContentCandidate};
use chatbot_audio::messages::InboundEvent;

fuzz_target!(|data: &str| {
    // Classification must never panic and oversized text must never reach
    // the fetch stage.
    let classified = classify(&ContentCandidate::Text(data.to_string()));
    if let ClassifiedSource::OversizedText { length } = &classified {
        assert_eq!(*length, data.chars().count());
    }
    let _ = classified.into_fetch_source();

    // Arbitrary JSON messages must deserialize or fail cleanly.
    if let Ok(event) = serde_json::from_str::<InboundEvent>(data) {
        let _ = event.is_valid();
        let _ = serde_json::to_string(&event);
    }
});
