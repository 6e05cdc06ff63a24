#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mediatype::MediaType;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Some(mut media_type) = MediaType::parse(s) {
            // Force a canonical rendering, then it must parse back to an equal value.
            media_type.set_subtype(media_type.subtype().to_string());
            let reparsed = MediaType::parse(media_type.description());
            assert_eq!(reparsed.as_ref(), Some(&media_type));
        }
    }
});
