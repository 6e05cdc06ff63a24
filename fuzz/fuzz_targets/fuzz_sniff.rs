#![no_main]

use libfuzzer_sys::fuzz_target;
use tokio_mediatype::MediaType;

fuzz_target!(|data: &[u8]| {
    let _ = MediaType::sniff(data);
});
