#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let data = if data.len() > 256 * 1024 {
        &data[..256 * 1024]
    } else {
        data
    };

    let source = String::from_utf8_lossy(data);

    // `minify_str` asserts its output is UTF-8; any panic here is a bug.
    if let Ok(out) = jsmin::minify_str(&source) {
        // Only a space before a regex opener can be added; everything else shrinks.
        assert!(out.len() <= source.len() + source.matches('/').count());
    }
});
