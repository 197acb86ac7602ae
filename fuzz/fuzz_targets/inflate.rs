#![no_main]

use libfuzzer_sys::fuzz_target;
use pdtp_decoder::inflate::inflate;

// Fuzz target: zlib inflation of arbitrary bytes.
//
// Catches bugs in:
// - Partial-output retention when a stream dies mid-way
// - The decompression size cap
// - Error classification (output produced vs zero output)
fuzz_target!(|data: &[u8]| {
    const CAP: usize = 1 << 20;
    if let Ok(out) = inflate(data, CAP) {
        assert!(out.len() <= CAP);
        if data.is_empty() {
            assert!(out.is_empty());
        }
    }
});
