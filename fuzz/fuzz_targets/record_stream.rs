#![no_main]

use std::io::Cursor;

use libfuzzer_sys::fuzz_target;
use pdtp_decoder::{DecodeOptions, RecordStream};

// Fuzz target: drive a whole RecordStream over arbitrary bytes.
//
// Exercises the full accumulate/drain loop: frame parsing, metadata
// decoding, raw payload pulls, image reconstruction, truncation
// handling at EOF. Every error is an acceptable outcome; panics and
// runaway allocation are not.
fuzz_target!(|data: &[u8]| {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    rt.block_on(async {
        let opts = DecodeOptions {
            // Keep frames small so the fuzzer explores record sequences
            // instead of burning time on one giant body.
            max_frame_len: 1 << 16,
            ..DecodeOptions::default()
        };
        let mut stream = RecordStream::with_options(Cursor::new(data.to_vec()), opts);
        while let Some(item) = stream.next().await {
            let _ = item;
        }
    });
});
