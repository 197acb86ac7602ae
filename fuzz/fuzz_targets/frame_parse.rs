#![no_main]

use libfuzzer_sys::fuzz_target;
use pdtp_wire::{Frame, StreamBuffer};

// Fuzz target: Frame::parse over arbitrary buffered bytes.
//
// Catches bugs in:
// - Header length field handling (big-endian u32, oversize values)
// - Partial header / partial body detection
// - Buffer consumption accounting across repeated frames
fuzz_target!(|data: &[u8]| {
    let mut buf = StreamBuffer::new();
    buf.append(data);

    loop {
        match Frame::parse(&mut buf, 1 << 20) {
            Ok(Some(frame)) => {
                assert!(frame.body.len() <= data.len());
            }
            Ok(None) => break,
            Err(_) => break,
        }
    }
});
