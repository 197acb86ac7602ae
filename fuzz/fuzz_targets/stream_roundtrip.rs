#![no_main]

use std::io::Cursor;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;
use pdtp_decoder::RecordStream;
use pdtp_wire::{Frame, record_type};
use serde_json::json;

#[derive(Debug, Arbitrary)]
enum FuzzRecord {
    Page {
        page: u32,
        width: u16,
        height: u16,
    },
    Text {
        page: u32,
        text: String,
    },
    Image {
        page: u32,
        width: u8,
        height: u8,
        jpeg: bool,
        payload: Vec<u8>,
        mask: Vec<u8>,
    },
    Font {
        font_id: u32,
        bytes: Vec<u8>,
    },
    Path {
        page: u32,
        d: String,
    },
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    records: Vec<FuzzRecord>,
}

fn push_json(out: &mut Vec<u8>, ty: u8, meta: &serde_json::Value) {
    let body = serde_json::to_vec(meta).expect("metadata serialises");
    let frame = Frame {
        record_type: ty,
        body: body.into(),
    };
    frame.write_to(out).expect("fixture frame fits a u32 length");
}

// Fuzz target: structured records in, decoded records out.
//
// Builds a stream of well-formed frames whose declared payload lengths
// match the bytes that follow, then decodes the whole thing. Framing
// must never desync: every record either dispatches or fails
// record-scoped, and records whose decoding cannot fail (valid
// metadata, no reconstruction step) must all arrive.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = FuzzInput::arbitrary(&mut u) else {
        return;
    };

    if input.records.is_empty() {
        return;
    }

    let count = input.records.len().min(32);

    let mut out = Vec::new();
    let mut must_deliver = 0usize;

    for record in &input.records[..count] {
        match record {
            FuzzRecord::Page { page, width, height } => {
                must_deliver += 1;
                let meta = json!({
                    "width": f64::from(*width),
                    "height": f64::from(*height),
                    "page": page,
                });
                push_json(&mut out, record_type::PAGE, &meta);
            }
            FuzzRecord::Text { page, text } => {
                must_deliver += 1;
                let meta = json!({
                    "text": text,
                    "x": 72.0,
                    "y": 96.0,
                    "z": 1.0,
                    "fontSize": 12.0,
                    "font": "f1",
                    "page": page,
                });
                push_json(&mut out, record_type::TEXT, &meta);
            }
            FuzzRecord::Image { page, width, height, jpeg, payload, mask } => {
                // JPEG passthrough skips reconstruction entirely, so it
                // cannot fail; every other combination may fail
                // record-scoped when the payload is not real zlib/JPEG.
                if *jpeg && mask.is_empty() {
                    must_deliver += 1;
                }
                let meta = json!({
                    "x": 0.0,
                    "y": 0.0,
                    "z": 0.0,
                    "width": f64::from(*width),
                    "height": f64::from(*height),
                    "dw": f64::from(*width),
                    "dh": f64::from(*height),
                    "length": payload.len(),
                    "maskLength": mask.len(),
                    "page": page,
                    "ext": if *jpeg { "jpg" } else { "png" },
                    "clipPath": "",
                });
                push_json(&mut out, record_type::IMAGE, &meta);
                out.extend_from_slice(payload);
                out.extend_from_slice(mask);
            }
            FuzzRecord::Font { font_id, bytes } => {
                must_deliver += 1;
                let meta = json!({ "fontId": font_id, "length": bytes.len() });
                push_json(&mut out, record_type::FONT, &meta);
                out.extend_from_slice(bytes);
            }
            FuzzRecord::Path { page, d } => {
                must_deliver += 1;
                let meta = json!({
                    "x": 0.0,
                    "y": 0.0,
                    "z": 0.0,
                    "width": 100.0,
                    "height": 100.0,
                    "path": d,
                    "fillColor": "#000000",
                    "strokeColor": "none",
                    "page": page,
                });
                push_json(&mut out, record_type::PATH, &meta);
            }
        }
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("runtime");

    rt.block_on(async {
        let mut stream = RecordStream::new(Cursor::new(out));
        let mut delivered = 0usize;
        let mut recovered = 0usize;
        while let Some(item) = stream.next().await {
            match item {
                Ok(_) => delivered += 1,
                Err(e) if e.is_record_scoped() => recovered += 1,
                Err(e) => panic!("stream-fatal error on well-formed framing: {e}"),
            }
        }
        assert_eq!(
            delivered + recovered,
            count,
            "records written must all be accounted for"
        );
        assert!(
            delivered >= must_deliver,
            "a record with valid metadata and no reconstruction step was dropped"
        );
    });
});
