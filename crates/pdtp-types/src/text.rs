use serde::{Deserialize, Serialize};

use crate::error::{TypeError, decode_metadata};

/// Text record metadata: one positioned run of text on a page.
///
/// Coordinates are in the page space declared by the enclosing page
/// record; `z` orders overlapping content within the page.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextMetadata {
    /// The text content of the run.
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Font size in CSS pixels.
    pub font_size: f64,
    /// Identifier of the font this run is set in, matching a font
    /// record's id.
    pub font: String,
    pub page: u32,
}

impl TextMetadata {
    /// Decode from a frame's JSON body.
    ///
    /// # Errors
    ///
    /// [`TypeError::Metadata`] on malformed or mistyped JSON.
    pub fn from_json_body(body: &[u8]) -> Result<Self, TypeError> {
        decode_metadata("text", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_body() {
        let body = br#"{
            "text": "Hello PDTP",
            "x": 72.0, "y": 96.0, "z": 1,
            "fontSize": 12.0,
            "font": "f1",
            "page": 1
        }"#;
        let meta = TextMetadata::from_json_body(body).unwrap();
        assert_eq!(meta.text, "Hello PDTP");
        assert_eq!(meta.font, "f1");
        assert!((meta.font_size - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn camel_case_field_required() {
        // fontSize, not font_size, on the wire.
        let body = br#"{"text":"t","x":0,"y":0,"z":0,"font_size":12,"font":"f","page":1}"#;
        assert!(TextMetadata::from_json_body(body).is_err());
    }

    #[test]
    fn wrong_typed_field_is_error() {
        let body = br#"{"text":"t","x":"left","y":0,"z":0,"fontSize":12,"font":"f","page":1}"#;
        let TypeError::Metadata { record, .. } = TextMetadata::from_json_body(body).unwrap_err();
        assert_eq!(record, "text");
    }
}
