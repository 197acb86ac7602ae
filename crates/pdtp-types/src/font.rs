use serde::{Deserialize, Serialize};

use crate::error::{TypeError, decode_metadata};

/// Font record metadata. `length` bytes of raw font data follow the
/// frame and are delivered to the consumer byte-for-byte.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontMetadata {
    /// Numeric font identifier; text runs reference it through their
    /// `font` field.
    pub font_id: u32,
    /// Byte count of the font payload following the frame.
    pub length: usize,
}

impl FontMetadata {
    /// Decode from a frame's JSON body.
    ///
    /// # Errors
    ///
    /// [`TypeError::Metadata`] when the body does not parse.
    pub fn from_json_body(body: &[u8]) -> Result<Self, TypeError> {
        decode_metadata("font", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_body() {
        let meta = FontMetadata::from_json_body(br#"{"fontId":7,"length":44}"#).unwrap();
        assert_eq!(meta.font_id, 7);
        assert_eq!(meta.length, 44);
    }

    #[test]
    fn string_font_id_is_error() {
        assert!(FontMetadata::from_json_body(br#"{"fontId":"f7","length":44}"#).is_err());
    }
}
