use serde::{Deserialize, Serialize};

use crate::error::{TypeError, decode_metadata};

/// Page record metadata: opens a page and declares its dimensions.
///
/// Every positioned record that follows carries a `page` number
/// referring back to a page announced by one of these.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Page width in CSS pixels.
    pub width: f64,
    /// Page height in CSS pixels.
    pub height: f64,
    /// One-based page number.
    pub page: u32,
}

impl PageMetadata {
    /// Decode from a frame's JSON body.
    ///
    /// # Errors
    ///
    /// [`TypeError::Metadata`] when the body is not valid JSON or a
    /// field is missing or mistyped.
    pub fn from_json_body(body: &[u8]) -> Result<Self, TypeError> {
        decode_metadata("page", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_body() {
        let meta =
            PageMetadata::from_json_body(br#"{"width":612.0,"height":792.5,"page":3}"#).unwrap();
        assert_eq!(meta.page, 3);
        assert!((meta.width - 612.0).abs() < f64::EPSILON);
        assert!((meta.height - 792.5).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_field_is_error() {
        let err = PageMetadata::from_json_body(br#"{"width":612,"height":792}"#).unwrap_err();
        let TypeError::Metadata { record, .. } = err;
        assert_eq!(record, "page");
    }

    #[test]
    fn unknown_fields_ignored() {
        let meta =
            PageMetadata::from_json_body(br#"{"width":1,"height":2,"page":1,"dpi":144}"#).unwrap();
        assert_eq!(meta.page, 1);
    }
}
