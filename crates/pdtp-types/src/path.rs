use serde::{Deserialize, Serialize};

use crate::error::{TypeError, decode_metadata};

/// Path record metadata: a vector shape positioned on a page.
///
/// The geometry itself travels as an SVG path string; colors are CSS
/// color strings. Empty strings mean "not filled" / "not stroked".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathMetadata {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    /// SVG path data (`M 0 0 L 10 10 ...`).
    pub path: String,
    pub fill_color: String,
    pub stroke_color: String,
    pub page: u32,
}

impl PathMetadata {
    /// Decode from a frame's JSON body.
    ///
    /// # Errors
    ///
    /// [`TypeError::Metadata`] when the body is not a valid path record.
    pub fn from_json_body(body: &[u8]) -> Result<Self, TypeError> {
        decode_metadata("path", body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_body() {
        let body = br##"{
            "x": 0, "y": 0, "z": 5,
            "width": 100, "height": 50,
            "path": "M 0 0 L 100 50 Z",
            "fillColor": "#ff0000", "strokeColor": "",
            "page": 1
        }"##;
        let meta = PathMetadata::from_json_body(body).unwrap();
        assert_eq!(meta.path, "M 0 0 L 100 50 Z");
        assert_eq!(meta.fill_color, "#ff0000");
        assert!(meta.stroke_color.is_empty());
    }

    #[test]
    fn snake_case_colors_rejected() {
        let body = br##"{
            "x": 0, "y": 0, "z": 5, "width": 1, "height": 1,
            "path": "M 0 0", "fill_color": "#fff", "stroke_color": "",
            "page": 1
        }"##;
        assert!(PathMetadata::from_json_body(body).is_err());
    }
}
