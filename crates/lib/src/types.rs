//! Shared types and wire constants for the verification response.
//!
//! The JSON key names (`extractedText`, `pytesseractText`, ...) are part of
//! the deployed wire contract consumed by the submission frontend, so they are
//! kept verbatim even where they no longer describe the implementation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The body key carrying the base64-encoded label image. Never echoed back
/// in the field comparison.
pub const IMAGE_FIELD: &str = "labelImage";

/// The body key that can carry the debug flag when it is not passed as a
/// query parameter.
pub const DEBUG_FIELD: &str = "_debug";

/// The debug flag value (compared case-insensitively) that routes a request
/// to the diagnostics path.
pub const DEBUG_ENV_VALUE: &str = "env";

/// Placeholder used when a submission contains no qualifying fields.
pub const MOCK_EXTRACTED_TEXT: &str = "Mock extracted text";

/// One submitted form field, echoed back as "found" in the image.
///
/// `found_in_image` is always `true`: this service mocks verification, it does
/// not perform it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmittedField {
    pub submitted: Value,
    pub found_in_image: bool,
}

/// The success response payload. Built once per request and serialized
/// immediately.
#[derive(Debug, Serialize)]
pub struct VerificationResult {
    /// Always `true`, regardless of input.
    pub verified: bool,
    /// Space-joined stringification of all qualifying field values in
    /// submission order, or [`MOCK_EXTRACTED_TEXT`] when there are none.
    #[serde(rename = "extractedText")]
    pub extracted_text: String,
    /// Field name to [`SubmittedField`], in submission order. Never contains
    /// [`IMAGE_FIELD`].
    #[serde(rename = "fieldComparison")]
    pub field_comparison: Map<String, Value>,
    /// OCR output, or `null` when no image was submitted.
    #[serde(rename = "pytesseractText")]
    pub pytesseract_text: Option<String>,
    /// Human-readable OCR diagnostic, or `null` when no image was submitted.
    #[serde(rename = "pytesseractError")]
    pub pytesseract_error: Option<String>,
    pub timestamp: DateTime<Utc>,
}
