//! The mock verification flow: body resolution, field-comparison synthesis
//! and the best-effort OCR attempt.

use chrono::Utc;
use serde_json::{json, Map, Value};

use crate::decode::decode_base64_image;
use crate::errors::VerifyError;
use crate::ocr::OcrEngine;
use crate::types::{
    SubmittedField, VerificationResult, DEBUG_ENV_VALUE, DEBUG_FIELD, IMAGE_FIELD,
    MOCK_EXTRACTED_TEXT,
};

/// Parses a raw request body into JSON, leniently: an empty body resolves to
/// an empty object, and any well-formed document is accepted. Parse failures
/// escalate to the caller's 500 boundary.
///
/// The object shape is enforced separately by [`require_object`], *after* the
/// debug dispatch — the diagnostics path must stay reachable whatever the
/// body looks like.
pub fn parse_body(raw: &str) -> Result<Value, VerifyError> {
    if raw.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_str(raw)?)
}

/// Enforces the key/value shape the verification path needs.
pub fn require_object(body: Value) -> Result<Map<String, Value>, VerifyError> {
    match body {
        Value::Object(map) => Ok(map),
        _ => Err(VerifyError::BodyNotObject),
    }
}

/// Reads the debug flag with query-parameter precedence over the `_debug`
/// body field and compares it case-insensitively against `"env"`.
///
/// The body flag is only consulted when the body is an object; a non-object
/// body can still reach diagnostics through the query parameter.
pub fn is_env_debug(query_debug: Option<&str>, body: &Value) -> bool {
    let flag = query_debug
        .filter(|flag| !flag.is_empty())
        .map(str::to_string)
        .or_else(|| body.get(DEBUG_FIELD).map(display_string));
    matches!(flag, Some(flag) if flag.eq_ignore_ascii_case(DEBUG_ENV_VALUE))
}

/// Empty-ish values are skipped during synthesis.
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

/// Stringifies a field value for extracted-text synthesis: strings contribute
/// their contents, everything else its compact JSON rendering.
fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Builds the field comparison and the synthesized extracted text from the
/// resolved body, in submission order. The image field and falsy values are
/// skipped; the comparison marks every remaining field as found.
pub fn synthesize_fields(body: &Map<String, Value>) -> (Map<String, Value>, String) {
    let mut comparison = Map::new();
    let mut pieces = Vec::new();

    for (key, value) in body {
        if key == IMAGE_FIELD {
            continue;
        }
        if is_falsy(value) {
            continue;
        }
        comparison.insert(
            key.clone(),
            json!(SubmittedField {
                submitted: value.clone(),
                found_in_image: true,
            }),
        );
        pieces.push(display_string(value));
    }

    let joined = pieces.join(" ").trim().to_string();
    let extracted_text = if joined.is_empty() {
        MOCK_EXTRACTED_TEXT.to_string()
    } else {
        joined
    };

    (comparison, extracted_text)
}

/// Runs the full verification flow over a resolved body.
///
/// `verified` is always `true`; this endpoint echoes submissions back, it does
/// not check them. The OCR attempt only runs when a non-empty image field is
/// present, and its failures degrade into the error field of the response.
pub async fn verify(body: &Map<String, Value>, engine: &OcrEngine) -> VerificationResult {
    let (field_comparison, extracted_text) = synthesize_fields(body);

    let (pytesseract_text, pytesseract_error) = match body.get(IMAGE_FIELD) {
        Some(value) if !is_falsy(value) => {
            let image_bytes = decode_base64_image(&display_string(value));
            let outcome = engine.extract_text(&image_bytes).await;
            (Some(outcome.text), Some(outcome.error))
        }
        _ => (None, None),
    };

    VerificationResult {
        verified: true,
        extracted_text,
        field_comparison,
        pytesseract_text,
        pytesseract_error,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::NO_IMAGE_BYTES;

    fn body_value(raw: &str) -> Value {
        parse_body(raw).unwrap()
    }

    fn body(raw: &str) -> Map<String, Value> {
        require_object(body_value(raw)).unwrap()
    }

    #[test]
    fn parse_body_defaults_empty_input_to_empty_object() {
        assert!(body("").is_empty());
        assert!(body("  \n").is_empty());
    }

    #[test]
    fn parse_body_rejects_malformed_json() {
        assert!(matches!(
            parse_body("{\"name\": "),
            Err(VerifyError::BodyParse(_))
        ));
    }

    #[test]
    fn require_object_rejects_non_objects() {
        assert!(matches!(
            require_object(body_value("[1, 2, 3]")),
            Err(VerifyError::BodyNotObject)
        ));
        assert!(matches!(
            require_object(body_value("\"just a string\"")),
            Err(VerifyError::BodyNotObject)
        ));
    }

    #[test]
    fn debug_flag_prefers_query_parameter() {
        let body = body_value("{\"_debug\": \"off\"}");
        assert!(is_env_debug(Some("env"), &body));
        assert!(is_env_debug(Some("ENV"), &body));
        assert!(!is_env_debug(Some("verbose"), &body));
    }

    #[test]
    fn debug_flag_falls_back_to_body_field() {
        assert!(is_env_debug(None, &body_value("{\"_debug\": \"Env\"}")));
        // An empty query value does not shadow the body field.
        assert!(is_env_debug(Some(""), &body_value("{\"_debug\": \"env\"}")));
        assert!(!is_env_debug(None, &body_value("{}")));
    }

    #[test]
    fn debug_query_flag_works_on_non_object_bodies() {
        // The object shape is only enforced on the verification path; the
        // query flag alone must dispatch whatever the body holds.
        assert!(is_env_debug(Some("env"), &body_value("[1, 2, 3]")));
        assert!(is_env_debug(Some("env"), &body_value("42")));
        // Without the query flag a non-object body carries no `_debug` field.
        assert!(!is_env_debug(None, &body_value("[1, 2, 3]")));
    }

    #[test]
    fn synthesis_skips_image_field_and_falsy_values() {
        let body = body(
            "{\"brandName\": \"Old Tom\", \"abv\": 40.0, \"netContents\": \"\", \
             \"warnings\": null, \"count\": 0, \"labelImage\": \"aGVsbG8=\"}",
        );
        let (comparison, extracted) = synthesize_fields(&body);

        assert_eq!(
            comparison.keys().collect::<Vec<_>>(),
            vec!["brandName", "abv"]
        );
        assert_eq!(extracted, "Old Tom 40.0");
        assert_eq!(comparison["brandName"]["found_in_image"], json!(true));
        assert_eq!(comparison["brandName"]["submitted"], json!("Old Tom"));
    }

    #[test]
    fn synthesis_preserves_submission_order() {
        let body = body("{\"z\": \"last?\", \"a\": \"no\", \"m\": 7}");
        let (comparison, extracted) = synthesize_fields(&body);

        assert_eq!(comparison.keys().collect::<Vec<_>>(), vec!["z", "a", "m"]);
        assert_eq!(extracted, "last? no 7");
    }

    #[test]
    fn empty_body_yields_placeholder_text() {
        let (comparison, extracted) = synthesize_fields(&Map::new());
        assert!(comparison.is_empty());
        assert_eq!(extracted, MOCK_EXTRACTED_TEXT);
    }

    #[tokio::test]
    async fn verify_without_image_leaves_ocr_fields_null() {
        let body = body("{\"brandName\": \"Old Tom\"}");
        let result = verify(&body, &OcrEngine::unavailable()).await;

        assert!(result.verified);
        assert_eq!(result.extracted_text, "Old Tom");
        assert!(result.pytesseract_text.is_none());
        assert!(result.pytesseract_error.is_none());
    }

    #[tokio::test]
    async fn verify_with_undecodable_image_degrades_to_error() {
        let body = body("{\"labelImage\": \"!!!not-base64!!!\"}");
        let result = verify(&body, &OcrEngine::unavailable()).await;

        assert!(result.verified);
        assert_eq!(result.extracted_text, MOCK_EXTRACTED_TEXT);
        assert!(result.field_comparison.is_empty());
        assert_eq!(result.pytesseract_text.as_deref(), Some(""));
        assert_eq!(result.pytesseract_error.as_deref(), Some(NO_IMAGE_BYTES));
    }

    #[tokio::test]
    async fn verify_with_empty_image_field_skips_ocr() {
        let body = body("{\"labelImage\": \"\"}");
        let result = verify(&body, &OcrEngine::unavailable()).await;

        assert!(result.pytesseract_text.is_none());
        assert!(result.pytesseract_error.is_none());
    }
}
