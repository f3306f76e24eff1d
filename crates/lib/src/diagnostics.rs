//! Runtime capability diagnostics.
//!
//! The debug path probes each optional capability independently and collects
//! every outcome into one report, so a single broken capability never hides
//! the state of the others.

use serde_json::{json, Map, Value};

use crate::ocr::OcrEngine;

/// A 1x1 PNG used to self-test the image decoder without touching the
/// filesystem.
pub const PROBE_IMAGE_B64: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNkYPhfDwAChwGA60e6kgAAAABJRU5ErkJggg==";

/// Builds the diagnostics report returned by the debug path.
///
/// Each probe writes its own keys; probe failures are recorded, never
/// propagated.
pub async fn environment_report(engine: &OcrEngine) -> Value {
    let mut report = Map::new();

    report.insert(
        "image_decoder_available".to_string(),
        json!(cfg!(feature = "image-decoder")),
    );

    // Decode self-test: proves the decoder actually works end to end, not
    // just that it was compiled in.
    #[cfg(feature = "image-decoder")]
    {
        let probe = crate::decode::decode_base64_image(PROBE_IMAGE_B64);
        match image::load_from_memory(&probe) {
            Ok(_) => {
                report.insert("image_decoder_probe_ok".to_string(), json!(true));
            }
            Err(e) => {
                report.insert("image_decoder_probe_ok".to_string(), json!(false));
                report.insert("image_decoder_probe_error".to_string(), json!(e.to_string()));
            }
        }
    }

    report.insert(
        "tesseract_available".to_string(),
        json!(engine.is_available()),
    );
    report.insert(
        "tesseract_path".to_string(),
        json!(engine.command_path().map(|p| p.display().to_string())),
    );

    if engine.is_available() {
        match engine.version_line().await {
            Ok(line) => {
                report.insert("tesseract_version_line".to_string(), json!(line));
            }
            Err(e) => {
                report.insert("tesseract_error".to_string(), json!(e));
            }
        }
    }

    Value::Object(report)
}
