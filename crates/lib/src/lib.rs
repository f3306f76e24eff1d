//! # labelcheck
//!
//! Core logic for the label-verification service. This crate is transport-free:
//! it takes an already-resolved request body, synthesizes the mock verification
//! result, and makes a best-effort attempt at real OCR extraction when an image
//! was submitted and a Tesseract executable is present in the runtime.
//!
//! The two external capabilities are modeled as optional ports:
//! - the image decoder (`image` crate, behind the `image-decoder` feature),
//! - the OCR engine (the external `tesseract` executable, resolved once at
//!   startup by [`ocr::OcrEngine::resolve`]).
//!
//! Absence of either capability degrades the OCR output fields of the response;
//! it never fails a request.

pub mod decode;
pub mod diagnostics;
pub mod errors;
pub mod ocr;
pub mod types;
pub mod verify;

pub use decode::decode_base64_image;
pub use errors::VerifyError;
pub use ocr::{OcrEngine, OcrOutcome};
pub use types::{SubmittedField, VerificationResult};
pub use verify::{is_env_debug, parse_body, require_object, verify};
