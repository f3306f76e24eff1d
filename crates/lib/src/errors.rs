use thiserror::Error;

/// Errors produced while resolving a raw request body into a usable form.
///
/// OCR and image-decoding failures are deliberately *not* represented here:
/// they degrade into diagnostic strings on the response instead of failing
/// the request.
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("failed to parse request body: {0}")]
    BodyParse(#[from] serde_json::Error),
    #[error("request body is not a JSON object")]
    BodyNotObject,
}
