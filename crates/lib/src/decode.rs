//! Best-effort decoding of base64 image payloads.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Decodes a bare base64 string or a `data:<mime>;base64,<payload>` data URL
/// into raw bytes.
///
/// This is a total function: any failure yields empty bytes. Upstream
/// transports sometimes turn `+` into spaces, so a failed strict decode is
/// retried once with spaces mapped back to `+` before giving up.
pub fn decode_base64_image(data_url_or_b64: &str) -> Vec<u8> {
    if data_url_or_b64.is_empty() {
        return Vec::new();
    }

    // Strip the data-URL prefix if present. A prefix without a comma falls
    // back to treating the whole input as the payload.
    let payload = if data_url_or_b64.starts_with("data:") {
        data_url_or_b64
            .split_once(',')
            .map(|(_, b64)| b64)
            .unwrap_or(data_url_or_b64)
    } else {
        data_url_or_b64
    };

    match STANDARD.decode(payload) {
        Ok(bytes) => bytes,
        Err(_) => STANDARD
            .decode(payload.replace(' ', "+"))
            .unwrap_or_default(),
    }
}
