use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use super::error::StorageError;

/// Strip an optional data-URL header (`data:image/jpeg;base64,`).
///
/// Everything up to and including the first comma is dropped; input without a
/// comma is returned unchanged.
pub fn strip_data_url(payload: &str) -> &str {
    match payload.split_once(',') {
        Some((_, data)) => data,
        None => payload,
    }
}

/// Decode an image payload as sent by clients: standard base64, optionally
/// prefixed by a data-URL header.
pub fn decode_image_payload(payload: &str) -> Result<Vec<u8>, StorageError> {
    let data = strip_data_url(payload.trim()).trim();
    if data.is_empty() {
        return Err(StorageError::InvalidEncoding("image data is empty".into()));
    }

    BASE64
        .decode(data)
        .map_err(|e| StorageError::InvalidEncoding(e.to_string()))
}
