//! Image signature validation.
//!
//! A cheap prefix comparison against known magic numbers, not a format parse.
//! It gates payloads before any provider call so spoofed content types and
//! corrupt uploads fail early.

use base64::{Engine as _, engine::general_purpose};

/// Recognized image file signatures at offset 0.
const IMAGE_SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],       // JPEG
    &[0x89, 0x50, 0x4E, 0x47], // PNG
    &[0x47, 0x49, 0x46],       // GIF
    &[0x52, 0x49, 0x46, 0x46], // RIFF container (WEBP)
];

/// Return true iff the buffer starts with a recognized image signature.
pub fn is_valid_image(bytes: &[u8]) -> bool {
    IMAGE_SIGNATURES
        .iter()
        .any(|signature| bytes.starts_with(signature))
}

/// Decode a base64 string and check its leading bytes.
///
/// Decode failure is treated as invalid, never an error.
pub fn validate_base64_image(data: &str) -> bool {
    match general_purpose::STANDARD.decode(data) {
        Ok(bytes) => is_valid_image(&bytes),
        Err(_) => false,
    }
}
