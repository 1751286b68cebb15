//! Decoding of obfuscated string values.
//!
//! Values produced by the WebSphere Liberty `securityUtility encode`
//! command carry a `{xor}` prefix followed by the base64 encoding of the
//! plaintext XORed byte-wise with a fixed mask. This is reversible
//! obfuscation, not encryption; it only keeps secrets out of casual view
//! of the config file.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ConfigError, ConfigResult};

/// Prefix marking an obfuscated value.
const XOR_PREFIX: &str = "{xor}";

/// Mask applied to every byte of the base64-decoded payload.
const XOR_MASK: u8 = 0x5F;

/// Returns true if the value carries the `{xor}` prefix.
#[must_use]
pub fn is_encoded(value: &str) -> bool {
    value.starts_with(XOR_PREFIX)
}

/// Decodes an obfuscated value, or returns the input unchanged when it
/// does not carry the `{xor}` prefix.
///
/// # Errors
///
/// Returns `ConfigError::Decode` if the payload is not valid base64 or
/// the unmasked bytes are not valid UTF-8.
pub fn decode(value: &str) -> ConfigResult<String> {
    let Some(payload) = value.strip_prefix(XOR_PREFIX) else {
        return Ok(value.to_string());
    };

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| ConfigError::Decode(e.to_string()))?;
    let unmasked: Vec<u8> = bytes.iter().map(|b| b ^ XOR_MASK).collect();
    String::from_utf8(unmasked).map_err(|e| ConfigError::Decode(e.to_string()))
}
