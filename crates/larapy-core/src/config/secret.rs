//! Application key generation

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use std::fmt;

/// Random bytes behind each key (256 bits)
pub const SECRET_BYTES: usize = 32;

/// A freshly generated `APP_KEY` value
///
/// URL-safe base64 without padding, so it never contains `=`, whitespace or newlines.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Draw a new key from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; SECRET_BYTES];
        rand::rng().fill_bytes(&mut bytes);
        Self(URL_SAFE_NO_PAD.encode(bytes))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Keep keys out of logs and panic messages
impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}
