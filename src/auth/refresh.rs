//! Opaque refresh-token generation.

use rand::{rngs::OsRng, RngCore};

use super::error::Error;

const REFRESH_TOKEN_BYTES: usize = 32;

/// Draw 32 bytes from the OS random source and render them as a 64-character
/// lowercase hex string. The raw value is the lookup key in the store, so it
/// must stay unguessable.
///
/// # Errors
///
/// Returns [`Error::Entropy`] if the random source is unavailable. Callers
/// treat this as fatal; retrying cannot help in a broken environment.
pub fn generate_refresh_token() -> Result<String, Error> {
    let mut bytes = [0u8; REFRESH_TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes).map_err(Error::Entropy)?;
    Ok(hex::encode(bytes))
}
