//! Password hashing and verification.

use super::error::Error;

/// Fixed bcrypt work factor. Changing it only affects new hashes; stored
/// hashes carry their own cost and keep verifying.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a fresh salt.
///
/// # Errors
///
/// Returns [`Error::Hashing`] if the bcrypt primitive rejects the input.
pub fn hash_password(password: &str) -> Result<String, Error> {
    bcrypt::hash(password, BCRYPT_COST).map_err(Error::Hashing)
}

/// Verify a plaintext password against a stored hash.
///
/// A malformed stored hash fails the same way as a wrong password so the
/// caller cannot distinguish the two.
///
/// # Errors
///
/// Returns [`Error::CredentialMismatch`] when the password does not match.
pub fn verify_password(password: &str, hashed: &str) -> Result<(), Error> {
    match bcrypt::verify(password, hashed) {
        Ok(true) => Ok(()),
        Ok(false) | Err(_) => Err(Error::CredentialMismatch),
    }
}
