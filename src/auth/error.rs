use thiserror::Error;

/// Failures produced by the auth core.
///
/// Variants are deliberately fine-grained so logs can tell a bad signature
/// from an expired claim, while handlers collapse every authentication
/// failure into a single 401 shape for clients.
#[derive(Debug, Error)]
pub enum Error {
    #[error("password mismatch")]
    CredentialMismatch,
    #[error("failed to hash password")]
    Hashing(#[source] bcrypt::BcryptError),
    #[error("random source unavailable")]
    Entropy(#[source] rand::Error),
    #[error("invalid token ttl")]
    InvalidTtl,
    #[error("failed to sign token")]
    Signing,
    #[error("invalid token format")]
    TokenFormat,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("invalid issuer")]
    InvalidIssuer,
    #[error("invalid subject")]
    InvalidSubject,
    #[error("refresh token not found")]
    TokenNotFound,
    #[error("refresh token revoked")]
    TokenRevoked,
    #[error("missing authorization header")]
    MissingHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
    #[error("store failure")]
    Store(#[from] anyhow::Error),
}

impl Error {
    /// Whether the failure is an authentication failure (401) as opposed to
    /// a server fault (500). Callers must not expose which variant fired.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        match self {
            Self::CredentialMismatch
            | Self::TokenFormat
            | Self::Base64
            | Self::Json(_)
            | Self::UnsupportedAlg(_)
            | Self::InvalidSignature
            | Self::Expired
            | Self::InvalidIssuer
            | Self::InvalidSubject
            | Self::TokenNotFound
            | Self::TokenRevoked
            | Self::MissingHeader
            | Self::MalformedHeader => true,
            Self::Hashing(_)
            | Self::Entropy(_)
            | Self::InvalidTtl
            | Self::Signing
            | Self::Store(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn auth_failures_map_to_unauthorized() {
        assert!(Error::CredentialMismatch.is_auth_failure());
        assert!(Error::InvalidSignature.is_auth_failure());
        assert!(Error::Expired.is_auth_failure());
        assert!(Error::TokenNotFound.is_auth_failure());
        assert!(Error::TokenRevoked.is_auth_failure());
        assert!(Error::MalformedHeader.is_auth_failure());
    }

    #[test]
    fn environment_failures_map_to_server_fault() {
        assert!(!Error::InvalidTtl.is_auth_failure());
        assert!(!Error::Signing.is_auth_failure());
        assert!(!Error::Store(anyhow::anyhow!("connection reset")).is_auth_failure());
    }
}
