//! String-to-sign assembly, signature calculation, and `Authorization` header rendering.

use {
    crate::{
        chronoutil::format_amz_date,
        constants::{AWS4_HMAC_SHA256, SHA256_OUTPUT_LEN},
        crypto::hmac_sha256,
        signing_key::{KSigningKey, SigningScope},
    },
    chrono::{DateTime, Utc},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Signing algorithms supported by this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum SigningAlgorithm {
    /// `AWS4-HMAC-SHA256`: SigV4 with HMAC-SHA256.
    #[default]
    HmacSha256,
}

impl SigningAlgorithm {
    /// The algorithm identifier as it appears on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            Self::HmacSha256 => AWS4_HMAC_SHA256,
        }
    }
}

impl Display for SigningAlgorithm {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.id())
    }
}

/// Assemble the string to sign:
///
/// ```text
/// AWS4-HMAC-SHA256
/// <timestamp as YYYYMMDD'T'HHMMSS'Z'>
/// <scope>
/// <hex SHA-256 of the canonical request>
/// ```
///
/// There is no trailing newline.
pub fn string_to_sign(
    algorithm: SigningAlgorithm,
    timestamp: &DateTime<Utc>,
    scope: &SigningScope,
    canonical_request_sha256: &str,
) -> String {
    format!("{}\n{}\n{}\n{}", algorithm, format_amz_date(timestamp), scope, canonical_request_sha256)
}

/// Sign a string to sign with a derived signing key, returning the raw signature bytes.
pub fn sign(
    string_to_sign: &str,
    signing_key: &KSigningKey,
    algorithm: SigningAlgorithm,
) -> [u8; SHA256_OUTPUT_LEN] {
    let key: &[u8; SHA256_OUTPUT_LEN] = signing_key.as_ref();
    match algorithm {
        SigningAlgorithm::HmacSha256 => hmac_sha256(key, string_to_sign.as_bytes()),
    }
}

/// Render the `Authorization` header value.
pub fn authorization_header_value(
    algorithm: SigningAlgorithm,
    access_key_id: &str,
    scope: &SigningScope,
    signed_headers: &str,
    signature_hex: &str,
) -> String {
    format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        algorithm, access_key_id, scope, signed_headers, signature_hex
    )
}
