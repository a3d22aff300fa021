//! Common constants used throughout the crate.
//!
//! These are consolidated here so the signer, canonicalizer, and key derivation code agree on the
//! exact spelling of every wire-level string. A single misspelled byte in any of these produces a
//! signature the remote service rejects, so keep them in one spot.
//!
//! Tests that check the content of a header or error message should not use these constants;
//! they should use hard-coded strings so the tests are also testing for misspellings.
//!
//! Please keep this file organized alphabetically.

/// Algorithm for AWS SigV4
pub(crate) const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

/// Prefix applied to the secret key before deriving `kDate`.
pub(crate) const AWS4_PREFIX: &[u8] = b"AWS4";

/// String included at the end of the AWS SigV4 credential scope
pub(crate) const AWS4_REQUEST: &str = "aws4_request";

/// Canonical query string used by this signer. Only requests without query parameters are supported.
pub(crate) const CANONICAL_QUERY_STRING: &str = "";

/// Canonical URI used by this signer. Only requests made against the root path are supported.
pub(crate) const CANONICAL_URI: &str = "/";

/// Headers that are never signed unless overridden by configuration.
pub(crate) const DEFAULT_IGNORED_HEADERS: &[&str] = &[HDR_CONNECTION, HDR_X_AMZN_TRACE_ID];

/// Service signed for when none is configured.
pub(crate) const DEFAULT_SERVICE: &str = "dynamodb";

/// Error message: `"Access key id must not be empty"`
pub(crate) const ERR_MSG_EMPTY_ACCESS_KEY: &str = "Access key id must not be empty";

/// Error message: `"Secret access key must not be empty"`
pub(crate) const ERR_MSG_EMPTY_SECRET_KEY: &str = "Secret access key must not be empty";

/// Error message: `"Session token must not be empty"`
pub(crate) const ERR_MSG_EMPTY_SESSION_TOKEN: &str = "Session token must not be empty";

/// Header for `authorization`
pub(crate) const HDR_AUTHORIZATION: &str = "authorization";

/// Header for `connection`
pub(crate) const HDR_CONNECTION: &str = "connection";

/// Header for `host`
pub(crate) const HDR_HOST: &str = "host";

/// Header for `x-amz-date`
pub(crate) const HDR_X_AMZ_DATE: &str = "x-amz-date";

/// Header for `x-amz-security-token`
pub(crate) const HDR_X_AMZ_SECURITY_TOKEN: &str = "x-amz-security-token";

/// Header for `x-amzn-trace-id`
pub(crate) const HDR_X_AMZN_TRACE_ID: &str = "x-amzn-trace-id";

/// Compact ISO8601 date format used for the credential scope.
pub(crate) const ISO8601_COMPACT_DATE_FORMAT: &str = "%Y%m%d";

/// Compact ISO8601 timestamp format used for `x-amz-date` and the string to sign.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Replacement shown in place of secret header values in debug output.
pub(crate) const REDACTED: &str = "<redacted>";

/// SHA-256 of an empty string.
#[cfg(test)]
pub(crate) const SHA256_EMPTY: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

/// The length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

/// The region to use for testing.
#[cfg(test)]
pub(crate) const TEST_REGION: &str = "us-east-1";

/// The service to use for testing.
#[cfg(test)]
pub(crate) const TEST_SERVICE: &str = "service";
