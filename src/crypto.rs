//! SHA-256 and HMAC-SHA256 primitives used by the signer.
//!
//! Request bodies are hashed through [`HashingSink`], an [`std::io::Write`] implementation that feeds
//! bytes into a SHA-256 accumulator and then drops them. Bodies are therefore never materialized as
//! a whole just to be hashed.

use {
    crate::{body::SignableBody, constants::SHA256_OUTPUT_LEN},
    hmac::{Hmac, Mac},
    sha2::{Digest, Sha256},
    std::io::{Result as IoResult, Write},
};

type HmacSha256 = Hmac<Sha256>;

/// Compute `HMAC_SHA256(key, value)`.
#[inline]
pub fn hmac_sha256(key: &[u8], value: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC-SHA256 accepts keys of any length");
    mac.update(value);
    let mut result = [0; SHA256_OUTPUT_LEN];
    result.copy_from_slice(&mac.finalize().into_bytes());
    result
}

/// Compute the raw SHA-256 digest of `value`.
#[inline]
pub fn sha256(value: &[u8]) -> [u8; SHA256_OUTPUT_LEN] {
    let mut result = [0; SHA256_OUTPUT_LEN];
    result.copy_from_slice(&Sha256::digest(value));
    result
}

/// Compute the lowercase hex SHA-256 digest of `value`.
#[inline]
pub fn sha256_hex(value: &[u8]) -> String {
    hex::encode(sha256(value))
}

/// Hash the UTF-8 bytes of `text`, returning the raw digest.
#[inline]
pub fn digest_text(text: &str) -> [u8; SHA256_OUTPUT_LEN] {
    sha256(text.as_bytes())
}

/// Stream a request body through SHA-256 and return the lowercase hex digest.
///
/// The body is written into a [`HashingSink`]; the bytes are discarded as soon as they have been
/// hashed. Any I/O error raised while the body writes itself is returned unchanged.
pub fn digest_body<B>(body: &B) -> IoResult<String>
where
    B: SignableBody + ?Sized,
{
    let mut sink = HashingSink::new();
    body.write_to(&mut sink)?;
    Ok(sink.finish_hex())
}

/// A write-only sink that hashes everything written to it.
#[derive(Clone, Debug, Default)]
pub struct HashingSink {
    hasher: Sha256,
    written: u64,
}

impl HashingSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of bytes hashed so far.
    #[inline]
    pub fn bytes_written(&self) -> u64 {
        self.written
    }

    /// Consume the sink, returning the raw digest.
    pub fn finish(self) -> [u8; SHA256_OUTPUT_LEN] {
        let mut result = [0; SHA256_OUTPUT_LEN];
        result.copy_from_slice(&self.hasher.finalize());
        result
    }

    /// Consume the sink, returning the lowercase hex digest.
    pub fn finish_hex(self) -> String {
        hex::encode(self.finish())
    }
}

impl Write for HashingSink {
    fn write(&mut self, buf: &[u8]) -> IoResult<usize> {
        self.hasher.update(buf);
        self.written += buf.len() as u64;
        Ok(buf.len())
    }

    fn flush(&mut self) -> IoResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::{digest_body, digest_text, hmac_sha256, sha256_hex, HashingSink},
        crate::constants::SHA256_EMPTY,
        bytes::Bytes,
        std::io::Write,
    };

    #[test_log::test]
    fn empty_body_digest() {
        assert_eq!(
            digest_body(&Bytes::new()).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(sha256_hex(b""), SHA256_EMPTY);
    }

    #[test_log::test]
    fn chunked_writes_match_one_shot() {
        let mut sink = HashingSink::new();
        for chunk in [b"{\"a\"".as_slice(), b":".as_slice(), b"1}".as_slice()] {
            sink.write_all(chunk).unwrap();
        }
        assert_eq!(sink.bytes_written(), 7);
        assert_eq!(sink.finish_hex(), sha256_hex(b"{\"a\":1}"));
    }

    #[test_log::test]
    fn digest_text_is_raw() {
        let digest = digest_text("");
        assert_eq!(hex::encode(digest), SHA256_EMPTY);
        assert_eq!(digest.len(), 32);
    }

    #[test_log::test]
    fn hmac_rfc4231_case_2() {
        // RFC 4231, test case 2.
        let mac = hmac_sha256(b"Jefe", b"what do ya want for nothing?");
        assert_eq!(hex::encode(mac), "5bdcc146bf60754e6a042426089575c75a003f089d2739839dec58b964ec3843");
    }
}
