//! Canonicalization functionality for signature generation.
//!
//! This covers header canonicalization and assembly of the AWS SigV4 canonical request. Each step
//! takes an immutable list and returns a new one, so stages can be tested in isolation.
//!
//! Only requests made against the root path (`/`) without query parameters are supported. The
//! canonical URI and query string are fixed accordingly.

use {
    crate::{
        constants::*,
        crypto::sha256_hex,
    },
    http::header::HeaderMap,
    lazy_static::lazy_static,
    regex::Regex,
    std::{
        cmp::Ordering,
        fmt::{Debug, Display, Formatter, Result as FmtResult},
    },
};

lazy_static! {
    /// Runs of ASCII whitespace for condensing header names and values. Latin-1 characters such as
    /// NBSP (0xA0) and NEL (0x85) are header content, not whitespace.
    static ref MULTISPACE: Regex = Regex::new(r"[ \t\n\x0B\x0C\r]+").unwrap();
}

/// A header after canonicalization: a lowercased, whitespace-compacted name and a
/// whitespace-compacted value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CanonicalHeader {
    name: String,
    value: String,
}

impl CanonicalHeader {
    /// Create a canonical header from already-normalized parts.
    pub fn new<N, V>(name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Retrieve the normalized header name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Retrieve the normalized header value.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Canonicalize a list of `(name, value)` header pairs.
///
/// Names are lowercased; pairs whose lowercased name appears in `ignored` (which must itself be
/// lowercase) are dropped. Names and values have runs of whitespace collapsed to a single space and
/// are trimmed. Values are decoded as Latin-1 so that `obs-text` bytes survive.
///
/// The result is sorted by name using a stable, byte-wise, ASCII case-insensitive comparison.
/// Pairs that normalize to the same name are kept as separate entries in their original order;
/// they are not merged.
pub fn canonicalize_headers<'a, I, S>(headers: I, ignored: &[S]) -> Vec<CanonicalHeader>
where
    I: IntoIterator<Item = (&'a str, &'a [u8])>,
    S: AsRef<str>,
{
    canonicalize(headers.into_iter().map(|(name, value)| (name, latin1_to_string(value))), ignored)
}

/// Canonicalize `(name, value)` pairs whose values are already decoded.
///
/// This is [`canonicalize_headers`] without the Latin-1 step. Feeding it the output of either
/// function yields the same list again.
pub fn canonicalize_text_headers<'a, I, S>(headers: I, ignored: &[S]) -> Vec<CanonicalHeader>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
    S: AsRef<str>,
{
    canonicalize(headers, ignored)
}

fn canonicalize<'a, I, V, S>(headers: I, ignored: &[S]) -> Vec<CanonicalHeader>
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: AsRef<str>,
    S: AsRef<str>,
{
    let mut result: Vec<CanonicalHeader> = headers
        .into_iter()
        .filter_map(|(name, value)| {
            let name = name.to_lowercase();
            if ignored.iter().any(|ignored| ignored.as_ref() == name) {
                return None;
            }

            Some(CanonicalHeader {
                name: compact_whitespace(&name),
                value: compact_whitespace(value.as_ref()),
            })
        })
        .collect();

    result.sort_by(|a, b| compare_ignore_ascii_case(&a.name, &b.name));
    result
}

/// Canonicalize every header in an HTTP header map. Multi-valued headers yield one entry per value.
pub fn canonicalize_header_map<S>(headers: &HeaderMap, ignored: &[S]) -> Vec<CanonicalHeader>
where
    S: AsRef<str>,
{
    canonicalize_headers(headers.iter().map(|(name, value)| (name.as_str(), value.as_bytes())), ignored)
}

/// Collapse each run of whitespace into a single space and strip leading and trailing whitespace.
///
/// Whitespace here is space, tab, line feed, vertical tab, form feed and carriage return.
pub fn compact_whitespace(value: &str) -> String {
    MULTISPACE.replace_all(value.trim_matches(is_header_whitespace), " ").into_owned()
}

fn is_header_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Byte-wise comparison after ASCII lowercasing.
fn compare_ignore_ascii_case(a: &str, b: &str) -> Ordering {
    a.bytes().map(|c| c.to_ascii_lowercase()).cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

/// Convert a Latin-1 slice of bytes to a UTF-8 string.
pub(crate) fn latin1_to_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| *b as char).collect()
}

/// A canonicalized request for AWS SigV4.
///
/// The signed header list and the canonical header block are both rendered from the same
/// `headers` list, so they always enumerate the same names in the same order.
#[derive(Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// The HTTP method for the request (e.g., "GET", "POST", etc.)
    request_method: String,

    /// The canonical URI path.
    canonical_path: String,

    /// The canonical query string.
    canonical_query: String,

    /// Headers, already canonicalized and sorted.
    headers: Vec<CanonicalHeader>,

    /// The lowercase hex SHA-256 of the body.
    body_sha256: String,
}

impl CanonicalRequest {
    /// Create a canonical request for the root path with no query string.
    pub fn new<M, B>(request_method: M, headers: Vec<CanonicalHeader>, body_sha256: B) -> Self
    where
        M: Into<String>,
        B: Into<String>,
    {
        Self::build(request_method, CANONICAL_URI, CANONICAL_QUERY_STRING, headers, body_sha256)
    }

    /// Create a canonical request from already-canonical parts.
    ///
    /// The path and query are used verbatim; callers are responsible for encoding them.
    pub fn build<M, P, Q, B>(
        request_method: M,
        canonical_path: P,
        canonical_query: Q,
        headers: Vec<CanonicalHeader>,
        body_sha256: B,
    ) -> Self
    where
        M: Into<String>,
        P: Into<String>,
        Q: Into<String>,
        B: Into<String>,
    {
        Self {
            request_method: request_method.into(),
            canonical_path: canonical_path.into(),
            canonical_query: canonical_query.into(),
            headers,
            body_sha256: body_sha256.into(),
        }
    }

    /// Retrieve the HTTP request method.
    #[inline]
    pub fn request_method(&self) -> &str {
        &self.request_method
    }

    /// Retrieve the canonical URI path.
    #[inline]
    pub fn canonical_path(&self) -> &str {
        &self.canonical_path
    }

    /// Retrieve the canonical query string.
    #[inline]
    pub fn canonical_query(&self) -> &str {
        &self.canonical_query
    }

    /// Retrieve the canonical headers.
    #[inline]
    pub fn headers(&self) -> &[CanonicalHeader] {
        &self.headers
    }

    /// Retrieve the SHA-256 hash of the request body.
    #[inline]
    pub fn body_sha256(&self) -> &str {
        &self.body_sha256
    }

    /// The canonical header block: one `name:value\n` line per header.
    pub fn canonical_headers(&self) -> String {
        let mut result = String::new();
        for header in &self.headers {
            result.push_str(&header.name);
            result.push(':');
            result.push_str(&header.value);
            result.push('\n');
        }
        result
    }

    /// The signed header names, joined by `;`.
    pub fn signed_headers(&self) -> String {
        self.headers.iter().map(CanonicalHeader::name).collect::<Vec<_>>().join(";")
    }

    /// The lowercase hex SHA-256 of the canonical request string.
    pub fn sha256_hex(&self) -> String {
        sha256_hex(self.to_string().as_bytes())
    }
}

impl Display for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.request_method,
            self.canonical_path,
            self.canonical_query,
            self.canonical_headers(),
            self.signed_headers(),
            self.body_sha256
        )
    }
}

impl Debug for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|h| {
                if h.name == HDR_X_AMZ_SECURITY_TOKEN {
                    (h.name(), REDACTED)
                } else {
                    (h.name(), h.value())
                }
            })
            .collect();

        f.debug_struct("CanonicalRequest")
            .field("request_method", &self.request_method)
            .field("canonical_path", &self.canonical_path)
            .field("canonical_query", &self.canonical_query)
            .field("headers", &headers)
            .field("body_sha256", &self.body_sha256)
            .finish()
    }
}
