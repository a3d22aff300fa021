//! Request signing.
//!
//! [`SigV4Signer`] holds the sanitized credentials, the credential scope, and the signing key
//! derived for that scope. It is immutable after construction: share it behind an `Arc` and call
//! [`sign_request`][SigV4Signer::sign_request] from as many tasks as needed.

use {
    crate::{
        body::SignableBody,
        canonical::{canonicalize_header_map, CanonicalRequest},
        chronoutil::format_amz_date,
        config::{DateRollover, SignerConfig},
        constants::*,
        crypto::digest_body,
        logging::LogSink,
        signature::{authorization_header_value, sign, string_to_sign, SigningAlgorithm},
        signing_key::{KSigningKey, SigningScope},
        Credentials, SigningError,
    },
    chrono::{DateTime, NaiveDate, Utc},
    http::{
        header::{HeaderName, HeaderValue},
        Request,
    },
};

/// Signs outbound HTTP requests with AWS SigV4.
#[derive(Clone, Debug)]
pub struct SigV4Signer {
    credentials: Credentials,
    scope: SigningScope,
    signing_key: KSigningKey,
    ignored_headers: Vec<String>,
    date_rollover: DateRollover,
    sign_host_header: bool,
    log_sink: LogSink,
}

/// The result of handing a request to [`SigV4Signer::sign_request`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SigningOutcome {
    /// The request has no body and was left untouched.
    Unsigned,

    /// The request was signed; its headers now carry the signature.
    Signed(SignedRequest),
}

impl SigningOutcome {
    /// Indicates whether the request was signed.
    #[inline]
    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    /// Details of the signature, if the request was signed.
    #[inline]
    pub fn signed(&self) -> Option<&SignedRequest> {
        match self {
            Self::Unsigned => None,
            Self::Signed(signed) => Some(signed),
        }
    }
}

/// Details of a signature that was applied to a request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedRequest {
    timestamp: DateTime<Utc>,
    scope: SigningScope,
    signed_headers: String,
    signature: String,
    authorization: String,
}

impl SignedRequest {
    /// The timestamp sent in `x-amz-date`.
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The credential scope the request was signed for.
    #[inline]
    pub fn scope(&self) -> &SigningScope {
        &self.scope
    }

    /// The signed header names, joined by `;`.
    #[inline]
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// The lowercase hex signature.
    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The value sent in the `Authorization` header.
    #[inline]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }
}

impl SigV4Signer {
    /// Create a signer, deriving the signing key for the current UTC date.
    ///
    /// # Errors
    /// Returns [`SigningError::InvalidCredentials`] if the configured credentials are unusable.
    pub fn new(config: SignerConfig) -> Result<Self, SigningError> {
        Self::new_at(config, Utc::now().date_naive())
    }

    /// Create a signer whose signing key is derived for `date`.
    pub fn new_at(config: SignerConfig, date: NaiveDate) -> Result<Self, SigningError> {
        let credentials = config.credentials().sanitized()?;
        let scope = SigningScope::new(date, config.region(), config.service());
        let signing_key = scope.derive_key(credentials.secret_access_key());
        let log_sink = config.log_sink().clone();

        sink_debug!(
            log_sink,
            "Derived signing key for access key {} and scope {}",
            credentials.access_key_id(),
            scope
        );

        Ok(Self {
            credentials,
            scope,
            signing_key,
            ignored_headers: config.ignored_headers().iter().map(|h| h.trim().to_lowercase()).collect(),
            date_rollover: config.date_rollover(),
            sign_host_header: config.sign_host_header(),
            log_sink,
        })
    }

    /// The credential scope of the cached signing key.
    #[inline]
    pub fn scope(&self) -> &SigningScope {
        &self.scope
    }

    /// The access key id requests are signed with.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        self.credentials.access_key_id()
    }

    /// Sign a request using the current time.
    ///
    /// Requests without a body are left untouched and [`SigningOutcome::Unsigned`] is returned.
    /// Otherwise `x-amz-date`, `x-amz-security-token` (for session credentials) and
    /// `authorization` are set on the request.
    ///
    /// # Errors
    /// If the body cannot be read or a computed header is unrepresentable, an error is returned and
    /// the request's headers are not modified.
    pub fn sign_request<B>(&self, request: &mut Request<B>) -> Result<SigningOutcome, SigningError>
    where
        B: SignableBody,
    {
        self.sign_request_at(request, Utc::now())
    }

    /// Sign a request as if it were made at `timestamp`.
    pub fn sign_request_at<B>(
        &self,
        request: &mut Request<B>,
        timestamp: DateTime<Utc>,
    ) -> Result<SigningOutcome, SigningError>
    where
        B: SignableBody,
    {
        if !request.body().is_present() {
            sink_debug!(self.log_sink, "{} {} has no body; forwarding unsigned", request.method(), request.uri());
            return Ok(SigningOutcome::Unsigned);
        }

        // Work on a copy so a failure part way through leaves the request as it was.
        let mut headers = request.headers().clone();
        headers.remove(HDR_AUTHORIZATION);

        headers.insert(HeaderName::from_static(HDR_X_AMZ_DATE), header_value(&format_amz_date(&timestamp), false)?);

        if let Some(session_token) = self.credentials.session_token() {
            headers.insert(HeaderName::from_static(HDR_X_AMZ_SECURITY_TOKEN), header_value(session_token, true)?);
        }

        if self.sign_host_header && !headers.contains_key(HDR_HOST) {
            if let Some(authority) = request.uri().authority() {
                let host = match authority.port() {
                    Some(port) => format!("{}:{}", authority.host(), port),
                    None => authority.host().to_string(),
                };
                headers.insert(HeaderName::from_static(HDR_HOST), header_value(&host, false)?);
            }
        }

        let canonical_headers = canonicalize_header_map(&headers, &self.ignored_headers);
        let body_sha256 = digest_body(request.body())?;
        let canonical_request = CanonicalRequest::new(request.method().as_str(), canonical_headers, body_sha256);
        sink_trace!(self.log_sink, "Canonical request: {:?}", canonical_request);

        let scope = self.scope.with_date(timestamp.date_naive());
        let rederived = self.key_for(&scope);
        let signing_key = rederived.as_ref().unwrap_or(&self.signing_key);

        let algorithm = SigningAlgorithm::HmacSha256;
        let string_to_sign = string_to_sign(algorithm, &timestamp, &scope, &canonical_request.sha256_hex());
        sink_trace!(self.log_sink, "String to sign: {:?}", string_to_sign);

        let signature = hex::encode(sign(&string_to_sign, signing_key, algorithm));
        let signed_headers = canonical_request.signed_headers();
        let access_key_id = self.credentials.access_key_id();
        let authorization = authorization_header_value(algorithm, access_key_id, &scope, &signed_headers, &signature);
        headers.insert(HeaderName::from_static(HDR_AUTHORIZATION), header_value(&authorization, true)?);

        *request.headers_mut() = headers;
        sink_debug!(
            self.log_sink,
            "Signed {} {} for scope {}; SignedHeaders={}",
            request.method(),
            request.uri(),
            scope,
            signed_headers
        );

        Ok(SigningOutcome::Signed(SignedRequest {
            timestamp,
            scope,
            signed_headers,
            signature,
            authorization,
        }))
    }

    /// Returns a key derived for `scope` when its date calls for one, or `None` to use the cached key.
    fn key_for(&self, scope: &SigningScope) -> Option<KSigningKey> {
        if scope.date() == self.scope.date() {
            return None;
        }

        match self.date_rollover {
            DateRollover::ReuseStartupKey => {
                sink_warn!(
                    self.log_sink,
                    "Request date {} differs from signing key date {}; signing with the startup key",
                    scope.date(),
                    self.scope.date()
                );
                None
            }
            DateRollover::DeriveForRequestDate => {
                sink_debug!(self.log_sink, "Deriving a signing key for request date {}", scope.date());
                Some(scope.derive_key(self.credentials.secret_access_key()))
            }
        }
    }
}

fn header_value(value: &str, sensitive: bool) -> Result<HeaderValue, SigningError> {
    let mut header = HeaderValue::from_str(value)
        .map_err(|e| SigningError::InvalidHeaderValue(format!("{}", e)))?;
    header.set_sensitive(sensitive);
    Ok(header)
}
