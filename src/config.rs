//! Signer configuration.

use {
    crate::{constants::*, logging::LogSink, Credentials, SigningError},
    derive_builder::Builder,
};

/// What the signer does when a request is made on a different UTC date than the one its signing
/// key was derived for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateRollover {
    /// Keep signing with the key derived at construction and log a warning. The credential scope
    /// carries the request's date, so remote services reject the signature once the dates differ.
    #[default]
    ReuseStartupKey,

    /// Derive a one-off key and scope for the request's own date. The cached key is left untouched.
    DeriveForRequestDate,
}

/// Configuration for a [`SigV4Signer`][crate::SigV4Signer].
///
/// Use [`SignerConfig::builder`] to construct one. `credentials` and `region` are required; every
/// other field has a default.
#[derive(Builder, Clone, Debug)]
#[builder(derive(Debug), build_fn(validate = "Self::validate", error = "SigningError"))]
pub struct SignerConfig {
    /// Credentials used to sign requests.
    credentials: Credentials,

    /// The region requests are signed for, e.g. `us-east-1`.
    #[builder(setter(into))]
    region: String,

    /// The service requests are signed for. Defaults to `dynamodb`.
    #[builder(setter(into), default = "DEFAULT_SERVICE.to_string()")]
    service: String,

    /// Header names excluded from signing, compared case-insensitively. Defaults to `connection`
    /// and `x-amzn-trace-id`, which proxies and tracing layers are free to rewrite.
    #[builder(setter(into), default = "DEFAULT_IGNORED_HEADERS.iter().map(|h| h.to_string()).collect()")]
    ignored_headers: Vec<String>,

    /// Behavior when the request date differs from the date of the cached signing key.
    #[builder(default)]
    date_rollover: DateRollover,

    /// Add a `Host` header taken from the request URI's authority when the request has none.
    #[builder(default)]
    sign_host_header: bool,

    /// Where log records are sent. Defaults to the logger installed with the `log` facade.
    #[builder(default)]
    log_sink: LogSink,
}

impl SignerConfig {
    /// Create a [`SignerConfigBuilder`] to construct a [`SignerConfig`].
    #[inline]
    pub fn builder() -> SignerConfigBuilder {
        SignerConfigBuilder::default()
    }

    /// Retrieve the credentials.
    #[inline]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Retrieve the region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Retrieve the service.
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Retrieve the header names excluded from signing.
    #[inline]
    pub fn ignored_headers(&self) -> &[String] {
        &self.ignored_headers
    }

    /// Retrieve the date rollover behavior.
    #[inline]
    pub fn date_rollover(&self) -> DateRollover {
        self.date_rollover
    }

    /// Indicates whether a missing `Host` header is filled in from the request URI.
    #[inline]
    pub fn sign_host_header(&self) -> bool {
        self.sign_host_header
    }

    /// Retrieve the log sink.
    #[inline]
    pub fn log_sink(&self) -> &LogSink {
        &self.log_sink
    }
}

impl SignerConfigBuilder {
    fn validate(&self) -> Result<(), SigningError> {
        if let Some(region) = &self.region {
            validate_scope_element("region", region)?;
        }

        if let Some(service) = &self.service {
            validate_scope_element("service", service)?;
        }

        if let Some(ignored_headers) = &self.ignored_headers {
            if let Some(header) = ignored_headers.iter().find(|h| h.trim().is_empty()) {
                return Err(SigningError::InvalidConfiguration(format!("Invalid ignored header name: {:?}", header)));
            }
        }

        Ok(())
    }
}

/// Region and service names are embedded verbatim in the `/`-separated credential scope.
fn validate_scope_element(kind: &str, value: &str) -> Result<(), SigningError> {
    if value.is_empty() {
        return Err(SigningError::InvalidConfiguration(format!("{} must not be empty", kind)));
    }

    if let Some(c) = value.chars().find(|c| !c.is_ascii_graphic() || *c == '/') {
        return Err(SigningError::InvalidConfiguration(format!("{} contains invalid character {:?}", kind, c)));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        super::{DateRollover, SignerConfig},
        crate::{Credentials, SigningError},
    };

    fn creds() -> Credentials {
        Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
    }

    #[test_log::test]
    fn test_defaults() {
        let config = SignerConfig::builder().credentials(creds()).region("us-west-2").build().unwrap();
        assert_eq!(config.region(), "us-west-2");
        assert_eq!(config.service(), "dynamodb");
        assert_eq!(config.ignored_headers(), &["connection".to_string(), "x-amzn-trace-id".to_string()]);
        assert_eq!(config.date_rollover(), DateRollover::ReuseStartupKey);
        assert!(!config.sign_host_header());
        assert_eq!(config.credentials().access_key_id(), "AKIDEXAMPLE");
        assert_eq!(format!("{:?}", config.log_sink()), "LogSink::Global");
        assert!(!format!("{:?}", config).contains("wJalrXUtnFEMI"));
    }

    #[test_log::test]
    fn test_overrides() {
        let config = SignerConfig::builder()
            .credentials(creds())
            .region("eu-west-1")
            .service("execute-api")
            .ignored_headers(vec!["user-agent".to_string()])
            .date_rollover(DateRollover::DeriveForRequestDate)
            .sign_host_header(true)
            .build()
            .unwrap();
        assert_eq!(config.service(), "execute-api");
        assert_eq!(config.ignored_headers(), &["user-agent".to_string()]);
        assert_eq!(config.date_rollover(), DateRollover::DeriveForRequestDate);
        assert!(config.sign_host_header());
    }

    #[test_log::test]
    fn test_missing_required_fields() {
        let e = SignerConfig::builder().region("us-east-1").build().unwrap_err();
        match e {
            SigningError::InvalidConfiguration(msg) => assert_eq!(msg, "credentials must be set"),
            other => panic!("Expected InvalidConfiguration; got {:?}", other),
        }

        let e = SignerConfig::builder().credentials(creds()).build().unwrap_err();
        assert_eq!(e.to_string(), "Invalid signer configuration: region must be set");
    }

    #[test_log::test]
    fn test_invalid_scope_elements() {
        for (region, service) in [
            ("", "dynamodb"),
            ("us-east-1", ""),
            ("us east 1", "dynamodb"),
            ("us-east-1", "dynamo/db"),
            ("us-\u{e9}ast-1", "s3"),
        ] {
            let e = SignerConfig::builder().credentials(creds()).region(region).service(service).build().unwrap_err();
            assert!(matches!(e, SigningError::InvalidConfiguration(_)), "region={:?} service={:?}", region, service);
        }

        let e = SignerConfig::builder().credentials(creds()).region("").build().unwrap_err();
        assert_eq!(e.to_string(), "Invalid signer configuration: region must not be empty");
    }

    #[test_log::test]
    fn test_blank_ignored_header_rejected() {
        let e = SignerConfig::builder()
            .credentials(creds())
            .region("us-east-1")
            .ignored_headers(vec!["connection".to_string(), " ".to_string()])
            .build()
            .unwrap_err();
        assert!(matches!(e, SigningError::InvalidConfiguration(_)));
    }
}
