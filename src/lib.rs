//! The `scratchstack_aws_signer` crate signs outbound HTTP requests with AWS Signature Version 4
//! (SigV4). It is meant to sit in an HTTP client pipeline as a [tower](https://docs.rs/tower)
//! layer. Every request that carries a body leaves the layer with `X-Amz-Date`,
//! `X-Amz-Security-Token` (for session credentials) and `Authorization` headers attached.
//!
//! This is not a full AWS SDK signer. Requests are signed as if made against the root path (`/`)
//! with no query string, which is how JSON-protocol services such as DynamoDB are called. Requests
//! without a body pass through untouched.
//!
//! # Workflow
//! 1. Build a [`SignerConfig`] with your credentials and region.
//! 2. Create a [`SigV4Signer`]. This validates the credentials and derives the signing key once.
//! 3. Either call [`SigV4Signer::sign_request`] directly, or wrap your client service with
//!    [`SigV4SigningLayer`].
//!
//! ## Example
//! ```rust
//! use bytes::Bytes;
//! use http::Request;
//! use scratchstack_aws_signer::{Credentials, SigV4Signer, SigV4SigningLayer, SignerConfig};
//! use std::convert::Infallible;
//! use tower::{service_fn, ServiceBuilder, ServiceExt};
//!
//! let config = SignerConfig::builder()
//!     .credentials(Credentials::new("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY"))
//!     .region("us-east-1")
//!     .build()
//!     .unwrap();
//! let signer = SigV4Signer::new(config).unwrap();
//!
//! // Normally this would be your HTTP client.
//! let client = service_fn(|req: Request<Bytes>| async move { Ok::<_, Infallible>(req) });
//! let svc = ServiceBuilder::new().layer(SigV4SigningLayer::new(signer)).service(client);
//!
//! let req = Request::post("https://dynamodb.us-east-1.amazonaws.com/")
//!     .header("Content-Type", "application/x-amz-json-1.0")
//!     .header("X-Amz-Target", "DynamoDB_20120810.ListTables")
//!     .body(Bytes::from_static(b"{}"))
//!     .unwrap();
//!
//! # tokio_test::block_on(async {
//! let sent = svc.oneshot(req).await.unwrap();
//! let authz = sent.headers().get("authorization").unwrap().to_str().unwrap();
//! assert!(authz.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
//! # });
//! ```

#![warn(clippy::all)]
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

#[macro_use]
mod logging;

mod body;
mod canonical;
mod chronoutil;
mod config;
mod constants;
mod credentials;
pub mod crypto;
mod error;
mod service;
mod signature;
mod signer;
mod signing_key;

pub use {
    body::{ReaderBody, SignableBody},
    canonical::{
        canonicalize_header_map, canonicalize_headers, canonicalize_text_headers, compact_whitespace, CanonicalHeader,
        CanonicalRequest,
    },
    config::{DateRollover, SignerConfig, SignerConfigBuilder},
    credentials::Credentials,
    error::SigningError,
    logging::LogSink,
    service::{SigV4SigningLayer, SigV4SigningService},
    signature::{authorization_header_value, sign, string_to_sign, SigningAlgorithm},
    signer::{SigV4Signer, SignedRequest, SigningOutcome},
    signing_key::{
        derive_signing_key, KDateKey, KRegionKey, KSecretKey, KServiceKey, KSigningKey, SigningScope,
    },
};
