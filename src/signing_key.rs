use {
    crate::{
        chronoutil::format_scope_date,
        constants::*,
        crypto::hmac_sha256,
    },
    chrono::NaiveDate,
    std::fmt::{Debug, Display, Formatter, Result as FmtResult},
};

/// A raw AWS secret key (`kSecret`), held with its `"AWS4"` prefix.
#[derive(Clone, PartialEq, Eq)]
pub struct KSecretKey {
    /// The secret key, prefixed with "AWS4".
    prefixed_key: Vec<u8>,
}

/// The `kDate` key: `HMAC_SHA256("AWS4" + KSecretKey, "YYYYMMDD")`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KDateKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kRegion` key: an AWS `kDate` key, HMAC-SHA256 hashed with the region.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KRegionKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kService` key: an AWS `kRegion` key, HMAC-SHA256 hashed with the service.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KServiceKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kSigning` key: an AWS `kService` key, HMAC-SHA256 hashed with the "aws4_request" string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KSigningKey {
    /// The resulting raw signing key.
    key: [u8; SHA256_OUTPUT_LEN],
}

impl AsRef<[u8]> for KSecretKey {
    fn as_ref(&self) -> &[u8] {
        // Remove the "AWS4" prefix.
        &self.prefixed_key[AWS4_PREFIX.len()..]
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KDateKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KRegionKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KServiceKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KSigningKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

macro_rules! opaque_key_fmt {
    ($($key:ident),+) => {
        $(
            impl Debug for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }

            impl Display for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }
        )+
    };
}

opaque_key_fmt!(KSecretKey, KDateKey, KRegionKey, KServiceKey, KSigningKey);

impl From<&str> for KSecretKey {
    /// Create a new `KSecretKey` from a raw AWS secret key.
    fn from(raw: &str) -> Self {
        let mut prefixed_key = Vec::with_capacity(AWS4_PREFIX.len() + raw.len());
        prefixed_key.extend_from_slice(AWS4_PREFIX);
        prefixed_key.extend_from_slice(raw.as_bytes());
        Self {
            prefixed_key,
        }
    }
}

impl KSecretKey {
    /// Create a new `KDateKey` from this `KSecretKey` and a date.
    pub fn to_kdate(&self, date: NaiveDate) -> KDateKey {
        let date = format_scope_date(date);
        KDateKey {
            key: hmac_sha256(self.prefixed_key.as_slice(), date.as_bytes()),
        }
    }

    /// Create a new `KRegionKey` from this `KSecretKey`, a date, and a region.
    pub fn to_kregion(&self, date: NaiveDate, region: &str) -> KRegionKey {
        self.to_kdate(date).to_kregion(region)
    }

    /// Create a new `KServiceKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_kservice(&self, date: NaiveDate, region: &str, service: &str) -> KServiceKey {
        self.to_kdate(date).to_kservice(region, service)
    }

    /// Create a new `KSigningKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_ksigning(&self, date: NaiveDate, region: &str, service: &str) -> KSigningKey {
        self.to_kdate(date).to_ksigning(region, service)
    }
}

impl KDateKey {
    /// Create a new `KRegionKey` from this `KDateKey` and a region.
    pub fn to_kregion(&self, region: &str) -> KRegionKey {
        KRegionKey {
            key: hmac_sha256(self.key.as_slice(), region.as_bytes()),
        }
    }

    /// Create a new `KServiceKey` from this `KDateKey`, a region, and a service.
    pub fn to_kservice(&self, region: &str, service: &str) -> KServiceKey {
        self.to_kregion(region).to_kservice(service)
    }

    /// Create a new `KSigningKey` from this `KDateKey`, a region, and a service.
    pub fn to_ksigning(&self, region: &str, service: &str) -> KSigningKey {
        self.to_kregion(region).to_ksigning(service)
    }
}

impl KRegionKey {
    /// Create a new `KServiceKey` from this `KRegionKey` and a service.
    pub fn to_kservice(&self, service: &str) -> KServiceKey {
        KServiceKey {
            key: hmac_sha256(self.key.as_slice(), service.as_bytes()),
        }
    }

    /// Create a new `KSigningKey` from this `KRegionKey` and a service.
    pub fn to_ksigning(&self, service: &str) -> KSigningKey {
        self.to_kservice(service).to_ksigning()
    }
}

impl KServiceKey {
    /// Create a new `KSigningKey` from this `KServiceKey`.
    pub fn to_ksigning(&self) -> KSigningKey {
        KSigningKey {
            key: hmac_sha256(self.key.as_slice(), AWS4_REQUEST.as_bytes()),
        }
    }
}

/// Derive the `kSigning` key for a secret key, date, region, and service.
///
/// This runs the four-step HMAC chain `kDate` → `kRegion` → `kService` → `kSigning`.
pub fn derive_signing_key(secret_key: &str, date: NaiveDate, region: &str, service: &str) -> KSigningKey {
    KSecretKey::from(secret_key).to_ksigning(date, region, service)
}

/// The credential scope a signature is valid for.
///
/// The `Display` form is `YYYYMMDD/region/service/aws4_request`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SigningScope {
    date: NaiveDate,
    region: String,
    service: String,
}

impl SigningScope {
    /// Create a new scope.
    pub fn new<R, S>(date: NaiveDate, region: R, service: S) -> Self
    where
        R: Into<String>,
        S: Into<String>,
    {
        Self {
            date,
            region: region.into(),
            service: service.into(),
        }
    }

    /// Retrieve the date of the scope.
    #[inline]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Retrieve the region of the scope.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Retrieve the service of the scope.
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Return the same region and service scoped to a different date.
    pub fn with_date(&self, date: NaiveDate) -> Self {
        Self {
            date,
            region: self.region.clone(),
            service: self.service.clone(),
        }
    }

    /// Derive the signing key for this scope from a raw secret key.
    pub fn derive_key(&self, secret_key: &str) -> KSigningKey {
        derive_signing_key(secret_key, self.date, &self.region, &self.service)
    }
}

impl Display for SigningScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}/{}/{}", format_scope_date(self.date), self.region, self.service, AWS4_REQUEST)
    }
}
