use {
    derive_builder::UninitializedFieldError,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
        io::Error as IOError,
    },
};

/// Error returned when a request cannot be signed.
///
/// Signing either attaches a complete `Authorization` header or fails with one of these; a request
/// is never forwarded with a partial signature.
#[derive(Debug)]
#[non_exhaustive]
pub enum SigningError {
    /// The credentials are empty or malformed. Raised when the signer is constructed.
    InvalidCredentials(/* message */ String),

    /// The region or service cannot be used in a credential scope. Raised when the signer is constructed.
    InvalidConfiguration(/* message */ String),

    /// A computed header value cannot be represented as an HTTP header.
    InvalidHeaderValue(/* message */ String),

    /// The request body could not be read while computing its digest.
    IO(IOError),
}

impl Display for SigningError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidCredentials(msg) => write!(f, "Invalid credentials: {}", msg),
            Self::InvalidConfiguration(msg) => write!(f, "Invalid signer configuration: {}", msg),
            Self::InvalidHeaderValue(msg) => write!(f, "Invalid header value: {}", msg),
            Self::IO(ref e) => write!(f, "Failed to read request body: {}", e),
        }
    }
}

impl Error for SigningError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::IO(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<IOError> for SigningError {
    fn from(e: IOError) -> SigningError {
        SigningError::IO(e)
    }
}

impl From<UninitializedFieldError> for SigningError {
    fn from(e: UninitializedFieldError) -> SigningError {
        SigningError::InvalidConfiguration(format!("{} must be set", e.field_name()))
    }
}
