use {
    crate::{constants::*, SigningError},
    http::header::HeaderValue,
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

/// Already-resolved AWS credentials used to sign requests.
///
/// Session credentials carry a security token that is sent in the `x-amz-security-token` header
/// and included in the signature.
///
/// The `Debug` representation shows only the access key id.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Long-term credentials: an access key id and secret access key.
    Plain {
        /// The access key id, e.g. `AKIDEXAMPLE`.
        access_key_id: String,

        /// The secret access key.
        secret_access_key: String,
    },

    /// Temporary credentials issued with a session token.
    Session {
        /// The access key id, e.g. `ASIAEXAMPLE`.
        access_key_id: String,

        /// The secret access key.
        secret_access_key: String,

        /// The session token.
        session_token: String,
    },
}

impl Credentials {
    /// Create plain credentials.
    pub fn new<A, S>(access_key_id: A, secret_access_key: S) -> Self
    where
        A: Into<String>,
        S: Into<String>,
    {
        Self::Plain {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Create session credentials.
    pub fn with_session_token<A, S, T>(access_key_id: A, secret_access_key: S, session_token: T) -> Self
    where
        A: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        Self::Session {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: session_token.into(),
        }
    }

    /// Retrieve the access key id.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        match self {
            Self::Plain {
                access_key_id,
                ..
            }
            | Self::Session {
                access_key_id,
                ..
            } => access_key_id,
        }
    }

    /// Retrieve the secret access key.
    #[inline]
    pub(crate) fn secret_access_key(&self) -> &str {
        match self {
            Self::Plain {
                secret_access_key,
                ..
            }
            | Self::Session {
                secret_access_key,
                ..
            } => secret_access_key,
        }
    }

    /// Retrieve the session token, if any.
    #[inline]
    pub fn session_token(&self) -> Option<&str> {
        match self {
            Self::Plain {
                ..
            } => None,
            Self::Session {
                session_token,
                ..
            } => Some(session_token),
        }
    }

    /// Return a copy with surrounding whitespace and control characters stripped from every field,
    /// verifying that the result can be used to sign requests.
    ///
    /// # Errors
    /// Returns [`SigningError::InvalidCredentials`] if a field is empty after trimming, if the access
    /// key id contains characters that would corrupt the `Credential=` parameter, or if the session
    /// token cannot be sent as an HTTP header.
    pub fn sanitized(&self) -> Result<Self, SigningError> {
        let access_key_id = sanitize(self.access_key_id());
        let secret_access_key = sanitize(self.secret_access_key());

        if access_key_id.is_empty() {
            return Err(SigningError::InvalidCredentials(ERR_MSG_EMPTY_ACCESS_KEY.to_string()));
        }

        if let Some(c) = access_key_id.chars().find(|c| !c.is_ascii_graphic() || *c == '/' || *c == ',') {
            return Err(SigningError::InvalidCredentials(format!(
                "Access key id contains invalid character {:?}",
                c
            )));
        }

        if secret_access_key.is_empty() {
            return Err(SigningError::InvalidCredentials(ERR_MSG_EMPTY_SECRET_KEY.to_string()));
        }

        match self {
            Self::Plain {
                ..
            } => Ok(Self::Plain {
                access_key_id,
                secret_access_key,
            }),
            Self::Session {
                session_token,
                ..
            } => {
                let session_token = sanitize(session_token);
                if session_token.is_empty() {
                    return Err(SigningError::InvalidCredentials(ERR_MSG_EMPTY_SESSION_TOKEN.to_string()));
                }

                if HeaderValue::from_str(&session_token).is_err() {
                    return Err(SigningError::InvalidCredentials(
                        "Session token cannot be sent as an HTTP header value".to_string(),
                    ));
                }

                Ok(Self::Session {
                    access_key_id,
                    secret_access_key,
                    session_token,
                })
            }
        }
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Plain {
                access_key_id,
                ..
            } => f
                .debug_struct("Plain")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &REDACTED)
                .finish(),
            Self::Session {
                access_key_id,
                ..
            } => f
                .debug_struct("Session")
                .field("access_key_id", access_key_id)
                .field("secret_access_key", &REDACTED)
                .field("session_token", &REDACTED)
                .finish(),
        }
    }
}

/// Strip leading and trailing characters at or below U+0020 (space and ASCII control characters).
fn sanitize(value: &str) -> String {
    value.trim_matches(|c: char| c <= ' ').to_string()
}
