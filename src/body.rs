//! HTTP request body handling for signing.
use {
    bytes::Bytes,
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        io::{copy, Read, Result as IoResult, Write},
    },
};

/// A request body that can be hashed for signing.
///
/// Signing only needs to observe the body once: the bytes are written into a hashing sink and
/// discarded. Implementations must write the same bytes that the transport will later send.
pub trait SignableBody {
    /// Indicates whether the request carries a body at all.
    ///
    /// Requests without a body are forwarded unsigned. An empty body is still a body.
    fn is_present(&self) -> bool {
        true
    }

    /// Write the body into `sink`.
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()>;
}

/// The unit type is a request without a body.
impl SignableBody for () {
    fn is_present(&self) -> bool {
        false
    }

    fn write_to(&self, _sink: &mut dyn Write) -> IoResult<()> {
        Ok(())
    }
}

/// `None` is a request without a body; `Some(body)` delegates to `body`.
impl<T: SignableBody> SignableBody for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(SignableBody::is_present)
    }

    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        match self {
            Some(body) => body.write_to(sink),
            None => Ok(()),
        }
    }
}

impl SignableBody for Bytes {
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        sink.write_all(self)
    }
}

impl SignableBody for Vec<u8> {
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        sink.write_all(self)
    }
}

impl SignableBody for String {
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        sink.write_all(self.as_bytes())
    }
}

impl SignableBody for &'static str {
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        sink.write_all(self.as_bytes())
    }
}

impl SignableBody for &'static [u8] {
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        sink.write_all(self)
    }
}

/// A body backed by a [`Read`] source that can be reopened.
///
/// Each call to [`write_to`][SignableBody::write_to] obtains a fresh reader from the factory and
/// streams it into the sink, so the transport can open its own reader afterwards. This suits
/// file-backed and other large bodies that should not be held in memory.
#[derive(Clone)]
pub struct ReaderBody<F> {
    open: F,
}

impl<F, R> ReaderBody<F>
where
    F: Fn() -> IoResult<R>,
    R: Read,
{
    /// Create a body from a function that opens a new reader over the body bytes.
    pub fn new(open: F) -> Self {
        Self {
            open,
        }
    }

    /// Open a new reader over the body bytes.
    pub fn open(&self) -> IoResult<R> {
        (self.open)()
    }
}

impl<F, R> SignableBody for ReaderBody<F>
where
    F: Fn() -> IoResult<R>,
    R: Read,
{
    fn write_to(&self, sink: &mut dyn Write) -> IoResult<()> {
        let mut reader = self.open()?;
        copy(&mut reader, sink)?;
        Ok(())
    }
}

impl<F> Debug for ReaderBody<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str("ReaderBody")
    }
}
