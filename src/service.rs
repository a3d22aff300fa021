use {
    crate::{body::SignableBody, signer::SigV4Signer},
    http::Request,
    std::{
        any::type_name,
        fmt::{Debug, Formatter, Result as FmtResult},
        future::{ready, Future},
        pin::Pin,
        sync::Arc,
        task::{Context, Poll},
    },
    tower::{BoxError, Layer, Service},
};

/// A [`Layer`] that wraps services with [`SigV4SigningService`].
///
/// Every service produced by the layer shares the same [`SigV4Signer`].
#[derive(Clone, Debug)]
pub struct SigV4SigningLayer {
    signer: Arc<SigV4Signer>,
}

impl SigV4SigningLayer {
    /// Create a layer that signs requests with `signer`.
    pub fn new(signer: SigV4Signer) -> Self {
        Self::from_arc(Arc::new(signer))
    }

    /// Create a layer from an already shared signer.
    pub fn from_arc(signer: Arc<SigV4Signer>) -> Self {
        Self {
            signer,
        }
    }

    /// Retrieve the signer.
    #[inline]
    pub fn signer(&self) -> &SigV4Signer {
        &self.signer
    }
}

impl<S> Layer<S> for SigV4SigningLayer {
    type Service = SigV4SigningService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SigV4SigningService::new(self.signer.clone(), inner)
    }
}

/// SigV4SigningService signs each outbound request before handing it to the wrapped service.
///
/// Requests without a body are forwarded unchanged. If signing fails, the error is returned to the
/// caller as a [`BoxError`] wrapping a [`SigningError`][crate::SigningError] and the wrapped
/// service is not called.
#[derive(Clone)]
pub struct SigV4SigningService<S> {
    signer: Arc<SigV4Signer>,
    inner: S,
}

impl<S> SigV4SigningService<S> {
    /// Wrap `inner` so that requests are signed with `signer`.
    pub fn new(signer: Arc<SigV4Signer>, inner: S) -> Self {
        Self {
            signer,
            inner,
        }
    }

    /// Retrieve the signer.
    #[inline]
    pub fn signer(&self) -> &SigV4Signer {
        &self.signer
    }

    /// Retrieve the wrapped service.
    #[inline]
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Consume this service, returning the wrapped service.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S> Debug for SigV4SigningService<S> {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        f.debug_struct("SigV4SigningService")
            .field("signer", &self.signer)
            .field("inner", &type_name::<S>())
            .finish()
    }
}

impl<S, B> Service<Request<B>> for SigV4SigningService<S>
where
    S: Service<Request<B>>,
    S::Error: Into<BoxError>,
    S::Future: Send + 'static,
    S::Response: Send + 'static,
    B: SignableBody,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = Pin<Box<dyn Future<Output = Result<S::Response, BoxError>> + Send>>;

    fn poll_ready(&mut self, c: &mut Context) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(c).map_err(Into::into)
    }

    fn call(&mut self, mut req: Request<B>) -> Self::Future {
        // The inner service is not called unless signing succeeds.
        if let Err(e) = self.signer.sign_request(&mut req) {
            return Box::pin(ready(Err(e.into())));
        }

        let response = self.inner.call(req);
        Box::pin(async move { response.await.map_err(Into::into) })
    }
}
