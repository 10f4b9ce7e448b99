/// Security headers middleware
///
/// Adds the usual hardening headers to every response. The API only serves
/// JSON, so the content security policy forbids everything.
///
/// # Headers Applied
///
/// - `X-Content-Type-Options: nosniff`
/// - `X-Frame-Options: DENY`
/// - `Referrer-Policy: no-referrer`
/// - `Content-Security-Policy: default-src 'none'; frame-ancestors 'none'`
/// - `Strict-Transport-Security` (production only)
///
/// # Example
///
/// ```no_run
/// use axum::Router;
/// use devconnector_api::middleware::security::SecurityHeadersLayer;
///
/// let app: Router = Router::new()
///     .layer(SecurityHeadersLayer::new(true)); // true = production mode
/// ```

use axum::{
    extract::Request,
    http::{header, HeaderValue},
    response::Response,
};
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Security headers middleware layer
#[derive(Clone, Copy)]
pub struct SecurityHeadersLayer {
    /// Whether to send HSTS (only behind HTTPS)
    enable_hsts: bool,
}

impl SecurityHeadersLayer {
    pub fn new(enable_hsts: bool) -> Self {
        Self { enable_hsts }
    }
}

impl<S> Layer<S> for SecurityHeadersLayer {
    type Service = SecurityHeadersMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        SecurityHeadersMiddleware {
            inner,
            enable_hsts: self.enable_hsts,
        }
    }
}

/// Security headers middleware service
#[derive(Clone)]
pub struct SecurityHeadersMiddleware<S> {
    inner: S,
    enable_hsts: bool,
}

impl<S> Service<Request> for SecurityHeadersMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let future = self.inner.call(request);
        let enable_hsts = self.enable_hsts;

        Box::pin(async move {
            let mut response = future.await?;
            let headers = response.headers_mut();

            headers.insert(header::X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
            headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
            headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
            headers.insert(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
            );

            if enable_hsts {
                headers.insert(
                    header::STRICT_TRANSPORT_SECURITY,
                    HeaderValue::from_static("max-age=31536000; includeSubDomains"),
                );
            }

            Ok(response)
        })
    }
}
