//! Response-time middleware.
//!
//! Measures each request and reports the elapsed time both as an
//! `x-response-time` header (milliseconds) and a tracing event.

use std::task::{Context, Poll};
use std::time::Instant;

use axum::http::header::HeaderName;
use axum::http::{HeaderValue, Request, Response};
use futures::future::BoxFuture;
use tower::{Layer, Service};

pub static RESPONSE_TIME_HEADER: HeaderName = HeaderName::from_static("x-response-time");

// =============================================================================
// ResponseTimeLayer / ResponseTimeService
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct ResponseTimeLayer;

impl ResponseTimeLayer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl<Inner> Layer<Inner> for ResponseTimeLayer {
    type Service = ResponseTimeService<Inner>;

    fn layer(&self, inner: Inner) -> Self::Service {
        ResponseTimeService { inner }
    }
}

#[derive(Debug, Clone)]
pub struct ResponseTimeService<Inner> {
    inner: Inner,
}

impl<Inner, RequestBody, ResponseBody> Service<Request<RequestBody>>
    for ResponseTimeService<Inner>
where
    Inner: Service<Request<RequestBody>, Response = Response<ResponseBody>>
        + Clone
        + Send
        + 'static,
    Inner::Future: Send,
    RequestBody: Send + 'static,
    ResponseBody: Send + 'static,
{
    type Response = Response<ResponseBody>;
    type Error = Inner::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, context: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(context)
    }

    fn call(&mut self, request: Request<RequestBody>) -> Self::Future {
        let method = request.method().clone();
        let path = request.uri().path().to_string();
        let started_at = Instant::now();

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let mut response = inner.call(request).await?;

            let elapsed = started_at.elapsed();
            let millis = elapsed.as_millis();

            tracing::debug!(
                method = %method,
                path = %path,
                status = response.status().as_u16(),
                elapsed_ms = millis as u64,
                "request completed"
            );

            if let Ok(header_value) = HeaderValue::from_str(&format!("{}ms", millis)) {
                response
                    .headers_mut()
                    .insert(RESPONSE_TIME_HEADER.clone(), header_value);
            }

            Ok(response)
        })
    }
}
