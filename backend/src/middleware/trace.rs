//! Tracing middleware attaching a request-scoped trace identifier.
//!
//! Each incoming request runs inside a `tracing` span carrying a UUID
//! `trace_id`, the method, and the path, and every response gets a
//! `Trace-Id` header for correlation with logs.

use std::task::{Context, Poll};

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::Error;
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::{error, info_span, Instrument};
use uuid::Uuid;

/// Tracing middleware. Wrap the `App` with it once, near the outside.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use rolodex::Trace;
///
/// let app = App::new().wrap(Trace);
/// ```
#[derive(Clone)]
pub struct Trace;

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware { service }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let trace_id = Uuid::new_v4();
        let span = info_span!(
            "request",
            %trace_id,
            method = %req.method(),
            path = %req.path(),
        );
        let header_value = trace_id.to_string();
        let fut = self.service.call(req);
        Box::pin(
            async move {
                let mut res = fut.await?;
                match HeaderValue::from_str(&header_value) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static("trace-id"), value);
                    }
                    Err(encode_error) => {
                        error!(error = %encode_error, "failed to encode trace identifier header");
                    }
                }
                Ok(res)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test as actix_test, web, App, HttpResponse};

    #[actix_web::test]
    async fn adds_trace_id_header() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        let header = res.headers().get("trace-id").expect("trace-id header");
        let raw = header.to_str().expect("header is ascii");
        Uuid::parse_str(raw).expect("header is a UUID");
    }

    #[actix_web::test]
    async fn each_request_gets_a_distinct_trace_id() {
        let app = actix_test::init_service(
            App::new()
                .wrap(Trace)
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let first = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        let second = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/").to_request(),
        )
        .await;
        assert_ne!(
            first.headers().get("trace-id"),
            second.headers().get("trace-id")
        );
    }
}
