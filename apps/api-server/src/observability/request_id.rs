//! Request ID middleware - correlates log lines with responses.

use std::future::{Future, Ready, ready};
use std::pin::Pin;

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    http::header::{HeaderName, HeaderValue},
};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for request ID.
pub static REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_INBOUND_ID_LEN: usize = 128;

/// Assigns each request an ID, reusing a well-formed inbound `X-Request-ID`.
/// The ID is echoed in the response header and recorded on the request span.
pub struct RequestIdMiddleware;

impl<S, B> Transform<S, ServiceRequest> for RequestIdMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestIdService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdService { service }))
    }
}

pub struct RequestIdService<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| is_acceptable_id(v))
            .map(String::from)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %req.method(),
            path = %req.path(),
        );
        let fut = self.service.call(req);

        Box::pin(
            async move {
                let mut res = fut.await?;
                tracing::debug!(status = res.status().as_u16(), "Request finished");

                res.headers_mut().insert(
                    HeaderName::from_static(REQUEST_ID_HEADER),
                    HeaderValue::from_str(&request_id)
                        .unwrap_or_else(|_| HeaderValue::from_static("unknown")),
                );

                Ok(res)
            }
            .instrument(span),
        )
    }
}

fn is_acceptable_id(value: &str) -> bool {
    !value.is_empty()
        && value.len() <= MAX_INBOUND_ID_LEN
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

#[cfg(test)]
mod tests {
    use actix_web::{App, HttpResponse, test, web};

    use super::*;

    async fn echo() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_generates_id_when_absent() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(echo)),
        )
        .await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let header = res.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[actix_web::test]
    async fn test_reuses_inbound_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(echo)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("X-Request-ID", "edge-1234"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.headers().get(REQUEST_ID_HEADER).unwrap(), "edge-1234");
    }

    #[actix_web::test]
    async fn test_replaces_malformed_inbound_id() {
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .route("/", web::get().to(echo)),
        )
        .await;
        let req = test::TestRequest::get()
            .uri("/")
            .insert_header(("X-Request-ID", "not valid!"))
            .to_request();
        let res = test::call_service(&app, req).await;
        let header = res.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(header).is_ok());
    }

    #[::core::prelude::v1::test]
    fn test_rejects_malformed_inbound_ids() {
        assert!(is_acceptable_id("abc-123_x.y"));
        assert!(!is_acceptable_id(""));
        assert!(!is_acceptable_id("has space"));
        assert!(!is_acceptable_id(&"a".repeat(MAX_INBOUND_ID_LEN + 1)));
    }
}
