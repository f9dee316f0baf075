//! Per-request id, span and completion log line.
//!
//! Generates a request id, stores it in the request extensions and the
//! task-local [`crate::request_ctx`], runs the handler inside a `request`
//! span and logs one `request_completed` line with status and duration.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::{Error, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::request_ctx;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request id as stored in the request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(pub String);

#[derive(Clone, Default)]
pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLogMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLogMiddleware { service }))
    }
}

pub struct RequestLogMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLogMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let request_id = Uuid::new_v4().to_string();
        let method = req.method().to_string();
        let path = req.path().to_string();

        req.extensions_mut().insert(RequestId(request_id.clone()));

        let span = info_span!(
            "request",
            request_id = %request_id,
            method = %method,
            path = %path
        );
        let fut = request_ctx::with_request_id(request_id.clone(), self.service.call(req))
            .instrument(span);

        Box::pin(async move {
            let mut result = fut.await;

            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();

            if status.is_server_error() {
                error!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, request_id = %request_id, "request_completed");
            } else if status.is_client_error() {
                warn!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, request_id = %request_id, "request_completed");
            } else {
                info!(http.method = %method, url.path = %path, http.status_code = status_code, duration_us, request_id = %request_id, "request_completed");
            }

            if let (Ok(res), Ok(value)) = (&mut result, HeaderValue::from_str(&request_id)) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }

            result
        })
    }
}
