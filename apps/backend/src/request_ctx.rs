//! Task-local request id.
//!
//! Set by [`crate::middleware::RequestLog`] for the duration of a request so
//! error responses can echo it without threading the request through.

use tokio::task_local;

task_local! {
    static REQUEST_ID: String;
}

/// Id of the request being handled, or `"unknown"` outside a request.
pub fn request_id() -> String {
    REQUEST_ID
        .try_with(Clone::clone)
        .unwrap_or_else(|_| "unknown".to_string())
}

pub async fn with_request_id<F, R>(request_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    REQUEST_ID.scope(request_id, future).await
}
