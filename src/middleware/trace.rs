//! Request logging middleware.

use std::time::Instant;

use tracing::{error, info, warn};

use super::{BoxFuture, Middleware, Next};
use crate::request::Request;

/// Logs one line per request: method, path, status, latency.
///
/// The log level follows the status class — `info` for success and
/// redirects, `warn` for client errors, `error` for server errors — so a
/// `RUST_LOG=warn` deployment still surfaces failing traffic. Timestamps
/// come from the `tracing` subscriber's formatter.
///
/// Register it first so it observes what every later layer returns,
/// including short-circuits:
///
/// ```rust,no_run
/// use wisp::{middleware, Router};
///
/// let app = Router::new()
///     .wrap(middleware::Trace)
///     .wrap(middleware::JsonBody);
/// ```
pub struct Trace;

impl Middleware for Trace {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let method = req.method().clone();
        let path = req.path().to_owned();

        Box::pin(async move {
            let start = Instant::now();
            let response = next.run(req).await;
            let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            let status = response.status_code();

            if status.is_server_error() {
                error!(%method, path = %path, status = status.as_u16(), elapsed_ms, "request");
            } else if status.is_client_error() {
                warn!(%method, path = %path, status = status.as_u16(), elapsed_ms, "request");
            } else {
                info!(%method, path = %path, status = status.as_u16(), elapsed_ms, "request");
            }

            response
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use crate::request::test_request;
    use crate::response::Response;
    use http::{Method, StatusCode};
    use std::sync::Arc;

    async fn teapot(_req: Request) -> Response {
        Response::status(StatusCode::IM_A_TEAPOT)
    }

    #[tokio::test]
    async fn response_passes_through_unchanged() {
        let stack: Arc<[Arc<dyn Middleware>]> = vec![Arc::new(Trace) as Arc<dyn Middleware>].into();
        let next = Next::new(stack, teapot.into_boxed_handler());

        let response = next.run(test_request(Method::GET, "/tea", b"")).await;
        assert_eq!(response.status_code(), StatusCode::IM_A_TEAPOT);
    }
}
