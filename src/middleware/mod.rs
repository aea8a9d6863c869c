//! Middleware layer.
//!
//! Middleware intercepts every request before the route handler and every
//! response after it — the right place for cross-cutting concerns. The
//! stack registered with [`Router::wrap`](crate::Router::wrap) runs in
//! registration order and wraps unmatched routes too, so a logger on the
//! chain sees 404s like any other response.
//!
//! Built-in middleware:
//! - [`Trace`] — per-request log line with method, path, status, latency
//! - [`JsonBody`] — parses `application/json` bodies, rejects malformed
//!   JSON with 400
//!
//! Writing your own is one trait:
//!
//! ```rust,no_run
//! use wisp::{Middleware, Next, Request, Response, Router, StatusCode};
//! use wisp::middleware::BoxFuture;
//!
//! struct RequireHeader(&'static str);
//!
//! impl Middleware for RequireHeader {
//!     fn call(&self, req: Request, next: Next) -> BoxFuture {
//!         if req.header(self.0).is_none() {
//!             return Box::pin(async { Response::status(StatusCode::UNAUTHORIZED) });
//!         }
//!         next.run(req)
//!     }
//! }
//!
//! let app = Router::new().wrap(RequireHeader("x-api-key"));
//! ```

mod json;
mod trace;

use std::sync::Arc;

pub use crate::handler::BoxFuture;
use crate::handler::BoxedHandler;
use crate::request::Request;

pub use json::JsonBody;
pub use trace::Trace;

/// A layer in the middleware chain.
///
/// Receives the request and a [`Next`] handle to the rest of the chain.
/// Call `next.run(req)` to continue, or return a response directly to
/// short-circuit.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

/// The remainder of the middleware chain, ending at the route handler.
pub struct Next {
    stack: Arc<[Arc<dyn Middleware>]>,
    index: usize,
    endpoint: BoxedHandler,
}

impl Next {
    pub(crate) fn new(stack: Arc<[Arc<dyn Middleware>]>, endpoint: BoxedHandler) -> Self {
        Self { stack, index: 0, endpoint }
    }

    /// Runs the rest of the chain and then the route handler.
    pub fn run(mut self, req: Request) -> BoxFuture {
        match self.stack.get(self.index).cloned() {
            Some(middleware) => {
                self.index += 1;
                middleware.call(req, self)
            }
            None => self.endpoint.call(req),
        }
    }
}
