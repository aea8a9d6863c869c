//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. You register a path,
//! you get a handler; the middleware stack registered with [`Router::wrap`]
//! runs around every request, matched or not.

use std::collections::HashMap;
use std::sync::Arc;

use http::Method;
use matchit::Router as MatchitRouter;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Every registration method returns `self` so calls chain naturally:
///
/// ```rust,no_run
/// # use wisp::{middleware, Request, Response, Router};
/// # async fn get_user(_: Request) -> Response { Response::text("") }
/// # async fn create_user(_: Request) -> Response { Response::text("") }
/// Router::new()
///     .wrap(middleware::Trace)
///     .wrap(middleware::JsonBody)
///     .get("/users/{id}", get_user)
///     .post("/users", create_user);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    stack: Vec<Arc<dyn Middleware>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), stack: Vec::new() }
    }

    /// Appends `middleware` to the application-wide stack.
    ///
    /// The stack runs for every request in registration order, before the
    /// route handler, and also around requests that match no route. That is
    /// what lets [`Trace`](crate::middleware::Trace) log 404s.
    pub fn wrap(mut self, middleware: impl Middleware) -> Self {
        self.stack.push(Arc::new(middleware));
        self
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and are retrieved with
    /// [`Request::param`](crate::Request::param).
    ///
    /// # Panics
    ///
    /// Panics on a malformed or conflicting path pattern. Routes are
    /// registered once at startup, so this fails the process before it can
    /// serve anything.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    pub fn put(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PUT, path, handler)
    }

    pub fn delete(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::DELETE, path, handler)
    }

    pub fn patch(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::PATCH, path, handler)
    }

    pub fn head(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::HEAD, path, handler)
    }

    pub fn options(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::OPTIONS, path, handler)
    }

    pub(crate) fn lookup(
        &self,
        method: &Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Snapshot of the middleware stack, shared across connection tasks.
    pub(crate) fn middleware_stack(&self) -> Arc<[Arc<dyn Middleware>]> {
        self.stack.clone().into()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::Request;
    use crate::response::Response;

    async fn handler(_req: Request) -> Response {
        Response::text("ok")
    }

    #[test]
    fn lookup_matches_method_and_path() {
        let router = Router::new().get("/things", handler);
        assert!(router.lookup(&Method::GET, "/things").is_some());
        assert!(router.lookup(&Method::POST, "/things").is_none());
        assert!(router.lookup(&Method::GET, "/other").is_none());
    }

    #[test]
    fn lookup_extracts_path_params() {
        let router = Router::new().get("/users/{id}", handler);
        let (_, params) = router.lookup(&Method::GET, "/users/42").unwrap();
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn same_path_different_methods_coexist() {
        let router = Router::new()
            .get("/users/{id}", handler)
            .delete("/users/{id}", handler);
        assert!(router.lookup(&Method::GET, "/users/7").is_some());
        assert!(router.lookup(&Method::DELETE, "/users/7").is_some());
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic_at_registration() {
        let _ = Router::new().get("/users/{id}", handler).get("/users/{id}", handler);
    }

    #[test]
    fn wrap_accumulates_middleware_in_order() {
        let router = Router::new()
            .wrap(crate::middleware::Trace)
            .wrap(crate::middleware::JsonBody);
        assert_eq!(router.middleware_stack().len(), 2);
    }
}
