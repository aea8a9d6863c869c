//! # wisp
//!
//! A minimal HTTP service kit for Rust services behind a reverse proxy.
//! Routing, a middleware chain, request logging, JSON bodies. Nothing more.
//!
//! ## The contract
//!
//! nginx handles TLS, rate limiting, slow clients, and body-size limits.
//! wisp does not. The proxy does proxy things. The service kit does service
//! things. Every feature wisp skips is one nginx already ships, tested at
//! scale, at no cost to you.
//!
//! What's left for wisp — the only part that changes between applications:
//!
//! - Radix-tree routing — O(path-length) lookup via [`matchit`]
//! - An application-wide middleware chain — [`middleware::Trace`] for
//!   request logging, [`middleware::JsonBody`] for JSON body parsing
//! - Graceful shutdown — SIGTERM / Ctrl-C, drains in-flight requests
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use wisp::{middleware, Config, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     let config = Config::from_env().expect("invalid PORT");
//!
//!     let app = Router::new()
//!         .wrap(middleware::Trace)
//!         .wrap(middleware::JsonBody)
//!         .get("/", index);
//!
//!     Server::bind(&config.addr()).serve(app).await.expect("server error");
//! }
//!
//! async fn index(_req: Request) -> Response {
//!     Response::text("hello from wisp")
//! }
//! ```
//!
//! Handlers that consume JSON read the value [`middleware::JsonBody`]
//! parsed for them:
//!
//! ```rust,no_run
//! use wisp::{Request, Response, StatusCode};
//!
//! async fn create_user(req: Request) -> Response {
//!     let Some(body) = req.json() else {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     };
//!     let name = body["name"].as_str().unwrap_or("anonymous");
//!     Response::json(format!(r#"{{"name":"{name}"}}"#).into_bytes())
//! }
//! ```

mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod health;
pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use middleware::{Middleware, Next};
pub use request::Request;
pub use response::{IntoResponse, Response};
pub use router::Router;
pub use server::Server;

// Method and status types come straight from the `http` crate — the hyper
// dispatch path speaks them natively, so wisp does too.
pub use http::{Method, StatusCode};
