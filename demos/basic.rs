//! Minimal wisp entry point — the same wiring as the main binary, with a
//! fixed port instead of `PORT` from the environment.
//!
//! Run with:
//!   RUST_LOG=info cargo run --example basic
//!
//! Try:
//!   curl http://localhost:3000/
//!   curl http://localhost:3000/healthz

use wisp::{Request, Response, Router, Server, health, middleware};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let app = Router::new()
        .wrap(middleware::Trace)
        .wrap(middleware::JsonBody)
        .get("/", index)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

async fn index(_req: Request) -> Response {
    Response::text("welcome to wisp")
}
