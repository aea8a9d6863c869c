//! The wisp demo service.
//!
//! Run with:
//!   RUST_LOG=info PORT=8080 cargo run
//!
//! `PORT` unset falls back to 3000. Try:
//!   curl http://localhost:3000/
//!   curl -X POST http://localhost:3000/echo \
//!        -H 'content-type: application/json' \
//!        -d '{"name":"alice"}'
//!   curl http://localhost:3000/healthz

use wisp::{Config, Request, Response, Router, Server, StatusCode, health, middleware};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env().expect("invalid PORT");

    let app = Router::new()
        .wrap(middleware::Trace)
        .wrap(middleware::JsonBody)
        .get("/", index)
        .post("/echo", echo)
        .get("/healthz", health::liveness)
        .get("/readyz", health::readiness);

    Server::bind(&config.addr())
        .serve(app)
        .await
        .expect("server error");
}

// GET / — the one static route.
async fn index(_req: Request) -> Response {
    Response::text("welcome to wisp")
}

// POST /echo — returns the JSON body JsonBody parsed for us.
async fn echo(req: Request) -> Response {
    match req.json() {
        Some(value) => Response::json(value.to_string().into_bytes()),
        None => Response::status(StatusCode::BAD_REQUEST),
    }
}
