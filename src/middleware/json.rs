//! JSON body-parsing middleware.

use tracing::warn;

use super::{BoxFuture, Middleware, Next};
use crate::request::Request;
use crate::response::Response;
use http::StatusCode;

/// Parses `application/json` request bodies ahead of the handler.
///
/// When the request declares a JSON content type and carries a non-empty
/// body, the body is parsed once here and exposed to handlers via
/// [`Request::json`]. Malformed JSON short-circuits with `400 Bad Request`
/// before any handler runs. Requests with other content types, or with no
/// body at all, pass through untouched.
pub struct JsonBody;

impl Middleware for JsonBody {
    fn call(&self, mut req: Request, next: Next) -> BoxFuture {
        if declares_json(&req) && !req.body().is_empty() {
            match serde_json::from_slice(req.body()) {
                Ok(value) => req.set_json(value),
                Err(e) => {
                    warn!(path = req.path(), "rejecting malformed JSON body: {e}");
                    return Box::pin(async {
                        Response::builder()
                            .status(StatusCode::BAD_REQUEST)
                            .json(br#"{"error":"malformed JSON body"}"#.to_vec())
                    });
                }
            }
        }
        next.run(req)
    }
}

/// True for `application/json` and suffixed types like
/// `application/problem+json`, with or without parameters.
fn declares_json(req: &Request) -> bool {
    let Some(content_type) = req.header("content-type") else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/json")
        || essence
            .rsplit_once('+')
            .is_some_and(|(_, suffix)| suffix.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::Handler;
    use crate::request::test_request;
    use http::Method;
    use std::sync::Arc;

    fn json_request(body: &[u8]) -> Request {
        let mut req = test_request(Method::POST, "/things", body);
        req.headers_mut()
            .insert("content-type", "application/json".parse().unwrap());
        req
    }

    async fn echo_parsed(req: Request) -> Response {
        match req.json() {
            Some(value) => Response::json(value.to_string().into_bytes()),
            None => Response::text("no json"),
        }
    }

    fn chain() -> Next {
        let stack: Arc<[Arc<dyn Middleware>]> =
            vec![Arc::new(JsonBody) as Arc<dyn Middleware>].into();
        Next::new(stack, echo_parsed.into_boxed_handler())
    }

    #[tokio::test]
    async fn valid_json_reaches_the_handler_parsed() {
        let response = chain().run(json_request(br#"{"name":"alice"}"#)).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_with_400() {
        let response = chain().run(json_request(b"{not json")).await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_json_content_type_passes_through() {
        let mut req = test_request(Method::POST, "/things", b"plain text");
        req.headers_mut()
            .insert("content-type", "text/plain".parse().unwrap());
        let response = chain().run(req).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[tokio::test]
    async fn empty_json_body_passes_through() {
        let response = chain().run(json_request(b"")).await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }

    #[test]
    fn content_type_detection() {
        let mut req = test_request(Method::POST, "/", b"{}");
        assert!(!declares_json(&req));

        for ct in ["application/json", "application/json; charset=utf-8", "application/problem+json"] {
            req.headers_mut()
                .insert("content-type", ct.parse().unwrap());
            assert!(declares_json(&req), "{ct} should declare JSON");
        }

        req.headers_mut()
            .insert("content-type", "text/html".parse().unwrap());
        assert!(!declares_json(&req));
    }

    #[tokio::test]
    async fn parsed_value_is_visible_to_handler() {
        async fn assert_name(req: Request) -> Response {
            let value = req.json().expect("json parsed");
            assert_eq!(value["name"], "alice");
            Response::status(StatusCode::NO_CONTENT)
        }

        let stack: Arc<[Arc<dyn Middleware>]> =
            vec![Arc::new(JsonBody) as Arc<dyn Middleware>].into();
        let next = Next::new(stack, assert_name.into_boxed_handler());
        let response = next.run(json_request(br#"{"name":"alice"}"#)).await;
        assert_eq!(response.status_code(), StatusCode::NO_CONTENT);
    }
}
