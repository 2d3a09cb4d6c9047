//! Cross-origin response headers.
//!
//! Every response leaving the router is decorated with a fixed set of CORS headers, whatever its
//! status, method or path. Values set by inner handlers under the same names are replaced.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

use crate::config::CorsConfig;

const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Pre-encoded header values, built once at startup.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_origin: HeaderValue,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> anyhow::Result<Self> {
        let allow_origin = config.allowed_origin.header_value().parse::<HeaderValue>()?;
        Ok(Self { allow_origin })
    }

    pub fn allow_origin(&self) -> &HeaderValue {
        &self.allow_origin
    }

    fn apply(&self, response: &mut Response) {
        let headers = response.headers_mut();
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.clone());
        headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static(ALLOWED_HEADERS));
        headers.insert(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, HeaderValue::from_static("true"));
    }
}

/// Runs the inner service, then stamps the CORS headers onto its response.
pub async fn cors_headers_middleware(State(cors): State<CorsHeaders>, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    cors.apply(&mut response);
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CorsOrigin;
    use axum::{
        Router,
        http::StatusCode,
        middleware::from_fn_with_state,
        response::IntoResponse,
        routing::get,
    };
    use axum_test::TestServer;
    use url::Url;

    fn cors_headers(origin: &str) -> CorsHeaders {
        CorsHeaders::from_config(&CorsConfig {
            allowed_origin: CorsOrigin::Url(Url::parse(origin).unwrap()),
        })
        .unwrap()
    }

    fn decorated_router(origin: &str) -> Router {
        Router::new()
            .route("/ok", get(|| async { "hello" }))
            .route("/fails", get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() }))
            .route(
                "/sets-own-origin",
                get(|| async { ([(header::ACCESS_CONTROL_ALLOW_ORIGIN, "https://evil.example")], "mine") }),
            )
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(from_fn_with_state(cors_headers(origin), cors_headers_middleware))
    }

    fn assert_cors_headers(response: &axum_test::TestResponse, origin: &str) {
        assert_eq!(response.header("access-control-allow-origin"), origin);
        assert_eq!(response.header("access-control-allow-headers"), "Content-Type, Authorization");
        assert_eq!(response.header("access-control-allow-credentials"), "true");
    }

    #[tokio::test]
    async fn test_headers_on_success() {
        let server = TestServer::new(decorated_router("http://localhost:3000")).unwrap();

        let response = server.get("/ok").await;

        response.assert_status_ok();
        response.assert_text("hello");
        assert_cors_headers(&response, "http://localhost:3000");
    }

    #[tokio::test]
    async fn test_headers_on_unmatched_path() {
        let server = TestServer::new(decorated_router("https://app.example.com")).unwrap();

        let response = server.get("/nowhere").await;

        response.assert_status_not_found();
        assert_cors_headers(&response, "https://app.example.com");
    }

    #[tokio::test]
    async fn test_headers_on_error_response() {
        let server = TestServer::new(decorated_router("https://app.example.com")).unwrap();

        let response = server.get("/fails").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_cors_headers(&response, "https://app.example.com");
    }

    #[tokio::test]
    async fn test_headers_on_any_method() {
        let server = TestServer::new(decorated_router("https://app.example.com")).unwrap();

        let response = server.method(axum::http::Method::OPTIONS, "/ok").await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_cors_headers(&response, "https://app.example.com");
    }

    #[tokio::test]
    async fn test_handler_values_are_replaced() {
        let server = TestServer::new(decorated_router("https://app.example.com")).unwrap();

        let response = server.get("/sets-own-origin").await;

        response.assert_status_ok();
        let origins: Vec<_> = response.headers().get_all("access-control-allow-origin").iter().collect();
        assert_eq!(origins, vec!["https://app.example.com"]);
    }

    #[test]
    fn test_origin_is_normalized() {
        let cors = cors_headers("https://app.example.com:8443/");
        assert_eq!(cors.allow_origin(), "https://app.example.com:8443");
    }
}
