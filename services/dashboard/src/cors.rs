//! Permissive CORS. Any `OPTIONS` request is answered here with 204 and
//! never reaches a handler; every other response gets `Access-Control-Allow-Origin: *`.

use axum::{
    extract::Request,
    http::{
        header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN},
        Method, StatusCode,
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_http::cors::{Any, CorsLayer};

const ALLOW_METHODS: &str = "GET, POST, OPTIONS, PUT, PATCH, DELETE";
const ALLOW_HEADERS: &str = "x-requested-with, content-type";

/// Origin header for non-preflight responses; preflights never get this far.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new().allow_origin(Any)
}

pub async fn preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return (
            StatusCode::NO_CONTENT,
            [
                (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
                (ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
            ],
        )
            .into_response();
    }
    next.run(req).await
}
