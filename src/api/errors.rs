use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug)]
pub enum APIErrors {
    Unauthorized,
    Forbidden,
}

impl IntoResponse for APIErrors {
    fn into_response(self) -> Response {
        match self {
            APIErrors::Unauthorized => {
                (StatusCode::UNAUTHORIZED, "Authentication required").into_response()
            }
            APIErrors::Forbidden => (StatusCode::FORBIDDEN, "Permission denied").into_response(),
        }
    }
}
