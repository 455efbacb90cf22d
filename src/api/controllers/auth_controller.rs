use crate::api::request::{AdminLoginRequest, LoginRequest, RegisterRequest};
use crate::api::response::{LoginResponse, MessageResponse};
use crate::services::auth_service::AuthService;
use crate::services::errors::AuthServiceError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Register a new customer account
pub async fn register(Json(payload): Json<RegisterRequest>) -> impl IntoResponse {
    let service = AuthService::new();

    match service
        .register_user(
            &payload.name,
            &payload.email,
            &payload.password,
            &payload.confirm_password,
        )
        .await
    {
        Ok(()) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "Registration successful.".to_string(),
            }),
        )
            .into_response(),
        Err(
            e @ (AuthServiceError::MissingField
            | AuthServiceError::PasswordMismatch
            | AuthServiceError::EmailTaken),
        ) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Registration failed").into_response(),
    }
}

/// Customer login
pub async fn login(Json(payload): Json<LoginRequest>) -> impl IntoResponse {
    let service = AuthService::new();

    match service.login_user(&payload.email, &payload.password).await {
        Ok((token, _user)) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                message: "Login successful.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ AuthServiceError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response(),
    }
}

/// Admin login; the issued token carries the admin scope
pub async fn admin_login(Json(payload): Json<AdminLoginRequest>) -> impl IntoResponse {
    let service = AuthService::new();

    match service
        .login_admin(&payload.username, &payload.password)
        .await
    {
        Ok((token, _admin)) => (
            StatusCode::OK,
            Json(LoginResponse {
                token,
                message: "Login successful.".to_string(),
            }),
        )
            .into_response(),
        Err(e @ AuthServiceError::InvalidUsername) => {
            (StatusCode::BAD_REQUEST, e.to_string()).into_response()
        }
        Err(e @ AuthServiceError::InvalidCredentials) => {
            (StatusCode::UNAUTHORIZED, e.to_string()).into_response()
        }
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Login failed").into_response(),
    }
}
