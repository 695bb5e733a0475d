//! Consistent JSON error responses.
//!
//! Every error category maps to one generic message plus a stable `error`
//! code — never to the internal reason a credential or token was rejected.

use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use attendly_attendance::AttendanceError;
use attendly_auth::AuthError;

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Unauthenticated => {
            json_error(StatusCode::UNAUTHORIZED, "unauthenticated", "authentication required")
        }
        AuthError::IdentityNotFound => {
            json_error(StatusCode::UNAUTHORIZED, "identity_not_found", "identity not found")
        }
        AuthError::Forbidden => json_error(StatusCode::FORBIDDEN, "forbidden", "access denied"),
    }
}

pub fn attendance_error_to_response(err: AttendanceError) -> axum::response::Response {
    match err {
        AttendanceError::InvalidToken => {
            json_error(StatusCode::BAD_REQUEST, "invalid_token", "invalid QR code")
        }
        AttendanceError::Expired => {
            json_error(StatusCode::BAD_REQUEST, "token_expired", "QR code expired")
        }
        AttendanceError::Forbidden => {
            json_error(StatusCode::FORBIDDEN, "forbidden", "access denied")
        }
        AttendanceError::PersistenceFailed => json_error(
            StatusCode::BAD_GATEWAY,
            "persistence_failed",
            "failed to record attendance",
        ),
        AttendanceError::Internal => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
