//! Attendance endpoints: QR mint, QR redemption, and history listings.
//!
//! Policy lives here as declared allow-lists per endpoint; the decisions
//! themselves are made by `attendly-auth` and `attendly-attendance`.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::Path,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;

use attendly_auth::{Role, RoleGate};
use attendly_core::EmployeeId;

use crate::app::Services;
use crate::app::errors::{attendance_error_to_response, auth_error_to_response, json_error};
use crate::context::IdentityContext;

/// History depth returned per employee.
const HISTORY_LIMIT: usize = 30;

#[derive(Debug, Deserialize)]
pub struct VerifyQrRequest {
    qr_data: String,
}

/// `POST /attendance/qr` — mint a fresh attendance token (admin-only; the
/// service enforces the gate).
pub async fn generate_qr(
    Extension(services): Extension<Arc<Services>>,
    Extension(ctx): Extension<IdentityContext>,
) -> axum::response::Response {
    match services.attendance.mint(ctx.identity(), Utc::now()) {
        Ok(token) => Json(serde_json::json!({ "qr_code": token })).into_response(),
        Err(e) => attendance_error_to_response(e),
    }
}

/// `POST /attendance/verify` — redeem a scanned token for the calling
/// identity (any authenticated role).
pub async fn verify_qr(
    Extension(services): Extension<Arc<Services>>,
    Extension(ctx): Extension<IdentityContext>,
    Json(body): Json<VerifyQrRequest>,
) -> axum::response::Response {
    match services
        .attendance
        .redeem(ctx.identity(), &body.qr_data, Utc::now())
    {
        Ok(payload) => Json(serde_json::json!({
            "valid": true,
            "payload": payload,
        }))
        .into_response(),
        Err(e) => attendance_error_to_response(e),
    }
}

/// `GET /attendance/employees/:employee_id` — recent presence events for one
/// employee (admin/manager).
pub async fn employee_history(
    Extension(services): Extension<Arc<Services>>,
    Extension(ctx): Extension<IdentityContext>,
    Path(employee_id): Path<String>,
) -> axum::response::Response {
    let gate = RoleGate::restricted_to([Role::Admin, Role::Manager]);
    if let Err(e) = gate.check(ctx.identity().role) {
        return auth_error_to_response(e);
    }

    let employee_id: EmployeeId = match employee_id.parse() {
        Ok(v) => v,
        Err(_) => return json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid employee id"),
    };

    match services.presence.history_for(employee_id, HISTORY_LIMIT) {
        Ok(events) => Json(events).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "presence history query failed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "persistence_failed",
                "failed to fetch attendance history",
            )
        }
    }
}

/// `GET /attendance` — every presence event, newest first (admin-only).
pub async fn list_all(
    Extension(services): Extension<Arc<Services>>,
    Extension(ctx): Extension<IdentityContext>,
) -> axum::response::Response {
    let gate = RoleGate::restricted_to([Role::Admin]);
    if let Err(e) = gate.check(ctx.identity().role) {
        return auth_error_to_response(e);
    }

    match services.presence.all() {
        Ok(events) => Json(events).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "presence listing query failed");
            json_error(
                StatusCode::BAD_GATEWAY,
                "persistence_failed",
                "failed to fetch attendance records",
            )
        }
    }
}
