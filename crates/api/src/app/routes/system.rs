use axum::{Extension, Json, http::StatusCode, response::IntoResponse};

use crate::context::IdentityContext;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn whoami(Extension(ctx): Extension<IdentityContext>) -> impl IntoResponse {
    let identity = ctx.identity();
    Json(serde_json::json!({
        "employee_id": identity.id.to_string(),
        "display_name": identity.display_name,
        "role": identity.role.as_str(),
        "department_id": identity.department_id.map(|d| d.to_string()),
    }))
}
