use axum::{
    Router,
    routing::{get, post},
};

pub mod attendance;
pub mod system;

/// Routes that sit behind the auth middleware.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .route("/attendance", get(attendance::list_all))
        .route("/attendance/qr", post(attendance::generate_qr))
        .route("/attendance/verify", post(attendance::verify_qr))
        .route(
            "/attendance/employees/:employee_id",
            get(attendance::employee_history),
        )
}
