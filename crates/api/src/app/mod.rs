//! HTTP API application wiring (Axum router + service wiring).
//!
//! Layout:
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `errors.rs`: consistent error responses
//! - `../middleware.rs`: bearer authentication
//! - `../context.rs`: explicit per-request identity context

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use attendly_attendance::{AttendancePolicy, AttendanceService, PresenceEventStore, TokenCodec};
use attendly_auth::{IdentityStore, SessionAuthenticator};

use crate::config::AppConfig;
use crate::middleware;

pub mod errors;
pub mod routes;

/// Shared service handles for the protected routes.
pub struct Services {
    pub attendance: AttendanceService,
    pub presence: Arc<dyn PresenceEventStore>,
}

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(
    config: AppConfig,
    identities: Arc<dyn IdentityStore>,
    presence: Arc<dyn PresenceEventStore>,
) -> anyhow::Result<Router> {
    let authenticator = Arc::new(SessionAuthenticator::new(
        config.secret.as_bytes(),
        identities,
    ));
    let auth_state = middleware::AuthState { authenticator };

    let codec = TokenCodec::new(config.secret.as_bytes())?;
    let services = Arc::new(Services {
        attendance: AttendanceService::new(
            codec,
            presence.clone(),
            AttendancePolicy::default(),
            config.issuer_tag,
        ),
        presence,
    });

    // Protected routes: require an authenticated identity.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            middleware::auth_middleware,
        ));

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
        .layer(ServiceBuilder::new()))
}
