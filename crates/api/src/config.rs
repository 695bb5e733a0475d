/// Process configuration, resolved once at startup and injected by value.
///
/// Components never read the environment at call time; this is the single
/// place configuration enters the system.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Process-wide secret. Used to verify session credentials and to derive
    /// the token codec key; never transmitted or logged.
    pub secret: String,

    /// Deployment identifier embedded in every minted attendance payload.
    pub issuer_tag: String,

    /// Listen address for the HTTP server.
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let secret = std::env::var("APP_SECRET").unwrap_or_else(|_| {
            tracing::warn!("APP_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            secret,
            issuer_tag: std::env::var("ISSUER_TAG").unwrap_or_else(|_| "ATTENDLY-01".to_string()),
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
        }
    }
}
