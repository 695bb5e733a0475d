use std::sync::Arc;

use attendly_api::config::AppConfig;
use attendly_auth::{Identity, Role};
use attendly_core::EmployeeId;
use attendly_infra::{InMemoryIdentityStore, InMemoryPresenceStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    attendly_observability::init();

    let config = AppConfig::from_env();

    let identities = Arc::new(InMemoryIdentityStore::new());
    seed_dev_identities(&identities);
    let presence = Arc::new(InMemoryPresenceStore::new());

    let bind_addr = config.bind_addr.clone();
    let app = attendly_api::app::build_app(config, identities, presence)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Seed a development admin so the in-memory deployment is usable out of the
/// box. A real deployment replaces the in-memory store with a SQL-backed one.
fn seed_dev_identities(identities: &InMemoryIdentityStore) {
    let admin = Identity {
        id: EmployeeId::new(),
        display_name: "Dev Admin".to_string(),
        role: Role::Admin,
        department_id: None,
    };
    tracing::info!(employee_id = %admin.id, "seeded dev admin identity");
    identities.upsert(admin);
}
