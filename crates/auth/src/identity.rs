use serde::{Deserialize, Serialize};

use attendly_core::{DepartmentId, EmployeeId};

use crate::Role;

/// A fully resolved, authenticated identity.
///
/// Produced by the [`crate::SessionAuthenticator`] once per request and
/// threaded **explicitly** into the role gate and handlers. The identity is
/// owned by the backing identity store; this type is only a per-request view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: EmployeeId,
    pub display_name: String,
    pub role: Role,
    pub department_id: Option<DepartmentId>,
}
