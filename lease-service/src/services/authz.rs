//! Lease access gate.
//!
//! Single role check shared by every lease operation: the caller must be the
//! lease's tenant, the lease's landlord, or a global admin.

use crate::middleware::{AuthContext, UserRole};
use crate::models::Lease;
use service_core::error::AppError;

/// The capacity in which a caller may act on a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseRole {
    Tenant,
    Landlord,
    Admin,
}

impl LeaseRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaseRole::Tenant => "tenant",
            LeaseRole::Landlord => "landlord",
            LeaseRole::Admin => "admin",
        }
    }
}

/// Resolve the caller's role on a lease, if any.
pub fn lease_role(lease: &Lease, actor: &AuthContext) -> Option<LeaseRole> {
    if actor.role == UserRole::Admin {
        Some(LeaseRole::Admin)
    } else if lease.tenant_id == actor.user_id {
        Some(LeaseRole::Tenant)
    } else if lease.landlord_id == actor.user_id {
        Some(LeaseRole::Landlord)
    } else {
        None
    }
}

/// Gate a lease operation, failing with Forbidden for everyone else.
///
/// `action` feeds the user-facing message, e.g. "view payment history".
pub fn authorize_lease_access(
    lease: &Lease,
    actor: &AuthContext,
    action: &str,
) -> Result<LeaseRole, AppError> {
    lease_role(lease, actor).ok_or_else(|| {
        AppError::Forbidden(anyhow::anyhow!(
            "Not authorized to {} for this lease",
            action
        ))
    })
}
