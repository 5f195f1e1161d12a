//! Authenticated-caller context.
//!
//! The edge gateway validates the bearer token and forwards the caller's
//! identity as `X-User-ID` / `X-User-Role` headers. Token issuance and
//! validation live outside this service; headers are only trusted behind the
//! gateway.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;
use uuid::Uuid;

/// Global role carried by the caller's token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Tenant,
    Landlord,
    Agent,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Tenant => "tenant",
            UserRole::Landlord => "landlord",
            UserRole::Agent => "agent",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_string(s: &str) -> Option<Self> {
        match s {
            "tenant" => Some(UserRole::Tenant),
            "landlord" => Some(UserRole::Landlord),
            "agent" => Some(UserRole::Agent),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// Caller identity extracted from gateway headers.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: UserRole,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-ID")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(anyhow::anyhow!(
                    "Missing X-User-ID header (required from gateway)"
                ))
            })?;
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| AppError::Unauthorized(anyhow::anyhow!("Invalid X-User-ID header")))?;

        let role = parts
            .headers
            .get("X-User-Role")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthorized(anyhow::anyhow!(
                    "Missing X-User-Role header (required from gateway)"
                ))
            })?;
        let role = UserRole::from_string(role)
            .ok_or_else(|| AppError::Unauthorized(anyhow::anyhow!("Unknown user role")))?;

        let span = tracing::Span::current();
        span.record("user_id", user_id.to_string().as_str());
        span.record("role", role.as_str());

        Ok(AuthContext { user_id, role })
    }
}
