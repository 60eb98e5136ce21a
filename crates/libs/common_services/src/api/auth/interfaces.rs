use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims of the bearer tokens issued by the identity provider.
#[derive(Debug, Serialize, Deserialize, Clone, ToSchema)]
pub struct AuthClaims {
    /// Subject, the user id.
    pub sub: Uuid,
    /// Expiration time, seconds since the epoch.
    pub exp: i64,
}

/// The authenticated caller, available to protected handlers as an extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub id: Uuid,
}

impl From<AuthClaims> for AuthUser {
    fn from(claims: AuthClaims) -> Self {
        Self { id: claims.sub }
    }
}
