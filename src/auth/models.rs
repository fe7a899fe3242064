//! Authentication Models
//!
//! The authenticated identity attached to requests after token validation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::jwt::Claims;
use crate::database::models::UserRole;

/// Authenticated user information extracted from JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            first_name: claims.first_name,
            last_name: claims.last_name,
            email: claims.email,
            role: claims.role,
        }
    }
}
