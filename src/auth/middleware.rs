//! Authentication Middleware
//!
//! Axum middleware for JWT token validation and role-gated access.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{jwt::JwtService, models::AuthUser};
use crate::database::models::UserRole;
use crate::error::AppError;

/// Authentication middleware that validates JWT tokens and injects user info
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Validate the `Authorization: Bearer <token>` header and attach the
    /// decoded identity to the request extensions.
    pub async fn authenticate(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let token = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.to_string());

        let Some(token) = token else {
            return Err(AppError::Unauthenticated("Token não informado.".to_string()));
        };

        let claims = jwt_service.decode_claims(&token).map_err(|err| {
            tracing::warn!("JWT validation failed: {err:#}");
            AppError::Unauthenticated("Token inválido.".to_string())
        })?;

        req.extensions_mut().insert(AuthUser::from(claims));

        Ok(next.run(req).await)
    }

    /// Reject the request unless `authenticate` attached an administrator
    /// identity. Role is trusted from the claims for the token's lifetime.
    pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
        let is_admin = req
            .extensions()
            .get::<AuthUser>()
            .is_some_and(|user| user.role == UserRole::Administrator);

        if !is_admin {
            return Err(AppError::Forbidden(
                "Acesso restrito a administradores.".to_string(),
            ));
        }

        Ok(next.run(req).await)
    }
}
