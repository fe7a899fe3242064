//! Router-level tests for the authentication and role middleware.
//!
//! These drive real axum routers with in-memory requests; no database is
//! involved, so they exercise exactly the token and role gates.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::{Extension, Json, Router, middleware, routing::get};
use tower::ServiceExt;
use uuid::Uuid;

use conecta_server::auth::jwt::JwtService;
use conecta_server::auth::middleware::AuthMiddleware;
use conecta_server::auth::models::AuthUser;
use conecta_server::database::models::UserRole;

/// Echo the identity the middleware attached.
async fn whoami(Extension(user): Extension<AuthUser>) -> Json<AuthUser> {
    Json(user)
}

/// `/private` requires a valid token; `/admin` additionally requires the
/// administrator role. Mirrors the layering in `server::build_router`.
fn test_router(jwt_service: Arc<JwtService>) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(whoami))
        .layer(middleware::from_fn(AuthMiddleware::require_admin))
        .layer(middleware::from_fn_with_state(
            jwt_service.clone(),
            AuthMiddleware::authenticate,
        ));

    Router::new()
        .route("/private", get(whoami))
        .layer(middleware::from_fn_with_state(
            jwt_service,
            AuthMiddleware::authenticate,
        ))
        .merge(admin_routes)
}

fn token_for(jwt_service: &JwtService, role: UserRole) -> String {
    let user = AuthUser {
        id: Uuid::new_v4(),
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        email: "ana@exemplo.com".to_string(),
        role,
    };
    jwt_service.create_token(&user).unwrap()
}

async fn get_with_auth(router: Router, uri: &str, auth_header: Option<&str>) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().uri(uri);
    if let Some(value) = auth_header {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();

    (status, body)
}

#[tokio::test]
async fn missing_header_is_unauthorized() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/private", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token não informado.");
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let token = token_for(&jwt_service, UserRole::Member);
    let router = test_router(jwt_service);

    // Valid token, wrong scheme
    let (status, body) = get_with_auth(router, "/private", Some(&format!("Token {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token não informado.");
}

#[tokio::test]
async fn garbage_token_is_unauthorized() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/private", Some("Bearer not.a.jwt")).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token inválido.");
}

#[tokio::test]
async fn token_signed_elsewhere_is_unauthorized() {
    let other_service = JwtService::new("other_secret");
    let token = token_for(&other_service, UserRole::Administrator);

    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/private", Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token inválido.");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_identity() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let token = token_for(&jwt_service, UserRole::Member);
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/private", Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ana@exemplo.com");
    assert_eq!(body["role"], "Membro");
}

#[tokio::test]
async fn member_is_forbidden_on_admin_route() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let token = token_for(&jwt_service, UserRole::Member);
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/admin", Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Acesso restrito a administradores.");
}

#[tokio::test]
async fn administrator_passes_admin_route() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let token = token_for(&jwt_service, UserRole::Administrator);
    let router = test_router(jwt_service);

    let (status, body) = get_with_auth(router, "/admin", Some(&format!("Bearer {token}"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "Administrador");
}

#[tokio::test]
async fn admin_route_without_token_is_unauthorized_not_forbidden() {
    let jwt_service = Arc::new(JwtService::new("test_secret"));
    let router = test_router(jwt_service);

    // The token gate answers before the role gate
    let (status, body) = get_with_auth(router, "/admin", None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token não informado.");
}
