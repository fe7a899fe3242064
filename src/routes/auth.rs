//! Auth routes for registration, login, and user info

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Extension, Json};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::models::AuthUser;
use crate::database::models::UserRole;
use crate::error::AppError;
use crate::routes::missing_fields;
use crate::server::AppState;
use crate::services;

/// Registration payload. Fields are optional so missing ones surface as a
/// 400 listing the field names instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birth_date: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let missing = missing_fields(&[
        ("first_name", payload.first_name.as_deref()),
        ("last_name", payload.last_name.as_deref()),
        ("birth_date", payload.birth_date.as_deref()),
        ("email", payload.email.as_deref()),
        ("password", payload.password.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Campos obrigatórios não informados: {}",
            missing.join(", ")
        )));
    }

    let birth_date = NaiveDate::parse_from_str(
        payload.birth_date.as_deref().unwrap_or_default().trim(),
        "%Y-%m-%d",
    )
    .map_err(|_| AppError::Validation("Data de nascimento inválida.".to_string()))?;

    let role = UserRole::from_registration(payload.role.as_deref());

    let user = services::auth::register(
        &state.db,
        services::auth::NewUser {
            first_name: payload.first_name.unwrap_or_default(),
            last_name: payload.last_name.unwrap_or_default(),
            birth_date,
            email: payload.email.unwrap_or_default(),
            phone: payload.phone,
            password: payload.password.unwrap_or_default(),
            role,
        },
    )
    .await
    .map_err(|e| e.or_internal_message("Erro ao criar usuário."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Usuário criado com sucesso!", "user": user })),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    let missing = missing_fields(&[
        ("email", payload.email.as_deref()),
        ("password", payload.password.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::Validation(
            "Email e senha são obrigatórios.".to_string(),
        ));
    }

    let (token, user) = services::auth::login(
        &state.db,
        &state.jwt_service,
        payload.email.as_deref().unwrap_or_default(),
        payload.password.as_deref().unwrap_or_default(),
    )
    .await
    .map_err(|e| e.or_internal_message("Erro ao realizar login."))?;

    Ok(Json(json!({
        "message": "Login realizado com sucesso!",
        "token": token,
        "user": user,
    })))
}

/// Current user, re-read from the store in case the record changed or was
/// removed after the token was issued.
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> Result<Json<Value>, AppError> {
    let user = services::auth::get_user_by_id(&state.db, auth_user.id)
        .await
        .map_err(|e| e.or_internal_message("Erro ao carregar usuário."))?;

    Ok(Json(json!({ "user": user })))
}
