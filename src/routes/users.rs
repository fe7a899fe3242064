//! Member administration routes, admin-gated in `server.rs`

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::database::models::{PublicUser, UserRole};
use crate::error::AppError;
use crate::routes::parse_id;
use crate::server::AppState;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<PublicUser>>, AppError> {
    let members = services::users::list_members(&state.db)
        .await
        .map_err(|e| e.or_internal_message("Erro ao listar membros da igreja."))?;

    Ok(Json(members))
}

pub async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateRoleRequest>,
) -> Result<Json<Value>, AppError> {
    let user_id = parse_id(&id)?;

    let Some(role) = payload.role.as_deref().and_then(UserRole::parse) else {
        return Err(AppError::Validation(
            "Papel inválido. Use \"Membro\" ou \"Administrador\".".to_string(),
        ));
    };

    let user = services::users::update_member_role(&state.db, user_id, role)
        .await
        .map_err(|e| e.or_internal_message("Erro ao atualizar papel."))?;

    Ok(Json(json!({
        "message": "Papel atualizado com sucesso.",
        "user": user,
    })))
}
