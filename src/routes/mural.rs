//! Mural announcement board routes
//!
//! Listing is public; create and remove are admin-gated in `server.rs`.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::database::models::MuralItem;
use crate::error::AppError;
use crate::routes::{missing_fields, parse_id};
use crate::server::AppState;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct CreateMuralRequest {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub publish_date: Option<String>,
    pub link: Option<String>,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<MuralItem>>, AppError> {
    let items = services::mural::list_items(&state.db)
        .await
        .map_err(|e| e.or_internal_message("Erro ao listar mural."))?;

    Ok(Json(items))
}

pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<CreateMuralRequest>,
) -> Result<impl IntoResponse, AppError> {
    let missing = missing_fields(&[
        ("title", payload.title.as_deref()),
        ("subtitle", payload.subtitle.as_deref()),
        ("publish_date", payload.publish_date.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Campos obrigatórios ausentes: {}",
            missing.join(", ")
        )));
    }

    let publish_date = NaiveDate::parse_from_str(
        payload.publish_date.as_deref().unwrap_or_default().trim(),
        "%Y-%m-%d",
    )
    .map_err(|_| AppError::Validation("Data de publicação inválida.".to_string()))?;

    let item = services::mural::create_item(
        &state.db,
        services::mural::NewMuralItem {
            title: payload.title.unwrap_or_default(),
            subtitle: payload.subtitle.unwrap_or_default(),
            publish_date,
            link: payload.link,
        },
    )
    .await
    .map_err(|e| e.or_internal_message("Erro ao criar aviso."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Aviso criado com sucesso!", "item": item })),
    ))
}

pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let id = parse_id(&id)?;

    let deleted = services::mural::delete_item(&state.db, id)
        .await
        .map_err(|e| e.or_internal_message("Erro ao remover aviso."))?;

    if !deleted {
        return Err(AppError::NotFound("Aviso não encontrado.".to_string()));
    }

    Ok(Json(json!({ "message": "Aviso removido com sucesso." })))
}
