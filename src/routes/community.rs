//! Community feed routes: posts, likes, and comments

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::database::models::{CommunityComment, FeedPost};
use crate::error::AppError;
use crate::routes::{missing_fields, parse_id};
use crate::server::AppState;
use crate::services;

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub user_id: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub user_id: Option<String>,
    pub comment: Option<String>,
}

pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Json<Vec<FeedPost>>, AppError> {
    // An unparsable viewer id degrades to "no viewer context".
    let viewer = query
        .user_id
        .as_deref()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok());

    let posts = services::community::list_feed(&state.db, viewer)
        .await
        .map_err(|e| e.or_internal_message("Erro ao carregar o feed."))?;

    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Json(payload): Json<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let missing = missing_fields(&[
        ("user_id", payload.user_id.as_deref()),
        ("content", payload.content.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Campos obrigatórios ausentes: {}",
            missing.join(", ")
        )));
    }

    let user_id = parse_id(payload.user_id.as_deref().unwrap_or_default())?;

    let post = services::community::create_post(
        &state.db,
        user_id,
        payload.content.as_deref().unwrap_or_default(),
    )
    .await
    .map_err(|e| e.or_internal_message("Erro ao criar publicação."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Publicação criada com sucesso!", "post": post })),
    ))
}

pub async fn toggle_like(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<LikeRequest>,
) -> Result<Json<Value>, AppError> {
    let missing = missing_fields(&[("user_id", payload.user_id.as_deref())]);
    if !missing.is_empty() {
        return Err(AppError::Validation("user_id é obrigatório.".to_string()));
    }

    let post_id = parse_id(&id)?;
    let user_id = parse_id(payload.user_id.as_deref().unwrap_or_default())?;

    let (liked, likes_count) = services::community::toggle_like(&state.db, post_id, user_id)
        .await
        .map_err(|e| e.or_internal_message("Erro ao curtir publicação."))?;

    let message = if liked {
        "Publicação curtida com sucesso."
    } else {
        "Curtida removida."
    };

    Ok(Json(json!({
        "message": message,
        "liked": liked,
        "likes_count": likes_count,
    })))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let missing = missing_fields(&[
        ("user_id", payload.user_id.as_deref()),
        ("comment", payload.comment.as_deref()),
    ]);
    if !missing.is_empty() {
        return Err(AppError::Validation(format!(
            "Campos obrigatórios ausentes: {}",
            missing.join(", ")
        )));
    }

    let post_id = parse_id(&id)?;
    let user_id = parse_id(payload.user_id.as_deref().unwrap_or_default())?;

    let (comments, comments_count) = services::community::create_comment(
        &state.db,
        post_id,
        user_id,
        payload.comment.as_deref().unwrap_or_default(),
    )
    .await
    .map_err(|e| e.or_internal_message("Erro ao comentar."))?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Comentário enviado!",
            "comments": comments,
            "comments_count": comments_count,
        })),
    ))
}

pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<CommunityComment>>, AppError> {
    let post_id = parse_id(&id)?;

    let comments = services::community::list_comments(&state.db, post_id)
        .await
        .map_err(|e| e.or_internal_message("Erro ao listar comentários."))?;

    Ok(Json(comments))
}
