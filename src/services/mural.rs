//! Mural announcement board: list, create, remove.
//!
//! The service has no authorization awareness; admin gating happens in the
//! route layer.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::database::DatabaseConnection;
use crate::database::models::{FromRow, MuralItem};
use crate::error::AppError;

pub struct NewMuralItem {
    pub title: String,
    pub subtitle: String,
    pub publish_date: NaiveDate,
    pub link: Option<String>,
}

/// All mural entries, newest publish date first.
pub async fn list_items(db: &DatabaseConnection) -> Result<Vec<MuralItem>, AppError> {
    let client = db.pool().get().await?;

    let rows = client
        .query(
            "SELECT id, title, subtitle, publish_date, link, created_at, updated_at
             FROM mural ORDER BY publish_date DESC",
            &[],
        )
        .await?;

    rows.iter()
        .map(|row| MuralItem::from_row(row).map_err(AppError::from))
        .collect()
}

/// Insert a mural entry and re-read it by id, so the returned timestamps
/// are the server-assigned values.
pub async fn create_item(
    db: &DatabaseConnection,
    item: NewMuralItem,
) -> Result<MuralItem, AppError> {
    let client = db.pool().get().await?;

    let id = Uuid::new_v4();
    let title = item.title.trim();
    let subtitle = item.subtitle.trim();
    let link = item
        .link
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty());

    client
        .execute(
            "INSERT INTO mural (id, title, subtitle, publish_date, link)
             VALUES ($1, $2, $3, $4, $5)",
            &[&id, &title, &subtitle, &item.publish_date, &link],
        )
        .await?;

    let row = client
        .query_one(
            "SELECT id, title, subtitle, publish_date, link, created_at, updated_at
             FROM mural WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(MuralItem::from_row(&row)?)
}

/// Delete by id. Reports whether a row was actually removed, so the caller
/// can distinguish "not found" without a separate existence check.
pub async fn delete_item(db: &DatabaseConnection, id: Uuid) -> Result<bool, AppError> {
    let client = db.pool().get().await?;

    let deleted = client
        .execute("DELETE FROM mural WHERE id = $1", &[&id])
        .await?;

    Ok(deleted > 0)
}
