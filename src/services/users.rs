//! Member administration: listing and role updates.

use uuid::Uuid;

use crate::database::DatabaseConnection;
use crate::database::models::{FromRow, PublicUser, UserRole};
use crate::error::AppError;

/// All members, ordered by name.
pub async fn list_members(db: &DatabaseConnection) -> Result<Vec<PublicUser>, AppError> {
    let client = db.pool().get().await?;

    let rows = client
        .query(
            "SELECT id, first_name, last_name, email, phone, birth_date, role
             FROM users
             ORDER BY first_name ASC, last_name ASC",
            &[],
        )
        .await?;

    rows.iter()
        .map(|row| PublicUser::from_row(row).map_err(AppError::from))
        .collect()
}

/// Change a member's role and return the updated public projection.
pub async fn update_member_role(
    db: &DatabaseConnection,
    user_id: Uuid,
    role: UserRole,
) -> Result<PublicUser, AppError> {
    let client = db.pool().get().await?;
    let role_str = role.as_str();

    let updated = client
        .execute(
            "UPDATE users SET role = $1, updated_at = NOW() WHERE id = $2",
            &[&role_str, &user_id],
        )
        .await?;

    if updated == 0 {
        return Err(AppError::NotFound("Usuário não encontrado.".to_string()));
    }

    let row = client
        .query_one(
            "SELECT id, first_name, last_name, email, phone, birth_date, role
             FROM users WHERE id = $1",
            &[&user_id],
        )
        .await?;

    Ok(PublicUser::from_row(&row)?)
}
