//! Registration, login, and current-user lookup.

use chrono::NaiveDate;
use tokio_postgres::error::SqlState;
use uuid::Uuid;

use crate::auth::{jwt::JwtService, models::AuthUser, password};
use crate::database::DatabaseConnection;
use crate::database::models::{FromRow, PublicUser, User, UserRole};
use crate::error::AppError;

/// Validated registration data, ready to persist.
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub role: UserRole,
}

/// Register a new user: uniqueness check, hash, insert, re-read.
pub async fn register(db: &DatabaseConnection, new_user: NewUser) -> Result<PublicUser, AppError> {
    let email = new_user.email.trim().to_lowercase();
    let client = db.pool().get().await?;

    // Advisory check for a friendly conflict response; the unique index is
    // the real guard under concurrent registration.
    let existing = client
        .query_opt("SELECT 1 FROM users WHERE email = $1 LIMIT 1", &[&email])
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict("E-mail já cadastrado.".to_string()));
    }

    let password_hash = password::hash_password(&new_user.password)?;

    let id = Uuid::new_v4();
    let first_name = new_user.first_name.trim();
    let last_name = new_user.last_name.trim();
    let phone = new_user
        .phone
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let role = new_user.role.as_str();

    let inserted = client
        .execute(
            "INSERT INTO users (id, first_name, last_name, birth_date, email, phone, role, password_hash)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            &[
                &id,
                &first_name,
                &last_name,
                &new_user.birth_date,
                &email,
                &phone,
                &role,
                &password_hash,
            ],
        )
        .await;

    if let Err(err) = inserted {
        // Two concurrent registrations can both pass the advisory check;
        // the loser of the insert race still reports a conflict.
        if err.code() == Some(&SqlState::UNIQUE_VIOLATION) {
            return Err(AppError::Conflict("E-mail já cadastrado.".to_string()));
        }
        return Err(err.into());
    }

    let row = client
        .query_one(
            "SELECT id, first_name, last_name, email, phone, birth_date, role
             FROM users WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(PublicUser::from_row(&row)?)
}

/// Authenticate by e-mail and password, issuing a token on success.
pub async fn login(
    db: &DatabaseConnection,
    jwt_service: &JwtService,
    email: &str,
    password_plain: &str,
) -> Result<(String, PublicUser), AppError> {
    let email = email.trim().to_lowercase();
    let client = db.pool().get().await?;

    let row = client
        .query_opt("SELECT * FROM users WHERE email = $1 LIMIT 1", &[&email])
        .await?;

    // Unknown e-mail and wrong password answer identically, so the API
    // gives no user-enumeration signal.
    let Some(row) = row else {
        return Err(AppError::Unauthenticated("Credenciais inválidas.".to_string()));
    };
    let user = User::from_row(&row)?;

    if !password::verify_password(&user.password_hash, password_plain) {
        return Err(AppError::Unauthenticated("Credenciais inválidas.".to_string()));
    }

    let auth_user = AuthUser {
        id: user.id,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email: user.email.clone(),
        role: user.role,
    };
    let token = jwt_service.create_token(&auth_user)?;

    Ok((token, user.to_public()))
}

/// Look up the public projection for an already-authenticated identity.
/// The record can be gone if the user was removed after token issuance.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: Uuid) -> Result<PublicUser, AppError> {
    let client = db.pool().get().await?;

    let row = client
        .query_opt(
            "SELECT id, first_name, last_name, email, phone, birth_date, role
             FROM users WHERE id = $1 LIMIT 1",
            &[&user_id],
        )
        .await?;

    let Some(row) = row else {
        return Err(AppError::NotFound("Usuário não encontrado.".to_string()));
    };

    Ok(PublicUser::from_row(&row)?)
}
