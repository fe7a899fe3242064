// Database Models
//
// Tokio-postgres compatible models for all persisted entities: users,
// mural items, community posts, likes, and comments.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;
use uuid::Uuid;

/// Trait for converting from a tokio-postgres Row
pub trait FromRow {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error>
    where
        Self: Sized;
}

// ============================================================================
// USER MODELS
// ============================================================================

/// Access role carried on the user record and inside token claims.
///
/// Wire values stay `Membro` / `Administrador`, both in JSON payloads and
/// in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "Membro")]
    Member,
    #[serde(rename = "Administrador")]
    Administrator,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Member => "Membro",
            UserRole::Administrator => "Administrador",
        }
    }

    /// Parse the exact wire value. Anything else is rejected.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Membro" => Some(UserRole::Member),
            "Administrador" => Some(UserRole::Administrator),
            _ => None,
        }
    }

    /// Role requested at registration. Only the literal `administrador`
    /// (case-insensitive) grants administrator; everything else is a member.
    pub fn from_registration(raw: Option<&str>) -> Self {
        match raw {
            Some(value) if value.trim().eq_ignore_ascii_case("administrador") => {
                UserRole::Administrator
            }
            _ => UserRole::Member,
        }
    }
}

/// Full user row, including the password hash. Never serialized to clients.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub role: UserRole,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow for User {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            birth_date: row.try_get("birth_date")?,
            role: UserRole::parse(&role).unwrap_or(UserRole::Member),
            password_hash: row.try_get("password_hash")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            birth_date: self.birth_date,
            role: self.role,
        }
    }
}

/// User projection exposed over the API. Excludes `password_hash`.
#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub birth_date: NaiveDate,
    pub role: UserRole,
}

impl FromRow for PublicUser {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        let role: String = row.try_get("role")?;
        Ok(Self {
            id: row.try_get("id")?,
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            birth_date: row.try_get("birth_date")?,
            role: UserRole::parse(&role).unwrap_or(UserRole::Member),
        })
    }
}

// ============================================================================
// MURAL MODELS
// ============================================================================

/// Announcement board entry
#[derive(Debug, Clone, Serialize)]
pub struct MuralItem {
    pub id: Uuid,
    pub title: String,
    pub subtitle: String,
    pub publish_date: NaiveDate,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FromRow for MuralItem {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            title: row.try_get("title")?,
            subtitle: row.try_get("subtitle")?,
            publish_date: row.try_get("publish_date")?,
            link: row.try_get("link")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

// ============================================================================
// COMMUNITY MODELS
// ============================================================================

/// Community post joined with its author's name, without aggregates.
/// Returned from post creation, where counts are trivially zero.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
}

impl FromRow for CommunityPost {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            author_name: row.try_get("author_name")?,
        })
    }
}

/// Feed item: post plus like/comment aggregates and the viewer's like flag.
/// `liked_by_user` stays an integer 0/1 on the wire.
#[derive(Debug, Clone, Serialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_name: String,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by_user: i32,
}

impl FromRow for FeedPost {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            author_name: row.try_get("author_name")?,
            likes_count: row.try_get("likes_count")?,
            comments_count: row.try_get("comments_count")?,
            liked_by_user: row.try_get("liked_by_user")?,
        })
    }
}

/// Comment on a community post, joined with its author's name.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityComment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
}

impl FromRow for CommunityComment {
    fn from_row(row: &Row) -> Result<Self, tokio_postgres::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            post_id: row.try_get("post_id")?,
            comment: row.try_get("comment")?,
            created_at: row.try_get("created_at")?,
            author_name: row.try_get("author_name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_values() {
        assert_eq!(
            serde_json::to_string(&UserRole::Member).unwrap(),
            "\"Membro\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Administrator).unwrap(),
            "\"Administrador\""
        );

        let parsed: UserRole = serde_json::from_str("\"Administrador\"").unwrap();
        assert_eq!(parsed, UserRole::Administrator);
    }

    #[test]
    fn test_role_parse_is_exact() {
        assert_eq!(UserRole::parse("Membro"), Some(UserRole::Member));
        assert_eq!(
            UserRole::parse("Administrador"),
            Some(UserRole::Administrator)
        );
        assert_eq!(UserRole::parse("administrador"), None);
        assert_eq!(UserRole::parse("admin"), None);
        assert_eq!(UserRole::parse(""), None);
    }

    #[test]
    fn test_role_from_registration_defaults_to_member() {
        assert_eq!(UserRole::from_registration(None), UserRole::Member);
        assert_eq!(UserRole::from_registration(Some("Membro")), UserRole::Member);
        assert_eq!(
            UserRole::from_registration(Some("qualquer coisa")),
            UserRole::Member
        );
        assert_eq!(
            UserRole::from_registration(Some("administrador")),
            UserRole::Administrator
        );
        assert_eq!(
            UserRole::from_registration(Some("ADMINISTRADOR")),
            UserRole::Administrator
        );
    }
}
