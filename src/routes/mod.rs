// # Routes Module
//
// - This module contains all HTTP route handlers for the Conecta Server.
// - Routes are organized by API domain into separate submodules.
// - Handlers validate input, call into services, and shape JSON responses;
//   authentication and role gates are applied as middleware in `server.rs`.

/// Health check and liveness endpoints
pub mod health;

/// Registration, login, and current-user endpoints
pub mod auth;

/// Community feed, likes, and comments endpoints
pub mod community;

/// Mural announcement board endpoints
pub mod mural;

/// Member administration endpoints
pub mod users;

use uuid::Uuid;

use crate::error::AppError;

/// Names of required fields that are absent or blank after trimming.
pub(crate) fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.is_none_or(|v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Parse a path id, mapping malformed input to a 400 instead of a router
/// rejection.
pub(crate) fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Validation("ID inválido.".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_flags_absent_and_blank() {
        let missing = missing_fields(&[
            ("first_name", Some("Ana")),
            ("last_name", None),
            ("email", Some("   ")),
            ("password", Some("senhaForte123")),
        ]);
        assert_eq!(missing, vec!["last_name", "email"]);
    }

    #[test]
    fn test_missing_fields_empty_when_all_present() {
        let missing = missing_fields(&[("email", Some("ana@exemplo.com")), ("password", Some("x"))]);
        assert!(missing.is_empty());
    }

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(parse_id("not-a-uuid").is_err());
        assert!(parse_id("").is_err());

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }
}
