//! # Services Module
//!
//! Business logic for the Conecta server: authentication, the mural
//! announcement board, the community feed, and member administration.
//! Services own the SQL; route handlers own validation and response shaping.

pub mod auth;
pub mod community;
pub mod mural;
pub mod users;
