//! # Database Module
//!
//! PostgreSQL integration over tokio-postgres with deadpool pooling.
//! Includes connection management, row models, and refinery migrations.

pub mod connection;
pub mod migrations;
pub mod models;

pub use connection::{DatabaseConfig, DatabaseConnection};
