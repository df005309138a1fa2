//! # Users Service
//!
//! Minimal REST service exposing CRUD operations on a single `users` table.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **infrastructure**: External concerns (database, migrations, repositories)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Cross-cutting helpers (graceful shutdown)

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::database::{init_database, DatabaseConfig};

// Re-export API router
pub use interfaces::http::create_api_router;
