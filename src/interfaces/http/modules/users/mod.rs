//! Users module — CRUD on the user resource

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
