//! External concerns: database connection, schema migrations, repositories.

pub mod database;
