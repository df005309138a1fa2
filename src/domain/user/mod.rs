//! User entity and its repository contract.

pub mod model;
pub mod repository;

pub use model::{NewUser, User, UserPatch};
pub use repository::UserRepositoryInterface;
