//! SeaORM implementation of the user repository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::debug;

use crate::domain::{DomainError, DomainResult, NewUser, User, UserPatch, UserRepositoryInterface};
use crate::infrastructure::database::entities::user;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        username: model.username,
        password: model.password,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Database(e.to_string())
}

/// Map a write error, surfacing unique-constraint violations as `Conflict`.
fn write_err(e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict("Username already exists".to_string())
    } else {
        db_err(e)
    }
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl UserRepositoryInterface for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(model.map(user_model_to_domain))
    }

    async fn create(&self, new_user: NewUser) -> DomainResult<User> {
        if new_user.username.is_empty() {
            return Err(DomainError::Validation("username is required".to_string()));
        }
        if new_user.password.is_empty() {
            return Err(DomainError::Validation("password is required".to_string()));
        }

        // id and timestamps stay NotSet so the store/entity layer assigns them
        let active = user::ActiveModel {
            username: Set(new_user.username),
            password: Set(new_user.password),
            ..Default::default()
        };

        let created = active.insert(&self.db).await.map_err(write_err)?;
        debug!("Created user '{}' with id {}", created.username, created.id);
        Ok(user_model_to_domain(created))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> DomainResult<Option<User>> {
        let Some(existing) = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?
        else {
            return Ok(None);
        };

        let mut active: user::ActiveModel = existing.into();
        if let Some(username) = patch.username {
            active.username = Set(username);
        }
        if let Some(password) = patch.password {
            active.password = Set(password);
        }

        let updated = active.update(&self.db).await.map_err(write_err)?;
        Ok(Some(user_model_to_domain(updated)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = user::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::infrastructure::database::migrator::Migrator;

    async fn repository() -> SeaOrmUserRepository {
        // single pooled connection so the in-memory database is shared
        let mut opts = sea_orm::ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1);
        let db = sea_orm::Database::connect(opts).await.expect("connect");
        Migrator::up(&db, None).await.expect("migrate");
        SeaOrmUserRepository::new(db)
    }

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            password: "p1".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_find_round_trips() {
        let repo = repository().await;

        let created = repo.create(alice()).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.username, "alice");
        assert_eq!(created.password, "p1");

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn duplicate_username_is_conflict() {
        let repo = repository().await;
        repo.create(alice()).await.unwrap();

        let second = NewUser {
            username: "alice".to_string(),
            password: "p2".to_string(),
        };
        let err = repo.create(second).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));

        // the failed insert must not have produced a second row
        assert!(repo.find_by_id(2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn empty_fields_are_rejected() {
        let repo = repository().await;

        let err = repo
            .create(NewUser {
                username: String::new(),
                password: "p1".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let err = repo
            .create(NewUser {
                username: "alice".to_string(),
                password: String::new(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn find_unknown_id_is_none() {
        let repo = repository().await;
        assert!(repo.find_by_id(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_patches_only_present_fields() {
        let repo = repository().await;
        let created = repo.create(alice()).await.unwrap();

        let patch = UserPatch {
            username: Some("alice2".to_string()),
            password: None,
        };
        let updated = repo.update(created.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.username, "alice2");
        assert_eq!(updated.password, "p1");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn empty_patch_is_a_valid_noop() {
        let repo = repository().await;
        let created = repo.create(alice()).await.unwrap();

        let updated = repo
            .update(created.id, UserPatch::default())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.username, created.username);
        assert_eq!(updated.password, created.password);
    }

    #[tokio::test]
    async fn update_unknown_id_is_none() {
        let repo = repository().await;
        let patch = UserPatch {
            username: Some("ghost".to_string()),
            password: None,
        };
        assert!(repo.update(42, patch).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_to_taken_username_is_conflict() {
        let repo = repository().await;
        repo.create(alice()).await.unwrap();
        let bob = repo
            .create(NewUser {
                username: "bob".to_string(),
                password: "p2".to_string(),
            })
            .await
            .unwrap();

        let patch = UserPatch {
            username: Some("alice".to_string()),
            password: None,
        };
        let err = repo.update(bob.id, patch).await.unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[tokio::test]
    async fn delete_twice_reports_removal_only_once() {
        let repo = repository().await;
        let created = repo.create(alice()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn ids_are_monotonic_and_never_reused() {
        let repo = repository().await;
        let first = repo.create(alice()).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo
            .create(NewUser {
                username: "bob".to_string(),
                password: "p2".to_string(),
            })
            .await
            .unwrap();
        assert!(second.id > first.id);
    }
}
