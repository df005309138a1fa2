//! Users service entry point.
//!
//! Reads configuration from TOML file (~/.config/users-service/config.toml),
//! connects to the database, runs migrations, seeds fixtures when the table
//! is empty, then serves the REST API until SIGTERM/SIGINT.

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use users_service::config::AppConfig;
use users_service::domain::{DomainError, NewUser, UserRepositoryInterface};
use users_service::infrastructure::database::migrator::Migrator;
use users_service::infrastructure::database::repositories::SeaOrmUserRepository;
use users_service::shared::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use users_service::{create_api_router, default_config_path, init_database, DatabaseConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("USERS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting users service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.connection_url(),
    };
    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    let users_repo: Arc<dyn UserRepositoryInterface> =
        Arc::new(SeaOrmUserRepository::new(db.clone()));

    // Seed fixtures only into an empty table
    seed_users(&db, users_repo.as_ref(), &app_cfg).await;

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(users_repo, db.clone());

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let server_shutdown = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            server_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Users service shutdown complete");
    Ok(())
}

/// Insert configured seed users when the table is empty.
async fn seed_users(
    db: &sea_orm::DatabaseConnection,
    repo: &dyn UserRepositoryInterface,
    app_cfg: &AppConfig,
) {
    use sea_orm::{EntityTrait, PaginatorTrait};
    use users_service::infrastructure::database::entities::user;

    if app_cfg.seed.users.is_empty() {
        return;
    }

    let users_count = user::Entity::find().count(db).await.unwrap_or(0);
    if users_count > 0 {
        return;
    }

    info!("Seeding {} user(s) into empty table...", app_cfg.seed.users.len());
    for seed in &app_cfg.seed.users {
        let new_user = NewUser {
            username: seed.username.clone(),
            password: seed.password.clone(),
        };
        match repo.create(new_user).await {
            Ok(user) => info!("Seeded user '{}' (id {})", user.username, user.id),
            Err(DomainError::Conflict(_)) => {
                warn!("Seed user '{}' already exists, skipping", seed.username)
            }
            Err(e) => error!("Failed to seed user '{}': {}", seed.username, e),
        }
    }
}
