//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::UserRepositoryInterface;
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::modules::{health, users};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::handlers::health_check,
        // Users
        users::handlers::create_user,
        users::handlers::get_user,
        users::handlers::update_user,
        users::handlers::delete_user,
    ),
    components(schemas(
        users::dto::UserDto,
        users::dto::CreateUserRequest,
        users::dto::UpdateUserRequest,
        health::handlers::HealthResponse,
        health::handlers::ComponentHealth,
        ApiResponse<users::dto::UserDto>,
    )),
    tags(
        (name = "Users", description = "User resource CRUD"),
        (name = "Health", description = "Service health")
    )
)]
struct ApiDoc;

async fn hello() -> &'static str {
    "Hello, world!"
}

/// Build the API router over an injected repository and database handle.
///
/// The repository is the only path to the `users` table; `db` is used
/// solely for the health-check ping.
pub fn create_api_router(
    users_repo: Arc<dyn UserRepositoryInterface>,
    db: DatabaseConnection,
) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let user_state = users::UserHandlerState { users: users_repo };
    let user_routes = Router::new()
        .route("/", post(users::create_user))
        .route(
            "/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .with_state(user_state);

    let health_state = health::HealthState {
        db,
        started_at: Arc::new(Instant::now()),
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    // Build router
    Router::new()
        // Swagger UI
        .merge(swagger_routes)
        .route("/", get(hello))
        // Health
        .route("/health", get(health::health_check).with_state(health_state))
        // Users
        .nest("/users", user_routes)
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
