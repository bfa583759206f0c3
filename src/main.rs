//! Project Management Backend
//!
//! REST backend for the project-management admin console. Domain state lives
//! in four in-memory stores (users, teams, projects, tasks); every mutation
//! snapshots the affected store to SQLite so state survives restarts.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;
mod store;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::{SnapshotStore, SqliteSnapshots};
use store::{ProjectStore, TaskStore, TeamStore, UserStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<UserStore>,
    pub teams: Arc<TeamStore>,
    pub projects: Arc<ProjectStore>,
    pub tasks: Arc<TaskStore>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Project Management Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let backend: Arc<dyn SnapshotStore> = Arc::new(SqliteSnapshots::new(pool));

    // Load stores from their snapshots, seeding defaults on first run
    let users = Arc::new(UserStore::load(backend.clone()).await?);
    let teams = Arc::new(TeamStore::load(backend.clone()).await?);
    let projects = Arc::new(ProjectStore::load(backend.clone()).await?);
    let tasks = Arc::new(TaskStore::load(backend).await?);

    // Create application state
    let state = AppState {
        users,
        teams,
        projects,
        tasks,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Auth routes stay reachable without a session
    let auth_routes = Router::new()
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .route("/auth/session", get(api::get_session))
        .route("/auth/forgot-password", post(api::forgot_password))
        .route("/auth/reset-password", post(api::reset_password));

    // Everything else requires a logged-in user
    let guarded_routes = Router::new()
        // Users
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", get(api::get_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        .route("/users/{id}/team", put(api::assign_user_to_team))
        .route("/users/{id}/team", delete(api::remove_user_from_team))
        // Teams
        .route("/teams", get(api::list_teams))
        .route("/teams", post(api::create_team))
        .route("/teams/{id}", put(api::update_team))
        .route("/teams/{id}", delete(api::delete_team))
        // Projects
        .route("/projects", get(api::list_projects))
        .route("/projects", post(api::create_project))
        .route("/projects/{id}", get(api::get_project))
        .route("/projects/{id}", put(api::update_project))
        .route("/projects/{id}", delete(api::delete_project))
        // Tasks
        .route("/tasks", get(api::list_tasks))
        .route("/tasks", post(api::create_task))
        .route("/tasks/{id}", get(api::get_task))
        .route("/tasks/{id}", put(api::update_task))
        .route("/tasks/{id}", delete(api::delete_task))
        .route("/tasks/{id}/status", put(api::update_task_status))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ));

    let api_routes = auth_routes.merge(guarded_routes);

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests;
