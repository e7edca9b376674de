//! Route definitions for the bot's webhook service
//!
//! This module configures the HTTP surface and creates the Axum router with
//! the application state.

use axum::routing::post;
use axum::Router;

use axum::middleware;

use crate::database::AppState;
use crate::handler::webhook;
use crate::middleware::webhook_secret_middleware;

/// Creates and configures the Axum application router
///
/// # Route Definitions
///
/// - `POST /webhook` - Receives Telegram updates (guarded by the secret-token
///   check when `WEBHOOK_SECRET` is configured)
///
/// # Arguments
///
/// * `state` - Application state containing the shared database instance
///
/// # Returns
///
/// Configured Axum Router ready to handle requests
///
/// # Example Usage
///
/// ```no_run
/// # use std::sync::Arc;
/// # use shortbot::database::{init_db, AppState};
/// # use shortbot::route::create_app;
/// # let db = init_db("bot_database.db").unwrap();
/// let state = AppState { db: Arc::new(db), bot_username: "my_bot".to_string() };
/// let app = create_app(state);
/// // axum::serve(listener, app).await.unwrap();
/// ```
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Telegram delivers every update here
        .route("/webhook", post(webhook))
        .layer(middleware::from_fn(webhook_secret_middleware))
        // Inject the application state into all handlers
        .with_state(state)
}
