//! Route definitions for the link shortener API
//!
//! This module wires all HTTP routes to their handlers and injects the
//! shared application state.

use axum::routing::{get, post};
use axum::Router;

use crate::handler::{
    create_short_url, delete_short_url, get_url, list_urls, login, logout, redirect_url, register,
    update_url,
};
use crate::store::AppState;

/// Creates and configures the application router
///
/// # Route Definitions
///
/// - `GET /{id}` - Redirects to the target URL (public, records a visit)
/// - `POST /api/register` - Creates an account and logs it in
/// - `POST /api/login` - Logs in, sets the session cookie
/// - `POST /api/logout` - Clears the session cookie
/// - `GET /api/urls` - Lists the caller's links
/// - `POST /api/urls` - Creates a new link
/// - `GET /api/urls/{id}` - Fetches one link with its analytics
/// - `PUT /api/urls/{id}` - Replaces a link's target (resets analytics)
/// - `DELETE /api/urls/{id}` - Deletes a link
///
/// Identity comes from the signed session cookie on each request; the
/// handlers themselves decide whether a session is required, so there is
/// no auth middleware layer here.
pub fn create_app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/urls", get(list_urls).post(create_short_url))
        .route(
            "/urls/{id}",
            get(get_url).put(update_url).delete(delete_short_url),
        );

    Router::new()
        // Public redirect endpoint - resolves a slug to its target URL
        .route("/{id}", get(redirect_url))
        // Mount API routes under /api
        .nest("/api", api_routes)
        // Inject the application state into all handlers
        .with_state(state)
}
