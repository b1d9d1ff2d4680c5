//! HTTP request handlers for the link shortener API
//!
//! This module maps the JSON API onto the core registries:
//! - Account registration, login and logout with signed session cookies
//! - Creating, listing, reading, updating and deleting short links,
//!   always scoped to the logged-in owner
//! - The public redirect endpoint, which records a visit on every hit
//!
//! Every handler resolves the caller's identity first (via the
//! [`CurrentUser`] extractor), then runs the requested operation and
//! converts its `Result` into a response. Core errors carry their own
//! status mapping, so the handlers stay thin.

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect},
    Json,
};
use serde_json::json;

use crate::error::AppError;
use crate::model::{CredentialsRequest, UrlRequest};
use crate::session::{self, CurrentUser};
use crate::store::AppState;

/// Registers a new account
///
/// The new user is logged in immediately: the response carries the
/// session cookie alongside the created id.
///
/// # Request Body
///
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "pw1"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - Account created, session cookie set
/// - **400 Bad Request** - Empty email or password
/// - **409 Conflict** - Email already registered
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = state
        .users
        .write()
        .unwrap()
        .insert(&payload.email, &payload.password)?;

    tracing::debug!(%user_id, "registered new user");

    let cookie = session::issue_cookie(state.session_key.as_bytes(), &user_id);
    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "user_id": user_id })),
    ))
}

/// Logs an existing user in
///
/// Both an unknown email and a wrong password answer **403** with the
/// same body, so the response does not reveal which half was wrong.
///
/// # Response
///
/// - **200 OK** - Credentials accepted, session cookie set
/// - **403 Forbidden** - Unknown email or wrong password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let users = state.users.read().unwrap();
    let user_id = users
        .find_by_email(&payload.email)
        .map(|user| user.id.clone())
        .ok_or(AppError::BadCredentials)?;

    if !users.verify(&user_id, &payload.password) {
        return Err(AppError::BadCredentials);
    }
    drop(users);

    let cookie = session::issue_cookie(state.session_key.as_bytes(), &user_id);
    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(json!({ "user_id": user_id })),
    ))
}

/// Logs the caller out by expiring the session cookie
///
/// Always answers **200**, logged in or not; there is no server-side
/// session state to tear down.
pub async fn logout() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, session::clear_cookie())],
        Json(json!({ "message": "logged out" })),
    )
}

/// Creates a new short link owned by the caller
///
/// # Request Body
///
/// ```json
/// {
///   "url": "http://www.lighthouselabs.ca"
/// }
/// ```
///
/// # Response
///
/// - **201 Created** - The full record, including the generated slug
/// - **400 Bad Request** - Empty url
/// - **401 Unauthorized** - No session
pub async fn create_short_url(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.ok_or(AppError::AuthRequired)?;

    let record = state
        .urls
        .write()
        .unwrap()
        .create(&user_id, &payload.url)?;

    tracing::debug!(slug = %record.id, owner = %user_id, "created short link");

    Ok((StatusCode::CREATED, Json(record)))
}

/// Lists the caller's own links
///
/// # Response
///
/// - **200 OK** - `{"count": n, "data": [...]}` with only the caller's
///   records, visit analytics included
/// - **401 Unauthorized** - No session
pub async fn list_urls(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.ok_or(AppError::AuthRequired)?;

    let records = state.urls.read().unwrap().list_for_owner(&user_id);

    Ok(Json(json!({
        "count": records.len(),
        "data": records,
    })))
}

/// Fetches a single link with its visit analytics
///
/// A link owned by someone else answers **404**, exactly like a missing
/// slug, so other users' links cannot be enumerated through this route.
///
/// # Response
///
/// - **200 OK** - The record
/// - **401 Unauthorized** - No session
/// - **404 Not Found** - Missing slug, or a slug the caller does not own
pub async fn get_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.ok_or(AppError::AuthRequired)?;

    let record = state
        .urls
        .read()
        .unwrap()
        .get_for_owner(&id, &user_id)?
        .clone();

    Ok(Json(record))
}

/// Replaces the target of one of the caller's links
///
/// The edited link starts over: its visit log and unique-visitor set are
/// cleared and the creation timestamp refreshed.
///
/// # Response
///
/// - **200 OK** - The refreshed record
/// - **400 Bad Request** - Empty url
/// - **401 Unauthorized** - No session
/// - **403 Forbidden** - The link belongs to another user
/// - **404 Not Found** - No such slug
pub async fn update_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(payload): Json<UrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.ok_or(AppError::AuthRequired)?;

    let record = state
        .urls
        .write()
        .unwrap()
        .update(&id, &payload.url, &user_id)?;

    Ok(Json(record))
}

/// Deletes one of the caller's links
///
/// # Response
///
/// - **200 OK** - `{"deleted_id": ...}`
/// - **401 Unauthorized** - No session
/// - **403 Forbidden** - The link belongs to another user
/// - **404 Not Found** - No such slug
pub async fn delete_short_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let user_id = user.ok_or(AppError::AuthRequired)?;

    let removed = state.urls.write().unwrap().delete(&id, &user_id)?;

    tracing::debug!(slug = %removed.id, "deleted short link");

    Ok(Json(json!({
        "message": "short link deleted successfully",
        "deleted_id": removed.id,
    })))
}

/// Redirects a short link to its destination
///
/// This is the public endpoint: no session required. The visit is
/// recorded (under the caller's user id when logged in, otherwise the
/// anonymous marker) before the redirect response is emitted, so the
/// analytics count every resolution whether or not the client follows
/// the redirect.
///
/// Uses 307 Temporary Redirect rather than 301 so that browsers do not
/// cache the hop and later edits or deletions take effect immediately.
///
/// # Response
///
/// - **307 Temporary Redirect** - `Location` is the target URL
/// - **404 Not Found** - No such slug
pub async fn redirect_url(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let target = state
        .urls
        .write()
        .unwrap()
        .record_visit(&id, user.as_deref())?;

    Ok(Redirect::temporary(&target))
}
