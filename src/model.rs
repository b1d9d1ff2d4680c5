//! Data models for the link shortener
//!
//! Domain records for users and short links, the visit log entries that
//! make up the per-link analytics, and the request payloads accepted by
//! the JSON API.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Visitor identifier recorded for redirects without a logged-in session.
pub const ANONYMOUS_VISITOR: &str = "anonymous";

/// A registered user account.
///
/// The password is never stored; only the Argon2 hash string is kept and
/// it is checked exclusively through the verify path.
#[derive(Debug, Clone, Serialize)]
pub struct User {
    /// Random id assigned at registration; primary key of the directory.
    pub id: String,

    /// Login email, unique across all accounts (exact, case-sensitive match).
    pub email: String,

    /// Argon2id PHC hash string of the password.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// One resolution of a short link, as kept in the visit log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Visit {
    /// When the redirect happened.
    pub at: DateTime<Utc>,

    /// The logged-in user who followed the link, or [`ANONYMOUS_VISITOR`].
    pub visitor: String,
}

/// A short link record owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlRecord {
    /// Unique slug used as the public path segment (e.g. "b2xVn2").
    pub id: String,

    /// Destination the slug redirects to. Only the owner may change it.
    pub target_url: String,

    /// Id of the user who created the link. Never changes.
    pub owner_id: String,

    /// Set at creation; refreshed when the owner edits the target.
    pub created_at: DateTime<Utc>,

    /// Append-only log of every redirect through this link.
    #[serde(default)]
    pub visits: Vec<Visit>,

    /// Every distinct visitor (or the anonymous marker) that ever
    /// followed this link. Insertion is idempotent.
    #[serde(default)]
    pub unique_visitors: HashSet<String>,
}

/// Request payload for `POST /api/register` and `POST /api/login`.
///
/// # Example
/// ```json
/// {
///   "email": "alice@example.com",
///   "password": "pw1"
/// }
/// ```
#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

/// Request payload for creating or updating a short link.
///
/// # Example
/// ```json
/// {
///   "url": "http://www.lighthouselabs.ca"
/// }
/// ```
#[derive(Deserialize)]
pub struct UrlRequest {
    /// The destination URL for the short link.
    pub url: String,
}
