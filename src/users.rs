//! User directory with Argon2id password hashing
//!
//! An in-memory account store: lookup by email, registration with
//! duplicate-email rejection, and a fail-closed verify path. Plaintext
//! passwords only ever exist as arguments to `insert` and `verify`;
//! the directory stores Argon2id hash strings with per-call random salts.

use std::collections::HashMap;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::error::AppError;
use crate::id;
use crate::model::User;

/// Hashes a plaintext password with a fresh random salt.
fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("password hash failed: {e}")))
}

/// Checks a plaintext password against a stored hash string.
///
/// An unparseable hash counts as a mismatch rather than an error.
fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// In-memory directory of registered users, keyed by user id.
#[derive(Debug, Default)]
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up a user by id.
    pub fn get(&self, user_id: &str) -> Option<&User> {
        self.users.get(user_id)
    }

    /// Finds a user by exact email match.
    ///
    /// The collection stays small, so a linear scan is fine here.
    pub fn find_by_email(&self, email: &str) -> Option<&User> {
        self.users.values().find(|user| user.email == email)
    }

    /// Registers a new account and returns its id.
    ///
    /// Fails with `Validation` if either field is empty and with
    /// `EmailTaken` if the email is already registered; neither failure
    /// mutates the directory. The id is regenerated until it does not
    /// collide with an existing one.
    pub fn insert(&mut self, email: &str, password: &str) -> Result<String, AppError> {
        if email.is_empty() {
            return Err(AppError::Validation("email"));
        }
        if password.is_empty() {
            return Err(AppError::Validation("password"));
        }
        if self.find_by_email(email).is_some() {
            return Err(AppError::EmailTaken);
        }

        let password_hash = hash_password(password)?;

        let mut user_id = id::generate(id::USER_ID_LEN);
        while self.users.contains_key(&user_id) {
            user_id = id::generate(id::USER_ID_LEN);
        }

        self.users.insert(
            user_id.clone(),
            User {
                id: user_id.clone(),
                email: email.to_string(),
                password_hash,
            },
        );

        Ok(user_id)
    }

    /// Checks a password for the given user id.
    ///
    /// Unknown ids fail closed: the answer is simply `false`.
    pub fn verify(&self, user_id: &str, password: &str) -> bool {
        match self.users.get(user_id) {
            Some(user) => verify_password(password, &user.password_hash),
            None => false,
        }
    }
}
