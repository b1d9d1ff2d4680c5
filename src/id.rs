//! Random identifier generation
//!
//! Short-link slugs and user ids are both drawn from the same generator:
//! uniform random characters from the 62-character alphanumeric alphabet
//! (A-Z, a-z, 0-9). The generator itself makes no uniqueness promise;
//! the directories regenerate on collision before inserting.

use rand::{distr::Alphanumeric, Rng};

/// Length of generated short-link slugs (e.g. "b2xVn2").
pub const SHORT_ID_LEN: usize = 6;

/// Length of generated user ids.
pub const USER_ID_LEN: usize = 8;

/// Generates a random alphanumeric identifier of the given length.
pub fn generate(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
