//! Short-link registry: ownership-scoped CRUD and visit tracking
//!
//! The registry is the heart of the application. It owns every
//! [`UrlRecord`], enforces the ownership policy on reads and mutations,
//! and keeps the per-link visit analytics up to date when slugs are
//! resolved for redirection.
//!
//! Policy in one line: existence leaks only to the owner. A non-owner
//! reading a record gets `NotFound`; a non-owner mutating one gets
//! `Forbidden` (the mutation would have been attempted, so the
//! distinction is meaningful and the lookup already happened).

use std::collections::HashMap;

use chrono::Utc;

use crate::error::AppError;
use crate::id;
use crate::model::{UrlRecord, Visit, ANONYMOUS_VISITOR};

/// Pure ownership decision for a mutating operation.
///
/// `AuthRequired` when no identity was resolved, `Forbidden` when the
/// identity is not the record's owner, `Ok` otherwise. No side effects.
pub fn authorize_owner_action(record: &UrlRecord, acting_user: Option<&str>) -> Result<(), AppError> {
    match acting_user {
        None => Err(AppError::AuthRequired),
        Some(uid) if uid != record.owner_id => Err(AppError::Forbidden),
        Some(_) => Ok(()),
    }
}

/// In-memory registry of short links, keyed by slug.
#[derive(Debug, Default)]
pub struct UrlRegistry {
    urls: HashMap<String, UrlRecord>,
}

impl UrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new short link owned by `owner_id` and returns the record.
    ///
    /// The slug is regenerated until it is free, so a random collision
    /// never overwrites an existing link and never surfaces to the caller.
    pub fn create(&mut self, owner_id: &str, target_url: &str) -> Result<UrlRecord, AppError> {
        if target_url.is_empty() {
            return Err(AppError::Validation("url"));
        }

        let mut slug = id::generate(id::SHORT_ID_LEN);
        while self.urls.contains_key(&slug) {
            slug = id::generate(id::SHORT_ID_LEN);
        }

        let record = UrlRecord {
            id: slug.clone(),
            target_url: target_url.to_string(),
            owner_id: owner_id.to_string(),
            created_at: Utc::now(),
            visits: Vec::new(),
            unique_visitors: Default::default(),
        };
        self.urls.insert(slug, record.clone());

        Ok(record)
    }

    /// Looks up a record by slug with no ownership filtering.
    ///
    /// This is the redirect path's view of the registry; the API read
    /// path goes through [`UrlRegistry::get_for_owner`] instead.
    pub fn get(&self, slug: &str) -> Option<&UrlRecord> {
        self.urls.get(slug)
    }

    /// Looks up a record on behalf of its owner.
    ///
    /// A record owned by someone else answers `NotFound`, exactly like a
    /// slug that does not exist, so non-owners cannot probe for slugs.
    pub fn get_for_owner(&self, slug: &str, acting_user: &str) -> Result<&UrlRecord, AppError> {
        match self.urls.get(slug) {
            Some(record) if record.owner_id == acting_user => Ok(record),
            _ => Err(AppError::NotFound),
        }
    }

    /// Returns every record owned by `owner_id`.
    ///
    /// Order follows the underlying map and carries no meaning.
    pub fn list_for_owner(&self, owner_id: &str) -> Vec<UrlRecord> {
        self.urls
            .values()
            .filter(|record| record.owner_id == owner_id)
            .cloned()
            .collect()
    }

    /// Replaces the target of a link on behalf of `acting_user`.
    ///
    /// Editing a link resets its analytics: the visit log and unique
    /// visitor set are cleared and `created_at` is refreshed, so the
    /// stats always describe the current destination.
    pub fn update(
        &mut self,
        slug: &str,
        new_target_url: &str,
        acting_user: &str,
    ) -> Result<UrlRecord, AppError> {
        if new_target_url.is_empty() {
            return Err(AppError::Validation("url"));
        }

        let record = self.urls.get_mut(slug).ok_or(AppError::NotFound)?;
        authorize_owner_action(record, Some(acting_user))?;

        record.target_url = new_target_url.to_string();
        record.created_at = Utc::now();
        record.visits.clear();
        record.unique_visitors.clear();

        Ok(record.clone())
    }

    /// Deletes a link on behalf of `acting_user` and returns the removed
    /// record.
    pub fn delete(&mut self, slug: &str, acting_user: &str) -> Result<UrlRecord, AppError> {
        let record = self.urls.get(slug).ok_or(AppError::NotFound)?;
        authorize_owner_action(record, Some(acting_user))?;

        // Checked above, the remove cannot miss.
        Ok(self.urls.remove(slug).expect("record present after lookup"))
    }

    /// Records a resolution of `slug` and returns the target URL.
    ///
    /// Anyone may trigger this, logged in or not; there is no ownership
    /// check. The visit is appended to the log unconditionally, while
    /// the unique-visitor set only grows on the first visit per identity.
    pub fn record_visit(&mut self, slug: &str, visitor: Option<&str>) -> Result<String, AppError> {
        let record = self.urls.get_mut(slug).ok_or(AppError::NotFound)?;
        let visitor = visitor.unwrap_or(ANONYMOUS_VISITOR).to_string();

        record.visits.push(Visit {
            at: Utc::now(),
            visitor: visitor.clone(),
        });
        record.unique_visitors.insert(visitor);

        Ok(record.target_url.clone())
    }
}
