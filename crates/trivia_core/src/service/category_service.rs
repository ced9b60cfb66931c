//! Category directory use-case service.

use crate::model::category::{category_map, CategoryMap};
use crate::repo::category_repo::CategoryRepository;
use crate::service::error::TriviaResult;
use crate::service::store_failure;
use log::debug;

/// Read-only facade over the category store.
pub struct CategoryService<C: CategoryRepository> {
    repo: C,
}

impl<C: CategoryRepository> CategoryService<C> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: C) -> Self {
        Self { repo }
    }

    /// Returns the id -> label mapping of all categories.
    ///
    /// An empty store yields an empty mapping, not an error.
    pub fn list_categories(&self) -> TriviaResult<CategoryMap> {
        let categories = self
            .repo
            .list_categories()
            .map_err(|err| store_failure("category_list", err))?;
        debug!(
            "event=category_list module=service status=ok count={}",
            categories.len()
        );
        Ok(category_map(&categories))
    }
}
