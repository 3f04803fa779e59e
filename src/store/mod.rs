//! Document store seams for the two collections.
//!
//! Production uses the MongoDB implementations in `crate::database`; tests run
//! the resolvers against [`memory`].

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::models::{Recipe, RecipeUpdate, User};
use crate::utils::error::AppResult;

#[cfg(test)]
pub mod memory;

/// Sort order for full-collection recipe listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeSort {
    /// createdDate desc
    Newest,
    /// likes desc, then createdDate desc
    MostLiked,
}

#[async_trait]
pub trait RecipeStore: Send + Sync {
    async fn find_all(&self, sort: RecipeSort) -> AppResult<Vec<Recipe>>;

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recipe>>;

    /// Recipes whose id is in `ids`, in no particular order
    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recipe>>;

    /// Newest first
    async fn find_by_username(&self, username: &str) -> AppResult<Vec<Recipe>>;

    /// Full-text matches ordered by relevance score desc
    async fn search_text(&self, term: &str) -> AppResult<Vec<Recipe>>;

    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe>;

    /// Adds `delta` to likes and returns the document as it was BEFORE the update
    async fn increment_likes(&self, id: &ObjectId, delta: i64) -> AppResult<Option<Recipe>>;

    /// Overwrites the editable fields and returns the document AFTER the update
    async fn update_fields(&self, id: &ObjectId, update: &RecipeUpdate) -> AppResult<Option<Recipe>>;

    async fn delete(&self, id: &ObjectId) -> AppResult<Option<Recipe>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// Plain insert; username uniqueness is checked by the caller
    async fn insert(&self, user: User) -> AppResult<User>;

    /// `$addToSet`; no-op when the user does not exist
    async fn add_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()>;

    /// `$pull`; no-op when the user or the favorite does not exist
    async fn remove_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()>;
}
