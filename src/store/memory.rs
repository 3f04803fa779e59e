//! In-memory stores for testing

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::sync::Barrier;

use super::{RecipeSort, RecipeStore, UserStore};
use crate::models::{Recipe, RecipeUpdate, User};
use crate::utils::error::{AppError, AppResult};

fn poisoned() -> AppError {
    AppError::DatabaseError("Lock poisoned".to_string())
}

fn newest_first(recipes: &mut [Recipe]) {
    recipes.sort_by(|a, b| b.created_date.cmp(&a.created_date));
}

fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_lowercase())
}

/// Counts term hits over every text field, like a wildcard text index
fn text_score(recipe: &Recipe, terms: &[String]) -> usize {
    let fields = [
        &recipe.name,
        &recipe.image_url,
        &recipe.description,
        &recipe.category,
        &recipe.instructions,
        &recipe.username,
    ];

    fields
        .iter()
        .flat_map(|field| words(field))
        .filter(|word| terms.contains(word))
        .count()
}

#[derive(Debug, Default)]
pub struct InMemoryRecipeStore {
    recipes: RwLock<Vec<Recipe>>,
}

impl InMemoryRecipeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecipeStore for InMemoryRecipeStore {
    async fn find_all(&self, sort: RecipeSort) -> AppResult<Vec<Recipe>> {
        let mut recipes = self.recipes.read().map_err(|_| poisoned())?.clone();
        newest_first(&mut recipes);
        if sort == RecipeSort::MostLiked {
            // stable: ties keep createdDate desc
            recipes.sort_by(|a, b| b.likes.cmp(&a.likes));
        }
        Ok(recipes)
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        Ok(recipes.iter().find(|r| &r.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recipe>> {
        let recipes = self.recipes.read().map_err(|_| poisoned())?;
        Ok(recipes.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Vec<Recipe>> {
        let mut recipes: Vec<Recipe> = self
            .recipes
            .read()
            .map_err(|_| poisoned())?
            .iter()
            .filter(|r| r.username == username)
            .cloned()
            .collect();
        newest_first(&mut recipes);
        Ok(recipes)
    }

    async fn search_text(&self, term: &str) -> AppResult<Vec<Recipe>> {
        let terms: Vec<String> = words(term).collect();
        let mut recipes = self.recipes.read().map_err(|_| poisoned())?.clone();
        newest_first(&mut recipes);

        let mut scored: Vec<(usize, Recipe)> = recipes
            .into_iter()
            .map(|r| (text_score(&r, &terms), r))
            .filter(|(score, _)| *score > 0)
            .collect();
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(scored.into_iter().map(|(_, r)| r).collect())
    }

    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe> {
        let mut recipes = self.recipes.write().map_err(|_| poisoned())?;
        recipes.push(recipe.clone());
        Ok(recipe)
    }

    async fn increment_likes(&self, id: &ObjectId, delta: i64) -> AppResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().map_err(|_| poisoned())?;
        Ok(recipes.iter_mut().find(|r| &r.id == id).map(|recipe| {
            let before = recipe.clone();
            recipe.likes += delta;
            before
        }))
    }

    async fn update_fields(&self, id: &ObjectId, update: &RecipeUpdate) -> AppResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().map_err(|_| poisoned())?;
        Ok(recipes.iter_mut().find(|r| &r.id == id).map(|recipe| {
            recipe.name = update.name.clone();
            recipe.image_url = update.image_url.clone();
            recipe.category = update.category.clone();
            recipe.description = update.description.clone();
            recipe.clone()
        }))
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        let mut recipes = self.recipes.write().map_err(|_| poisoned())?;
        Ok(recipes
            .iter()
            .position(|r| &r.id == id)
            .map(|index| recipes.remove(index)))
    }
}

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<Vec<User>>,
    fail_writes: AtomicBool,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every favorite update fail, to exercise partial-write paths
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn count_by_username(&self, username: &str) -> usize {
        self.users
            .read()
            .map(|users| users.iter().filter(|u| u.username == username).count())
            .unwrap_or(0)
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::DatabaseError("connection reset".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        users.push(user.clone());
        Ok(user)
    }

    async fn add_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.check_writable()?;
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if let Some(user) = users.iter_mut().find(|u| u.username == username) {
            if !user.favorites.contains(recipe_id) {
                user.favorites.push(*recipe_id);
            }
        }
        Ok(())
    }

    async fn remove_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.check_writable()?;
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if let Some(user) = users.iter_mut().find(|u| u.username == username) {
            user.favorites.retain(|id| id != recipe_id);
        }
        Ok(())
    }
}

/// Wraps a user store so that `find_by_username` only returns once `callers`
/// lookups have been made. Lets tests line up concurrent sign-ups.
pub struct GatedUserStore {
    inner: Arc<InMemoryUserStore>,
    lookups: Barrier,
}

impl GatedUserStore {
    pub fn new(inner: Arc<InMemoryUserStore>, callers: usize) -> Self {
        Self {
            inner,
            lookups: Barrier::new(callers),
        }
    }
}

#[async_trait]
impl UserStore for GatedUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let found = self.inner.find_by_username(username).await?;
        self.lookups.wait().await;
        Ok(found)
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.inner.insert(user).await
    }

    async fn add_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.inner.add_favorite(username, recipe_id).await
    }

    async fn remove_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.inner.remove_favorite(username, recipe_id).await
    }
}
