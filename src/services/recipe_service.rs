// ==================== RECIPE OPERATIONS ====================
// Queries and mutations over the `recipes` collection.
// like/unlike also touch `users.favorites`; the two writes are NOT transactional.

use mongodb::bson::oid::ObjectId;

use crate::{
    context::Context,
    models::{NewRecipe, Recipe, RecipeResponse, RecipeUpdate},
    store::RecipeSort,
    utils::error::{AppError, AppResult},
};

pub fn parse_id(id: &str) -> AppResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| AppError::InvalidRequest(format!("Invalid recipe id: {}", id)))
}

fn to_responses(recipes: Vec<Recipe>) -> Vec<RecipeResponse> {
    recipes.into_iter().map(RecipeResponse::from).collect()
}

// ==================== QUERIES ====================

/// getAllRecipes - newest first
pub async fn get_all_recipes(ctx: &Context) -> AppResult<Vec<RecipeResponse>> {
    let recipes = ctx.recipes.find_all(RecipeSort::Newest).await?;
    Ok(to_responses(recipes))
}

/// getRecipe
pub async fn get_recipe(ctx: &Context, id: &str) -> AppResult<Option<RecipeResponse>> {
    let id = parse_id(id)?;
    Ok(ctx.recipes.find_by_id(&id).await?.map(RecipeResponse::from))
}

/// searchRecipes - relevance order with a term, popularity order without one.
/// Only an absent or empty term counts as "no term"; whitespace still goes to text search.
pub async fn search_recipes(ctx: &Context, search_term: Option<&str>) -> AppResult<Vec<RecipeResponse>> {
    let recipes = match search_term.filter(|t| !t.is_empty()) {
        Some(term) => ctx.recipes.search_text(term).await?,
        None => ctx.recipes.find_all(RecipeSort::MostLiked).await?,
    };
    Ok(to_responses(recipes))
}

/// getUserRecipes - newest first
pub async fn get_user_recipes(ctx: &Context, username: &str) -> AppResult<Vec<RecipeResponse>> {
    let recipes = ctx.recipes.find_by_username(username).await?;
    Ok(to_responses(recipes))
}

// ==================== MUTATIONS ====================

/// addRecipe - likes start at 0, createdDate is now
pub async fn add_recipe(ctx: &Context, input: NewRecipe) -> AppResult<RecipeResponse> {
    let recipe = ctx.recipes.insert(Recipe::new(input)).await?;
    log::info!("✅ Recipe created: {} ({}) by {}", recipe.name, recipe.id, recipe.username);
    Ok(RecipeResponse::from(recipe))
}

/// likeRecipe - returns the recipe as it was BEFORE the increment.
///
/// The likes increment and the favorite insert are two separate writes; if the
/// second one fails the increment stays applied.
pub async fn like_recipe(ctx: &Context, id: &str, username: &str) -> AppResult<Option<RecipeResponse>> {
    let id = parse_id(id)?;
    let before = ctx.recipes.increment_likes(&id, 1).await?;
    ctx.users.add_favorite(username, &id).await?;
    Ok(before.map(RecipeResponse::from))
}

/// unLikeRecipe - no floor on likes; returns the pre-decrement snapshot
pub async fn unlike_recipe(ctx: &Context, id: &str, username: &str) -> AppResult<Option<RecipeResponse>> {
    let id = parse_id(id)?;
    let before = ctx.recipes.increment_likes(&id, -1).await?;
    ctx.users.remove_favorite(username, &id).await?;
    Ok(before.map(RecipeResponse::from))
}

/// deleteUserRecipe - favorites pointing at the recipe are left in place
pub async fn delete_user_recipe(ctx: &Context, id: &str) -> AppResult<Option<RecipeResponse>> {
    let id = parse_id(id)?;
    let removed = ctx.recipes.delete(&id).await?;
    if let Some(recipe) = &removed {
        log::info!("🗑️ Recipe deleted: {} ({})", recipe.name, recipe.id);
    }
    Ok(removed.map(RecipeResponse::from))
}

/// updateUserRecipe - returns the recipe AFTER the update
pub async fn update_user_recipe(ctx: &Context, id: &str, update: RecipeUpdate) -> AppResult<Option<RecipeResponse>> {
    let id = parse_id(id)?;
    Ok(ctx.recipes.update_fields(&id, &update).await?.map(RecipeResponse::from))
}
