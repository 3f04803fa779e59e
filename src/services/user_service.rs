use std::collections::HashMap;

use crate::{
    context::Context,
    models::{CurrentUserResponse, RecipeResponse, TokenResponse, User},
    utils::crypto::{hash_password, verify_password},
    utils::error::{AppError, AppResult},
};

/// getCurrentUser - `None` for anonymous callers.
///
/// Favorites come back in the order they were added; ids of deleted recipes
/// are skipped here but stay stored on the user.
pub async fn get_current_user(ctx: &Context) -> AppResult<Option<CurrentUserResponse>> {
    let claims = match &ctx.current_user {
        Some(claims) => claims,
        None => return Ok(None),
    };

    let user = match ctx.users.find_by_username(&claims.username).await? {
        Some(user) => user,
        None => return Ok(None),
    };

    let mut by_id: HashMap<_, _> = ctx
        .recipes
        .find_by_ids(&user.favorites)
        .await?
        .into_iter()
        .map(|recipe| (recipe.id, recipe))
        .collect();

    let favorites: Vec<RecipeResponse> = user
        .favorites
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(RecipeResponse::from)
        .collect();

    Ok(Some(CurrentUserResponse::new(user, favorites)))
}

/// signInUser
pub async fn sign_in_user(ctx: &Context, username: &str, password: &str) -> AppResult<TokenResponse> {
    let user = ctx
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if !verify_password(password, &user.password).await? {
        return Err(AppError::InvalidCredential("Invalid password".to_string()));
    }

    let token = ctx.tokens.sign(&user)?;
    log::info!("✅ User signed in: {}", username);

    Ok(TokenResponse { token })
}

/// signUpUser - uniqueness is checked here, not by the store, so concurrent
/// sign-ups with the same username can both succeed
pub async fn sign_up_user(ctx: &Context, username: &str, email: &str, password: &str) -> AppResult<TokenResponse> {
    if ctx.users.find_by_username(username).await?.is_some() {
        return Err(AppError::AlreadyExists("User already exists".to_string()));
    }

    let digest = hash_password(password, ctx.bcrypt_cost).await?;
    let user = ctx
        .users
        .insert(User::new(username.to_string(), email.to_string(), digest))
        .await?;

    let token = ctx.tokens.sign(&user)?;
    log::info!("✅ User registered successfully: {}", username);

    Ok(TokenResponse { token })
}
