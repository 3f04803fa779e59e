//! Operation name → handler mapping.
//!
//! Each entry decodes its argument bundle, calls one service function and
//! serializes the result. Unknown names and malformed arguments fail with
//! [`AppError::InvalidRequest`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::context::Context;
use crate::models::{NewRecipe, RecipeUpdate};
use crate::services::{recipe_service, user_service};
use crate::utils::error::{AppError, AppResult};

pub const QUERIES: &[&str] = &[
    "getAllRecipes",
    "getRecipe",
    "searchRecipes",
    "getUserRecipes",
    "getCurrentUser",
];

pub const MUTATIONS: &[&str] = &[
    "addRecipe",
    "likeRecipe",
    "unLikeRecipe",
    "deleteUserRecipe",
    "updateUserRecipe",
    "signInUser",
    "signUpUser",
];

#[derive(Debug, Deserialize)]
struct IdArgs {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct LikeArgs {
    #[serde(rename = "_id")]
    id: String,
    username: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    #[serde(default)]
    search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsernameArgs {
    username: String,
}

#[derive(Debug, Deserialize)]
struct UpdateArgs {
    #[serde(rename = "_id")]
    id: String,
    #[serde(flatten)]
    fields: RecipeUpdate,
}

#[derive(Debug, Deserialize)]
struct SignInArgs {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct SignUpArgs {
    username: String,
    email: String,
    password: String,
}

/// Missing args are treated as an empty object
fn args<T: DeserializeOwned>(operation: &str, value: Value) -> AppResult<T> {
    let value = if value.is_null() {
        Value::Object(Default::default())
    } else {
        value
    };

    serde_json::from_value(value)
        .map_err(|e| AppError::InvalidRequest(format!("Invalid arguments for {}: {}", operation, e)))
}

fn to_json<T: Serialize>(result: T) -> AppResult<Value> {
    serde_json::to_value(result).map_err(|e| AppError::Internal(format!("Serialization error: {}", e)))
}

/// "query", "mutation", or `None` for names outside the operation surface
pub fn operation_kind(operation: &str) -> Option<&'static str> {
    if QUERIES.contains(&operation) {
        Some("query")
    } else if MUTATIONS.contains(&operation) {
        Some("mutation")
    } else {
        None
    }
}

/// Runs the named operation against `ctx`
pub async fn dispatch(ctx: &Context, operation: &str, raw_args: Value) -> AppResult<Value> {
    match operation {
        // Queries
        "getAllRecipes" => to_json(recipe_service::get_all_recipes(ctx).await?),
        "getRecipe" => {
            let a: IdArgs = args(operation, raw_args)?;
            to_json(recipe_service::get_recipe(ctx, &a.id).await?)
        }
        "searchRecipes" => {
            let a: SearchArgs = args(operation, raw_args)?;
            to_json(recipe_service::search_recipes(ctx, a.search_term.as_deref()).await?)
        }
        "getUserRecipes" => {
            let a: UsernameArgs = args(operation, raw_args)?;
            to_json(recipe_service::get_user_recipes(ctx, &a.username).await?)
        }
        "getCurrentUser" => to_json(user_service::get_current_user(ctx).await?),

        // Mutations
        "addRecipe" => {
            let a: NewRecipe = args(operation, raw_args)?;
            to_json(recipe_service::add_recipe(ctx, a).await?)
        }
        "likeRecipe" => {
            let a: LikeArgs = args(operation, raw_args)?;
            to_json(recipe_service::like_recipe(ctx, &a.id, &a.username).await?)
        }
        "unLikeRecipe" => {
            let a: LikeArgs = args(operation, raw_args)?;
            to_json(recipe_service::unlike_recipe(ctx, &a.id, &a.username).await?)
        }
        "deleteUserRecipe" => {
            let a: IdArgs = args(operation, raw_args)?;
            to_json(recipe_service::delete_user_recipe(ctx, &a.id).await?)
        }
        "updateUserRecipe" => {
            let a: UpdateArgs = args(operation, raw_args)?;
            to_json(recipe_service::update_user_recipe(ctx, &a.id, a.fields).await?)
        }
        "signInUser" => {
            let a: SignInArgs = args(operation, raw_args)?;
            to_json(user_service::sign_in_user(ctx, &a.username, &a.password).await?)
        }
        "signUpUser" => {
            let a: SignUpArgs = args(operation, raw_args)?;
            to_json(user_service::sign_up_user(ctx, &a.username, &a.email, &a.password).await?)
        }
        _ => Err(AppError::InvalidRequest(format!("Unknown operation: {}", operation))),
    }
}
