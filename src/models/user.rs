use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

use super::recipe::{to_rfc3339, RecipeResponse};

// User model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub email: String,
    /// bcrypt digest, never plaintext
    pub password: String,
    /// Recipe ids, set semantics; may point at deleted recipes
    #[serde(default)]
    pub favorites: Vec<ObjectId>,
    pub join_date: BsonDateTime,
}

impl User {
    pub fn new(username: String, email: String, password_digest: String) -> Self {
        Self {
            id: ObjectId::new(),
            username,
            email,
            password: password_digest,
            favorites: Vec::new(),
            join_date: BsonDateTime::now(),
        }
    }
}

/// `getCurrentUser` result: the user with favorites resolved into recipes
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    pub email: String,
    pub join_date: String,
    pub favorites: Vec<RecipeResponse>,
}

impl CurrentUserResponse {
    pub fn new(user: User, favorites: Vec<RecipeResponse>) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username,
            email: user.email,
            join_date: to_rfc3339(user.join_date),
            favorites,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub token: String,
}
