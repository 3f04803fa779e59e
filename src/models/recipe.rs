use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Receita armazenada na coleção `recipes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub instructions: String,
    /// Owner, by value
    pub username: String,
    /// No floor: unliking a recipe at zero yields -1
    #[serde(default)]
    pub likes: i64,
    pub created_date: BsonDateTime,
}

impl Recipe {
    pub fn new(input: NewRecipe) -> Self {
        Self {
            id: ObjectId::new(),
            name: input.name,
            image_url: input.image_url,
            description: input.description,
            category: input.category,
            instructions: input.instructions,
            username: input.username,
            likes: 0,
            created_date: BsonDateTime::now(),
        }
    }
}

/// Arguments of `addRecipe`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub instructions: String,
    pub username: String,
}

/// Fields overwritten by `updateUserRecipe`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeUpdate {
    pub name: String,
    pub image_url: String,
    pub category: String,
    pub description: String,
}

/// Representação JSON devolvida ao cliente
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub description: String,
    pub category: String,
    pub instructions: String,
    pub username: String,
    pub likes: i64,
    pub created_date: String,
}

impl From<Recipe> for RecipeResponse {
    fn from(recipe: Recipe) -> Self {
        Self {
            id: recipe.id.to_hex(),
            name: recipe.name,
            image_url: recipe.image_url,
            description: recipe.description,
            category: recipe.category,
            instructions: recipe.instructions,
            username: recipe.username,
            likes: recipe.likes,
            created_date: to_rfc3339(recipe.created_date),
        }
    }
}

pub(crate) fn to_rfc3339(date: BsonDateTime) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(date.timestamp_millis())
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}
