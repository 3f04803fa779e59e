use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

use super::{MongoDB, RECIPES};
use crate::models::{Recipe, RecipeUpdate};
use crate::store::{RecipeSort, RecipeStore};
use crate::utils::error::{AppError, AppResult};

fn db_error(e: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(e.to_string())
}

#[derive(Clone)]
pub struct MongoRecipeStore {
    collection: Collection<Recipe>,
}

impl MongoRecipeStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<Recipe>(RECIPES),
        }
    }

    async fn find_sorted(&self, filter: Document, sort: Document) -> AppResult<Vec<Recipe>> {
        self.collection
            .find(filter)
            .sort(sort)
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl RecipeStore for MongoRecipeStore {
    async fn find_all(&self, sort: RecipeSort) -> AppResult<Vec<Recipe>> {
        let sort = match sort {
            RecipeSort::Newest => doc! { "createdDate": -1 },
            RecipeSort::MostLiked => doc! { "likes": -1, "createdDate": -1 },
        };
        self.find_sorted(doc! {}, sort).await
    }

    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        self.collection
            .find_one(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }

    async fn find_by_ids(&self, ids: &[ObjectId]) -> AppResult<Vec<Recipe>> {
        self.collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Vec<Recipe>> {
        self.find_sorted(doc! { "username": username }, doc! { "createdDate": -1 })
            .await
    }

    async fn search_text(&self, term: &str) -> AppResult<Vec<Recipe>> {
        // `score` is projected alongside the document and ignored on deserialization
        self.collection
            .find(doc! { "$text": { "$search": term } })
            .projection(doc! { "score": { "$meta": "textScore" } })
            .sort(doc! { "score": { "$meta": "textScore" } })
            .await
            .map_err(db_error)?
            .try_collect()
            .await
            .map_err(db_error)
    }

    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe> {
        self.collection
            .insert_one(&recipe)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to insert recipe: {}", e)))?;
        Ok(recipe)
    }

    async fn increment_likes(&self, id: &ObjectId, delta: i64) -> AppResult<Option<Recipe>> {
        // Default ReturnDocument::Before
        self.collection
            .find_one_and_update(doc! { "_id": *id }, doc! { "$inc": { "likes": delta } })
            .await
            .map_err(db_error)
    }

    async fn update_fields(&self, id: &ObjectId, update: &RecipeUpdate) -> AppResult<Option<Recipe>> {
        self.collection
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": {
                    "name": update.name.as_str(),
                    "imageUrl": update.image_url.as_str(),
                    "category": update.category.as_str(),
                    "description": update.description.as_str(),
                } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(db_error)
    }

    async fn delete(&self, id: &ObjectId) -> AppResult<Option<Recipe>> {
        self.collection
            .find_one_and_delete(doc! { "_id": *id })
            .await
            .map_err(db_error)
    }
}
