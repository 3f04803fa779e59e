use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::Collection;

use super::{MongoDB, USERS};
use crate::models::User;
use crate::store::UserStore;
use crate::utils::error::{AppError, AppResult};

#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<User>,
}

impl MongoUserStore {
    pub fn new(db: &MongoDB) -> Self {
        Self {
            collection: db.collection::<User>(USERS),
        }
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        self.collection
            .insert_one(&user)
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {}", e)))?;
        Ok(user)
    }

    async fn add_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "username": username },
                doc! { "$addToSet": { "favorites": *recipe_id } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to add favorite: {}", e)))?;
        Ok(())
    }

    async fn remove_favorite(&self, username: &str, recipe_id: &ObjectId) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "username": username },
                doc! { "$pull": { "favorites": *recipe_id } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(format!("Failed to remove favorite: {}", e)))?;
        Ok(())
    }
}
