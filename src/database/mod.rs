use mongodb::{Client, Collection, Database};
use std::error::Error;

mod recipe_store;
mod user_store;

pub use recipe_store::MongoRecipeStore;
pub use user_store::MongoUserStore;

pub const RECIPES: &str = "recipes";
pub const USERS: &str = "users";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates the indexes the recipe queries rely on
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let recipes = self.collection::<mongodb::bson::Document>(RECIPES);

        // Wildcard text index: searchRecipes matches against every string field
        let text_index = IndexModel::builder()
            .keys(doc! { "$**": "text" })
            .build();

        match recipes.create_index(text_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes($** text)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let created_index = IndexModel::builder()
            .keys(doc! { "createdDate": -1 })
            .build();

        match recipes.create_index(created_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes(createdDate)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        let owner_index = IndexModel::builder()
            .keys(doc! { "username": 1, "createdDate": -1 })
            .build();

        match recipes.create_index(owner_index).await {
            Ok(_) => log::info!("   ✅ Index created: recipes(username, createdDate)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // Not unique: sign-up checks for an existing username before inserting
        let users = self.collection::<mongodb::bson::Document>(USERS);

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .build();

        match users.create_index(username_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(username)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}
