use std::sync::Arc;

use crate::config::AuthConfig;
use crate::services::token_service::{Claims, TokenService};
use crate::store::{RecipeStore, UserStore};

/// Process-wide handles, built once at startup and shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub bcrypt_cost: u32,
}

impl AppState {
    pub fn new(recipes: Arc<dyn RecipeStore>, users: Arc<dyn UserStore>, auth: &AuthConfig) -> Self {
        Self {
            recipes,
            users,
            tokens: TokenService::new(auth),
            bcrypt_cost: auth.bcrypt_cost,
        }
    }

    pub fn context(&self, current_user: Option<Claims>) -> Context {
        Context {
            recipes: Arc::clone(&self.recipes),
            users: Arc::clone(&self.users),
            tokens: self.tokens.clone(),
            bcrypt_cost: self.bcrypt_cost,
            current_user,
        }
    }
}

/// Per-request bundle handed to every resolver
#[derive(Clone)]
pub struct Context {
    pub recipes: Arc<dyn RecipeStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub bcrypt_cost: u32,
    /// `None` for anonymous callers, including those whose token failed verification
    pub current_user: Option<Claims>,
}
