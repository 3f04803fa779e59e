use crate::utils::error::{AppError, AppResult};

/// Gera o hash bcrypt de uma senha no pool blocking do tokio
pub async fn hash_password(plaintext: &str, cost: u32) -> AppResult<String> {
    let plaintext = plaintext.to_string();

    tokio::task::spawn_blocking(move || bcrypt::hash(plaintext, cost))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

/// Compara uma senha com o hash armazenado
pub async fn verify_password(plaintext: &str, digest: &str) -> AppResult<bool> {
    let plaintext = plaintext.to_string();
    let digest = digest.to_string();

    tokio::task::spawn_blocking(move || bcrypt::verify(plaintext, &digest))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| AppError::Internal(format!("Password verification error: {}", e)))
}
