use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::metrics::{increment_error_count, increment_request_count};
use crate::context::AppState;
use crate::middleware::Identity;
use crate::resolvers;
use crate::utils::error::AppError;

/// Body of `POST /api/v1/operations`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct OperationRequest {
    /// Operation name, e.g. `getAllRecipes` or `signInUser`
    pub operation: String,
    /// Argument bundle matching the operation's parameters
    #[serde(default)]
    #[schema(value_type = Object)]
    pub args: Value,
}

#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct OperationResponse {
    pub success: bool,
    #[schema(value_type = Object)]
    pub data: Value,
}

#[utoipa::path(
    post,
    path = "/api/v1/operations",
    tag = "Operations",
    request_body = OperationRequest,
    responses(
        (status = 200, description = "Operation result (data may be null)", body = OperationResponse),
        (status = 400, description = "Unknown operation or invalid arguments"),
        (status = 401, description = "InvalidCredential"),
        (status = 404, description = "NotFound"),
        (status = 409, description = "AlreadyExists")
    ),
    security(
        (),
        ("bearer_auth" = [])
    )
)]
pub async fn execute(
    state: web::Data<AppState>,
    identity: Option<web::ReqData<Identity>>,
    request: web::Json<OperationRequest>,
) -> Result<HttpResponse, AppError> {
    increment_request_count();

    let OperationRequest { operation, args } = request.into_inner();
    let current_user = identity.and_then(|id| id.into_inner().0);
    let caller = current_user
        .as_ref()
        .map(|claims| claims.username.clone())
        .unwrap_or_else(|| "anonymous".to_string());
    let kind = resolvers::operation_kind(&operation).unwrap_or("unknown");

    log::info!("📨 {} {} - caller: {}", kind, operation, caller);

    let ctx = state.context(current_user);

    match resolvers::dispatch(&ctx, &operation, args).await {
        Ok(data) => Ok(HttpResponse::Ok().json(OperationResponse { success: true, data })),
        Err(e) => {
            increment_error_count();
            match &e {
                AppError::DatabaseError(_) | AppError::TokenError(_) | AppError::Internal(_) => {
                    log::error!("❌ {} failed: {}", operation, e)
                }
                _ => log::warn!("❌ {} failed: {}", operation, e),
            }
            Err(e)
        }
    }
}
