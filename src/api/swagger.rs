use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Recipe Service API",
        version = "1.0.0",
        description = "Recipe sharing backend. \n\nAll queries and mutations go through `POST /api/v1/operations` as `{\"operation\": <name>, \"args\": {...}}`.\n\n**Queries:** getAllRecipes, getRecipe, searchRecipes, getUserRecipes, getCurrentUser\n\n**Mutations:** addRecipe, likeRecipe, unLikeRecipe, deleteUserRecipe, updateUserRecipe, signInUser, signUpUser\n\n**Authentication:** send the token from signInUser/signUpUser in the `Authorization` header. Invalid or missing tokens are treated as anonymous."
    ),
    paths(
        crate::api::operations::execute,
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            crate::api::operations::OperationRequest,
            crate::api::operations::OperationResponse,
            crate::api::health::HealthResponse,
            crate::models::RecipeResponse,
            crate::models::CurrentUserResponse,
            crate::models::TokenResponse,
        )
    ),
    tags(
        (name = "Operations", description = "Query and mutation dispatch."),
        (name = "Health", description = "Health check and operation counters."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Session token returned by signInUser / signUpUser"))
                        .build(),
                ),
            );
        }
    }
}
