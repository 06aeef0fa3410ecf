pub mod create;
pub mod get;
pub mod mine;
pub mod search;
pub mod tags;

use crate::AppState;
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for /api/recipes endpoints (mounted at /api/recipes)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create::create_recipe))
        .route("/search", post(search::search_recipes))
        .route("/mine", get(mine::my_recipes))
        .route("/tags", get(tags::list_tags))
        .route("/{id}", get(get::get_recipe))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        create::create_recipe,
        search::search_recipes,
        mine::my_recipes,
        get::get_recipe,
        tags::list_tags,
    ),
    components(schemas(
        create::CreateRecipeRequest,
        create::CreateRecipeResponse,
        search::SearchResponse,
        search::RecipeSummary,
        crate::search::Criteria,
        mine::MyRecipesResponse,
        get::RecipeResponse,
        tags::TagsResponse,
    ))
)]
pub struct ApiDoc;
