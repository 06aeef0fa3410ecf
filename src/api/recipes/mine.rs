use super::search::{RecipeRow, RecipeSummary};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MyRecipesResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/recipes/mine",
    tag = "recipes",
    responses(
        (status = 200, description = "Recipes authored by the caller, newest first", body = MyRecipesResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn my_recipes(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<RecipeRow> = match recipes::table
        .filter(recipes::user_id.eq(user.id))
        .order(recipes::created_at.desc())
        .select((
            recipes::id,
            recipes::user_id,
            recipes::name,
            recipes::description,
            recipes::tags,
            recipes::image.is_not_null(),
            recipes::created_at,
        ))
        .load(&mut conn)
    {
        Ok(r) => r,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to fetch recipes".to_string(),
                }),
            )
                .into_response()
        }
    };

    (
        StatusCode::OK,
        Json(MyRecipesResponse {
            recipes: rows.into_iter().map(RecipeSummary::from).collect(),
        }),
    )
        .into_response()
}
