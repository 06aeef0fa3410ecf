use crate::api::recipes::search::{RecipeRow, RecipeSummary};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{cookbook_entries, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CookbookResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/cookbook",
    tag = "cookbook",
    responses(
        (status = 200, description = "Recipes in the caller's personal cookbook, oldest save first", body = CookbookResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_cookbook(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<RecipeRow> = match cookbook_entries::table
        .inner_join(recipes::table)
        .filter(cookbook_entries::user_id.eq(user.id))
        .order(cookbook_entries::created_at.asc())
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
                    error: "Failed to fetch cookbook".to_string(),
                }),
            )
                .into_response()
        }
    };

    (
        StatusCode::OK,
        Json(CookbookResponse {
            recipes: rows.into_iter().map(RecipeSummary::from).collect(),
        }),
    )
        .into_response()
}
