use crate::api::recipes::search::{RecipeRow, RecipeSummary};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::{recipes, try_list_entries};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TryListResponse {
    pub recipes: Vec<RecipeSummary>,
}

#[utoipa::path(
    get,
    path = "/api/try-list",
    tag = "try-list",
    responses(
        (status = 200, description = "Recipes the caller wants to try, oldest save first", body = TryListResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_try_list(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let rows: Vec<RecipeRow> = match try_list_entries::table
        .inner_join(recipes::table)
        .filter(try_list_entries::user_id.eq(user.id))
        .order(try_list_entries::created_at.asc())
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
                    error: "Failed to fetch try list".to_string(),
                }),
            )
                .into_response()
        }
    };

    (
        StatusCode::OK,
        Json(TryListResponse {
            recipes: rows.into_iter().map(RecipeSummary::from).collect(),
        }),
    )
        .into_response()
}
