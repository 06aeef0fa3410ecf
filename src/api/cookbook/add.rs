use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewCookbookEntry;
use crate::schema::{cookbook_entries, recipes};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddEntryRequest {
    pub recipe_id: Uuid,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddEntryResponse {
    /// False when the recipe was already saved
    pub added: bool,
}

#[utoipa::path(
    post,
    path = "/api/cookbook",
    tag = "cookbook",
    request_body = AddEntryRequest,
    responses(
        (status = 201, description = "Recipe added to the cookbook", body = AddEntryResponse),
        (status = 200, description = "Recipe was already in the cookbook", body = AddEntryResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn add_entry(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<AddEntryRequest>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let recipe_exists: bool = match diesel::select(exists(
        recipes::table.filter(recipes::id.eq(request.recipe_id)),
    ))
    .get_result(&mut conn)
    {
        Ok(e) => e,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to look up recipe".to_string(),
                }),
            )
                .into_response()
        }
    };

    if !recipe_exists {
        return (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Recipe not found".to_string(),
            }),
        )
            .into_response();
    }

    // Duplicate saves are a no-op, reported through `added`
    let inserted = match diesel::insert_into(cookbook_entries::table)
        .values(&NewCookbookEntry {
            user_id: user.id,
            recipe_id: request.recipe_id,
        })
        .on_conflict_do_nothing()
        .execute(&mut conn)
    {
        Ok(count) => count,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to save recipe".to_string(),
                }),
            )
                .into_response()
        }
    };

    let added = inserted > 0;
    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    (status, Json(AddEntryResponse { added })).into_response()
}
