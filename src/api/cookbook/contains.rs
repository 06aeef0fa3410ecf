use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::cookbook_entries;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use diesel::dsl::exists;
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ContainsResponse {
    pub saved: bool,
}

#[utoipa::path(
    get,
    path = "/api/cookbook/{recipe_id}",
    tag = "cookbook",
    params(
        ("recipe_id" = Uuid, Path, description = "Recipe ID")
    ),
    responses(
        (status = 200, description = "Whether the recipe is in the caller's cookbook", body = ContainsResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn contains(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Path(recipe_id): Path<Uuid>,
) -> impl IntoResponse {
    let mut conn = get_conn!(pool);

    let saved: bool = match diesel::select(exists(
        cookbook_entries::table
            .filter(cookbook_entries::user_id.eq(user.id))
            .filter(cookbook_entries::recipe_id.eq(recipe_id)),
    ))
    .get_result(&mut conn)
    {
        Ok(s) => s,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to check cookbook".to_string(),
                }),
            )
                .into_response()
        }
    };

    (StatusCode::OK, Json(ContainsResponse { saved })).into_response()
}
