use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::schema::recipes;
use crate::search::{self, Criteria};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeSummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    /// Author of the recipe
    pub user_id: Uuid,
    pub has_image: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SearchResponse {
    pub recipes: Vec<RecipeSummary>,
}

/// Narrow row for list-style responses; the image itself stays in the store.
#[derive(Queryable)]
pub(crate) struct RecipeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    pub tags: serde_json::Value,
    pub has_image: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RecipeRow> for RecipeSummary {
    fn from(row: RecipeRow) -> Self {
        RecipeSummary {
            id: row.id,
            name: row.name,
            description: row.description,
            tags: search::decode_tags(row.tags),
            user_id: row.user_id,
            has_image: row.has_image,
            created_at: row.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/recipes/search",
    tag = "recipes",
    request_body = Criteria,
    responses(
        (status = 200, description = "Recipes matching the criteria", body = SearchResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn search_recipes(
    AuthUser(_user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(criteria): Json<Criteria>,
) -> impl IntoResponse {
    // Malformed or oversized criteria yield an empty result, not an error
    let Some(criteria) = criteria.validate() else {
        return (
            StatusCode::OK,
            Json(SearchResponse {
                recipes: Vec::new(),
            }),
        )
            .into_response();
    };

    // Pre-compute patterns so they live long enough for the boxed query
    let name_pattern = criteria.name_pattern();
    let description_pattern = criteria.description_pattern();

    let mut conn = get_conn!(pool);

    let mut query = recipes::table.into_boxed();

    if let Some(ref pattern) = name_pattern {
        query = query.filter(recipes::name.ilike(pattern));
    }
    if let Some(ref pattern) = description_pattern {
        query = query.filter(recipes::description.ilike(pattern));
    }

    // Insertion order, so repeating a search against an unchanged store
    // returns an identical list
    let rows: Vec<RecipeRow> = match query
        .order((recipes::created_at.asc(), recipes::id.asc()))
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
                    error: "Failed to search recipes".to_string(),
                }),
            )
                .into_response()
        }
    };

    // Tag containment is enforced here, not in SQL
    let summaries: Vec<RecipeSummary> = rows.into_iter().map(RecipeSummary::from).collect();
    let recipes = search::retain_matching(summaries, &criteria.tags, |r| &r.tags);

    (StatusCode::OK, Json(SearchResponse { recipes })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_decodes_tag_column() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Pasta".to_string(),
            description: "Weeknight dinner".to_string(),
            tags: json!(["vegan", "quick"]),
            has_image: false,
            created_at: Utc::now(),
        };
        let summary = RecipeSummary::from(row);
        assert_eq!(summary.tags, vec!["vegan", "quick"]);
    }

    #[test]
    fn test_summary_tolerates_malformed_tag_column() {
        let row = RecipeRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Soup".to_string(),
            description: String::new(),
            tags: json!({"unexpected": "shape"}),
            has_image: true,
            created_at: Utc::now(),
        };
        assert!(RecipeSummary::from(row).tags.is_empty());
    }
}
