use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbPool;
use crate::get_conn;
use crate::models::NewRecipe;
use crate::schema::recipes;
use crate::search::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN, MAX_TAGS_ENCODED_LEN};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use base64::Engine;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

pub const MAX_INSTRUCTIONS_LEN: usize = 3000;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub instructions: String,
    /// Base64-encoded image payload
    pub image: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CreateRecipeResponse {
    pub id: Uuid,
}

/// Decode the base64 image payload from the request, if any.
fn decode_image(image: Option<&str>) -> Result<Option<Vec<u8>>, base64::DecodeError> {
    image
        .filter(|payload| !payload.is_empty())
        .map(|payload| base64::engine::general_purpose::STANDARD.decode(payload))
        .transpose()
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created successfully", body = CreateRecipeResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<Arc<DbPool>>,
    Json(request): Json<CreateRecipeRequest>,
) -> impl IntoResponse {
    if request.name.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Name cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    if request.instructions.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Instructions cannot be empty".to_string(),
            }),
        )
            .into_response();
    }

    for (len, max, field) in [
        (request.name.chars().count(), MAX_NAME_LEN, "Name"),
        (
            request.description.chars().count(),
            MAX_DESCRIPTION_LEN,
            "Description",
        ),
        (
            request.instructions.chars().count(),
            MAX_INSTRUCTIONS_LEN,
            "Instructions",
        ),
    ] {
        if len > max {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("{} exceeds {} characters", field, max),
                }),
            )
                .into_response();
        }
    }

    let image = match decode_image(request.image.as_deref()) {
        Ok(i) => i,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid image encoding".to_string(),
                }),
            )
                .into_response()
        }
    };

    let tags = request.tags.unwrap_or_default();

    // The tag list is stored JSON-encoded; enforce the column bound on the
    // encoded form
    let tags_json = match serde_json::to_value(&tags) {
        Ok(v) => v,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: "Invalid tags format".to_string(),
                }),
            )
                .into_response()
        }
    };
    if tags_json.to_string().len() > MAX_TAGS_ENCODED_LEN {
        return (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Tags exceed {} encoded characters", MAX_TAGS_ENCODED_LEN),
            }),
        )
            .into_response();
    }

    let mut conn = get_conn!(pool);

    let new_recipe = NewRecipe {
        user_id: user.id,
        name: &request.name,
        description: &request.description,
        instructions: &request.instructions,
        image: image.as_deref(),
        tags: tags_json,
    };

    let recipe_id: Uuid = match diesel::insert_into(recipes::table)
        .values(&new_recipe)
        .returning(recipes::id)
        .get_result(&mut conn)
    {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("Failed to create recipe: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create recipe".to_string(),
                }),
            )
                .into_response();
        }
    };

    (
        StatusCode::CREATED,
        Json(CreateRecipeResponse { id: recipe_id }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_image_absent() {
        assert_eq!(decode_image(None).unwrap(), None);
        assert_eq!(decode_image(Some("")).unwrap(), None);
    }

    #[test]
    fn test_decode_image_valid_payload() {
        let encoded = base64::engine::general_purpose::STANDARD.encode([0xFF, 0xD8, 0xFF]);
        assert_eq!(
            decode_image(Some(&encoded)).unwrap(),
            Some(vec![0xFF, 0xD8, 0xFF])
        );
    }

    #[test]
    fn test_decode_image_rejects_bad_base64() {
        assert!(decode_image(Some("not base64!!")).is_err());
    }
}
