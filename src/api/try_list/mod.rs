pub mod add;
pub mod list;
pub mod remove;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the "to try" list (mounted at /api/try-list)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_try_list).post(add::add_entry))
        .route("/{recipe_id}", axum::routing::delete(remove::remove_entry))
}

#[derive(OpenApi)]
#[openapi(
    paths(list::list_try_list, add::add_entry, remove::remove_entry),
    components(schemas(
        list::TryListResponse,
        add::AddEntryRequest,
        add::AddEntryResponse,
    ))
)]
pub struct ApiDoc;
