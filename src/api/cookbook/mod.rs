pub mod add;
pub mod contains;
pub mod list;
pub mod remove;

use crate::AppState;
use axum::routing::get;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for the personal cookbook (mounted at /api/cookbook)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list::list_cookbook).post(add::add_entry))
        .route(
            "/{recipe_id}",
            get(contains::contains).delete(remove::remove_entry),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(
        list::list_cookbook,
        add::add_entry,
        contains::contains,
        remove::remove_entry,
    ),
    components(schemas(
        list::CookbookResponse,
        add::AddEntryRequest,
        add::AddEntryResponse,
        contains::ContainsResponse,
    ))
)]
pub struct ApiDoc;
