pub mod delete;
pub mod email;
pub mod password;

use crate::AppState;
use axum::routing;
use axum::Router;
use utoipa::OpenApi;

/// Returns the router for account management (mounted at /api/users)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/email", routing::put(email::update_email))
        .route("/password", routing::put(password::update_password))
        .route("/", routing::delete(delete::delete_account))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        email::update_email,
        password::update_password,
        delete::delete_account,
    ),
    components(schemas(email::UpdateEmailRequest, password::UpdatePasswordRequest))
)]
pub struct ApiDoc;
