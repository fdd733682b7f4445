//! Root greeting.

use axum::{routing::get, Json, Router};
use userdir_service::Message;

/// Creates the root router.
pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/", get(root))
}

/// Static greeting, doubles as a trivial liveness check.
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "Greeting", body = Message)
    )
)]
pub async fn root() -> Json<Message> {
    Json(Message::new("Olá Mundo!"))
}
