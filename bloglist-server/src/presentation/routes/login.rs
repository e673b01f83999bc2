use axum::Router;
use axum::routing::post;

use crate::presentation::AppState;
use crate::presentation::handlers::login::login;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/", post(login))
}
