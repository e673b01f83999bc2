use axum::Router;
use axum::middleware;
use axum::routing::{get, post, put};

use crate::presentation::AppState;
use crate::presentation::handlers::blogs::{
    blog_stats, create_blog, delete_blog, get_blog, list_blogs, update_blog,
};
use crate::presentation::middleware::auth::identity_resolver_middleware;

pub(crate) fn router(state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/", get(list_blogs))
        .route("/stats", get(blog_stats))
        .route("/{id}", get(get_blog));

    let protected = Router::new()
        .route("/", post(create_blog))
        .route("/{id}", put(update_blog).delete(delete_blog))
        .layer(middleware::from_fn_with_state(
            state,
            identity_resolver_middleware,
        ));

    public.merge(protected)
}
