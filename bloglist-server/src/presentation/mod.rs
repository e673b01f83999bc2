use std::sync::Arc;

use crate::application::auth_service::AuthService;
use crate::application::blog_service::BlogService;
use crate::data::repositories::postgres::blog_repository::PostgresBlogRepository;
use crate::data::repositories::postgres::user_repository::PostgresUserRepository;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod http_handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) auth_service: Arc<AuthService<PostgresUserRepository>>,
    pub(crate) blog_service: Arc<BlogService<PostgresBlogRepository>>,
}

impl AppState {
    pub(crate) fn new(
        auth_service: Arc<AuthService<PostgresUserRepository>>,
        blog_service: Arc<BlogService<PostgresBlogRepository>>,
    ) -> Self {
        Self {
            auth_service,
            blog_service,
        }
    }
}
