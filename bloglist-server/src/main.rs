use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::auth_service::AuthService;
use application::blog_service::BlogService;
use data::repositories::postgres::blog_repository::PostgresBlogRepository;
use data::repositories::postgres::user_repository::PostgresUserRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url).await?;
    run_migrations(&pool).await?;

    let jwt = JwtService::new(&settings.jwt_secret, settings.jwt_ttl_seconds);
    let auth_service = Arc::new(AuthService::new(PostgresUserRepository::new(pool.clone()), jwt));
    let blog_service = Arc::new(BlogService::new(PostgresBlogRepository::new(pool)));
    let state = AppState::new(auth_service, blog_service);

    server::run_http(&settings, state).await
}
