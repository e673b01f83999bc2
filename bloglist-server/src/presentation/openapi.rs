use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::blogs::{
    BlogDto, BlogListingDto, BlogOwnerDto, BlogStatsDto, CreateBlogDto, FavoriteBlogDto,
    TopBloggerDto, TopLikedAuthorDto, UpdateBlogDto,
};
use crate::presentation::handlers::login::{LoginDto, LoginResponseDto};
use crate::presentation::handlers::users::{CreateUserDto, OwnedBlogDto, UserDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::blogs::list_blogs,
        crate::presentation::handlers::blogs::blog_stats,
        crate::presentation::handlers::blogs::get_blog,
        crate::presentation::handlers::blogs::create_blog,
        crate::presentation::handlers::blogs::update_blog,
        crate::presentation::handlers::blogs::delete_blog,
        crate::presentation::handlers::users::create_user,
        crate::presentation::handlers::users::list_users,
        crate::presentation::handlers::login::login
    ),
    components(
        schemas(
            CreateBlogDto,
            UpdateBlogDto,
            BlogDto,
            BlogOwnerDto,
            BlogListingDto,
            BlogStatsDto,
            FavoriteBlogDto,
            TopBloggerDto,
            TopLikedAuthorDto,
            CreateUserDto,
            UserDto,
            OwnedBlogDto,
            LoginDto,
            LoginResponseDto
        )
    ),
    tags(
        (name = "blogs", description = "Blog endpoints"),
        (name = "users", description = "User endpoints"),
        (name = "login", description = "Login endpoint")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
