use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::blog_repository::BlogListing;
use crate::domain::blog::{Blog, CreateBlogRequest, UpdateBlogRequest};
use crate::domain::stats;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::CurrentAccount;

// Absent fields deserialize to their defaults so that "missing" and
// "empty" classify identically as validation failures.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateBlogDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) author: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) url: String,
    #[validate(range(min = 0))]
    pub(crate) likes: Option<i64>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct UpdateBlogDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) title: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) author: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) url: String,
    #[validate(range(min = 0))]
    pub(crate) likes: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) user: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogOwnerDto {
    pub(crate) username: String,
    pub(crate) name: String,
}

/// Listing entry: the owner reference is expanded to `{username, name}`.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogListingDto {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) user: Option<BlogOwnerDto>,
}

impl From<Blog> for BlogDto {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user_id,
        }
    }
}

impl From<BlogListing> for BlogListingDto {
    fn from(listing: BlogListing) -> Self {
        Self {
            id: listing.blog.id,
            title: listing.blog.title,
            author: listing.blog.author,
            url: listing.blog.url,
            likes: listing.blog.likes,
            user: listing.owner.map(|owner| BlogOwnerDto {
                username: owner.username,
                name: owner.name,
            }),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct BlogStatsDto {
    #[serde(rename = "totalLikes")]
    pub(crate) total_likes: i64,
    pub(crate) favorite: FavoriteBlogDto,
    #[serde(rename = "mostBlogs")]
    pub(crate) most_blogs: TopBloggerDto,
    #[serde(rename = "mostLikes")]
    pub(crate) most_likes: TopLikedAuthorDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct FavoriteBlogDto {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) likes: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TopBloggerDto {
    pub(crate) author: String,
    pub(crate) blogs: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct TopLikedAuthorDto {
    pub(crate) author: String,
    pub(crate) likes: i64,
}

impl From<stats::FavoriteBlog> for FavoriteBlogDto {
    fn from(favorite: stats::FavoriteBlog) -> Self {
        Self {
            title: favorite.title,
            author: favorite.author,
            likes: favorite.likes,
        }
    }
}

impl From<stats::TopBlogger> for TopBloggerDto {
    fn from(top: stats::TopBlogger) -> Self {
        Self {
            author: top.author,
            blogs: top.blogs,
        }
    }
}

impl From<stats::TopLikedAuthor> for TopLikedAuthorDto {
    fn from(top: stats::TopLikedAuthor) -> Self {
        Self {
            author: top.author,
            likes: top.likes,
        }
    }
}

/// Path ids are parsed by hand; a malformed id answers 400 with the same
/// JSON error shape as every other failure.
pub(crate) fn parse_blog_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or(AppError::MalformedId)
}

#[utoipa::path(
    get,
    path = "/api/blogs",
    tag = "blogs",
    responses(
        (status = 200, description = "Blogs listed", body = [BlogListingDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_blogs(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<BlogListingDto>>> {
    let listings = state.blog_service.list_blogs().await?;

    Ok(Json(
        listings.into_iter().map(BlogListingDto::from).collect(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/blogs/stats",
    tag = "blogs",
    responses(
        (status = 200, description = "Aggregate blog statistics", body = BlogStatsDto),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn blog_stats(State(state): State<AppState>) -> AppResult<Json<BlogStatsDto>> {
    let listings = state.blog_service.list_blogs().await?;
    let blogs: Vec<Blog> = listings.into_iter().map(|listing| listing.blog).collect();

    Ok(Json(BlogStatsDto {
        total_likes: stats::total_likes(&blogs),
        favorite: stats::favorite_blog(&blogs).into(),
        most_blogs: stats::most_blogs(&blogs).into(),
        most_likes: stats::most_likes(&blogs).into(),
    }))
}

#[utoipa::path(
    get,
    path = "/api/blogs/{id}",
    tag = "blogs",
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 200, description = "Blog found", body = BlogDto),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BlogDto>> {
    let id = parse_blog_id(&id)?;
    let blog = state.blog_service.get_blog(id).await?;

    Ok(Json(BlogDto::from(blog)))
}

#[utoipa::path(
    post,
    path = "/api/blogs",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    request_body = CreateBlogDto,
    responses(
        (status = 201, description = "Blog created", body = BlogDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_blog(
    State(state): State<AppState>,
    account: CurrentAccount,
    Json(dto): Json<CreateBlogDto>,
) -> AppResult<(StatusCode, Json<BlogDto>)> {
    dto.validate()?;
    let req = CreateBlogRequest {
        title: dto.title,
        author: dto.author,
        url: dto.url,
        likes: dto.likes,
    };

    let blog = state.blog_service.create_blog(account.0.id, req).await?;
    Ok((StatusCode::CREATED, Json(BlogDto::from(blog))))
}

#[utoipa::path(
    put,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    request_body = UpdateBlogDto,
    responses(
        (status = 200, description = "Blog updated", body = BlogDto),
        (status = 400, description = "Validation error or malformed id"),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 404, description = "Blog not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn update_blog(
    State(state): State<AppState>,
    account: CurrentAccount,
    Path(id): Path<String>,
    Json(dto): Json<UpdateBlogDto>,
) -> AppResult<Json<BlogDto>> {
    let id = parse_blog_id(&id)?;
    dto.validate()?;
    let req = UpdateBlogRequest {
        title: dto.title,
        author: dto.author,
        url: dto.url,
        likes: dto.likes,
    };

    let blog = state
        .blog_service
        .update_blog(account.0.id, id, req)
        .await?;
    Ok(Json(BlogDto::from(blog)))
}

#[utoipa::path(
    delete,
    path = "/api/blogs/{id}",
    tag = "blogs",
    security(
        ("bearer_auth" = [])
    ),
    params(
        ("id" = i64, Path, description = "Blog id")
    ),
    responses(
        (status = 204, description = "Blog deleted (or was already gone)"),
        (status = 400, description = "Malformed id"),
        (status = 401, description = "Unauthorized or not the owner"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn delete_blog(
    State(state): State<AppState>,
    account: CurrentAccount,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let id = parse_blog_id(&id)?;
    state.blog_service.delete_blog(account.0.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::parse_blog_id;
    use crate::presentation::app_error::AppError;

    #[test]
    fn numeric_ids_parse() {
        assert_eq!(parse_blog_id("42").expect("id must parse"), 42);
    }

    #[test]
    fn non_numeric_ids_are_malformed() {
        assert!(matches!(
            parse_blog_id("invalidId"),
            Err(AppError::MalformedId)
        ));
    }

    #[test]
    fn non_positive_ids_are_malformed() {
        assert!(matches!(parse_blog_id("0"), Err(AppError::MalformedId)));
        assert!(matches!(parse_blog_id("-3"), Err(AppError::MalformedId)));
    }
}
