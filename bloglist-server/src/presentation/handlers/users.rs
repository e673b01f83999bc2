use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::data::user_repository::UserWithBlogs;
use crate::domain::user::{RegisterRequest, User};
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

// Absent fields deserialize to their defaults so that "missing" and
// "empty" classify identically as validation failures.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct CreateUserDto {
    #[serde(default)]
    #[validate(length(min = 3, max = 64))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 128))]
    pub(crate) name: String,
    #[serde(default)]
    #[validate(length(min = 3, max = 128))]
    pub(crate) password: String,
}

/// The password hash never leaves the data layer; this is the whole
/// outward shape of an account.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct UserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) blogs: Vec<OwnedBlogDto>,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct OwnedBlogDto {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: Vec::new(),
        }
    }
}

impl From<UserWithBlogs> for UserDto {
    fn from(entry: UserWithBlogs) -> Self {
        Self {
            id: entry.user.id,
            username: entry.user.username,
            name: entry.user.name,
            blogs: entry
                .blogs
                .into_iter()
                .map(|blog| OwnedBlogDto {
                    title: blog.title,
                    author: blog.author,
                    url: blog.url,
                })
                .collect(),
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "users",
    request_body = CreateUserDto,
    responses(
        (status = 201, description = "User created", body = UserDto),
        (status = 400, description = "Validation error or duplicate username"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn create_user(
    State(state): State<AppState>,
    Json(dto): Json<CreateUserDto>,
) -> AppResult<(StatusCode, Json<UserDto>)> {
    dto.validate()?;
    let req = RegisterRequest {
        username: dto.username,
        name: dto.name,
        password: dto.password,
    };

    let user = state.auth_service.register(req).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    responses(
        (status = 200, description = "Users listed", body = [UserDto]),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.auth_service.list_users().await?;

    Ok(Json(users.into_iter().map(UserDto::from).collect()))
}
