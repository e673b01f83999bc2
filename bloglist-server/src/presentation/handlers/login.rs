use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::LoginRequest;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct LoginResponseDto {
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) token: String,
}

#[utoipa::path(
    post,
    path = "/api/login",
    tag = "login",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Login successful", body = LoginResponseDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<Json<LoginResponseDto>> {
    dto.validate()?;

    let req = LoginRequest {
        username: dto.username,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok(Json(LoginResponseDto {
        username: result.user.username,
        name: result.user.name,
        token: result.token,
    }))
}
