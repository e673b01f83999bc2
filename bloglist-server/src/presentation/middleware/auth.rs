use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::domain::user::User;
use crate::presentation::AppState;
use crate::presentation::app_error::AppError;

/// The bearer token pulled out of the `Authorization` header, or its
/// absence. Attached to every request; protected routes decide what an
/// absent token means.
#[derive(Debug, Clone)]
pub(crate) struct ExtractedToken(pub(crate) Option<String>);

/// The account resolved from the token, attached by
/// [`identity_resolver_middleware`] for downstream handlers.
#[derive(Debug, Clone)]
pub(crate) struct CurrentAccount(pub(crate) User);

impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentAccount>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// The scheme prefix is matched literally: exactly `Bearer` followed by a
/// single space. Anything else reads as "no token".
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    value.strip_prefix("Bearer ").map(str::to_string)
}

pub(crate) async fn token_extractor_middleware(mut request: Request, next: Next) -> Response {
    let token = bearer_token(request.headers());
    request.extensions_mut().insert(ExtractedToken(token));
    next.run(request).await
}

pub(crate) async fn identity_resolver_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .extensions()
        .get::<ExtractedToken>()
        .and_then(|extracted| extracted.0.clone())
        .ok_or(AppError::Unauthorized)?;

    let account = state.auth_service.resolve_token(&token).await?;
    request.extensions_mut().insert(CurrentAccount(account));

    Ok(next.run(request).await)
}
