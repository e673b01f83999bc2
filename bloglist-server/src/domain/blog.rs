use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Blog {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) user_id: Option<i64>,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CreateBlogRequest {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: Option<i64>,
}

impl CreateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        Ok(Self {
            title: normalize_field("title", &self.title)?,
            author: normalize_field("author", &self.author)?,
            url: normalize_field("url", &self.url)?,
            likes: Some(normalize_likes(self.likes)?),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UpdateBlogRequest {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    /// `None` keeps the stored likes count.
    pub(crate) likes: Option<i64>,
}

impl UpdateBlogRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if let Some(likes) = self.likes {
            validate_non_negative("likes", likes)?;
        }
        Ok(Self {
            title: normalize_field("title", &self.title)?,
            author: normalize_field("author", &self.author)?,
            url: normalize_field("url", &self.url)?,
            likes: self.likes,
        })
    }
}

impl Blog {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        url: impl Into<String>,
        likes: i64,
        user_id: Option<i64>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        validate_positive_i64("id", id)?;
        if let Some(user_id) = user_id {
            validate_positive_i64("user_id", user_id)?;
        }
        validate_non_negative("likes", likes)?;
        let title = normalize_field("title", &title.into())?;
        let author = normalize_field("author", &author.into())?;
        let url = normalize_field("url", &url.into())?;

        Ok(Self {
            id,
            title,
            author,
            url,
            likes,
            user_id,
            created_at,
            updated_at,
        })
    }
}

fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value < 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be >= 0",
        });
    }
    Ok(())
}

fn normalize_field(field: &'static str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::Validation {
            field,
            message: "must not be empty",
        });
    }
    Ok(value.to_string())
}

fn normalize_likes(likes: Option<i64>) -> Result<i64, DomainError> {
    let likes = likes.unwrap_or(0);
    validate_non_negative("likes", likes)?;
    Ok(likes)
}
