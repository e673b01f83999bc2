use async_trait::async_trait;

use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct NewBlog {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    pub(crate) likes: i64,
    pub(crate) user_id: i64,
}

#[derive(Debug, Clone)]
pub(crate) struct BlogPatch {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
    /// `None` keeps the stored likes count.
    pub(crate) likes: Option<i64>,
}

/// Owner fields exposed in the blog listing.
#[derive(Debug, Clone)]
pub(crate) struct BlogOwner {
    pub(crate) username: String,
    pub(crate) name: String,
}

#[derive(Debug, Clone)]
pub(crate) struct BlogListing {
    pub(crate) blog: Blog,
    pub(crate) owner: Option<BlogOwner>,
}

#[async_trait]
pub(crate) trait BlogRepository: Send + Sync {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError>;
    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError>;
    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError>;
    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError>;
    async fn list_blogs(&self) -> Result<Vec<BlogListing>, DomainError>;
}
