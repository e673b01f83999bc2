use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct UserCredentials {
    pub(crate) user: User,
    pub(crate) password_hash: String,
}

#[derive(Debug, Clone)]
pub(crate) struct NewUser {
    pub(crate) username: String,
    pub(crate) name: String,
    pub(crate) password_hash: String,
}

/// Blog fields exposed in the user listing.
#[derive(Debug, Clone)]
pub(crate) struct OwnedBlog {
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) url: String,
}

#[derive(Debug, Clone)]
pub(crate) struct UserWithBlogs {
    pub(crate) user: User,
    pub(crate) blogs: Vec<OwnedBlog>,
}

#[async_trait]
pub(crate) trait UserRepository: Send + Sync {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError>;
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError>;
    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, DomainError>;
}
