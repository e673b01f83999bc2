use crate::data::blog_repository::{BlogListing, BlogPatch, BlogRepository, NewBlog};
use crate::domain::blog::{Blog, CreateBlogRequest, UpdateBlogRequest};
use crate::domain::error::DomainError;

pub(crate) struct BlogService<R: BlogRepository> {
    repo: R,
}

impl<R: BlogRepository> BlogService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn list_blogs(&self) -> Result<Vec<BlogListing>, DomainError> {
        self.repo.list_blogs().await
    }

    pub(crate) async fn get_blog(&self, id: i64) -> Result<Blog, DomainError> {
        self.repo
            .get_blog(id)
            .await?
            .ok_or(DomainError::NotFound(format!("blog id: {id}")))
    }

    pub(crate) async fn create_blog(
        &self,
        actor_user_id: i64,
        req: CreateBlogRequest,
    ) -> Result<Blog, DomainError> {
        let req = req.validate()?;

        let new_blog = NewBlog {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes.unwrap_or(0),
            user_id: actor_user_id,
        };
        self.repo.create_blog(new_blog).await
    }

    pub(crate) async fn update_blog(
        &self,
        actor_user_id: i64,
        blog_id: i64,
        req: UpdateBlogRequest,
    ) -> Result<Blog, DomainError> {
        let req = req.validate()?;

        let existing = self
            .repo
            .get_blog(blog_id)
            .await?
            .ok_or(DomainError::NotFound(format!("blog id: {blog_id}")))?;
        check_ownership(&existing, actor_user_id)?;

        let patch = BlogPatch {
            title: req.title,
            author: req.author,
            url: req.url,
            likes: req.likes,
        };
        self.repo
            .update_blog(blog_id, patch)
            .await?
            .ok_or(DomainError::NotFound(format!("blog id: {blog_id}")))
    }

    /// Delete is idempotent: an id that matches nothing is a no-op success,
    /// and no ownership check runs for it.
    pub(crate) async fn delete_blog(
        &self,
        actor_user_id: i64,
        blog_id: i64,
    ) -> Result<(), DomainError> {
        let Some(existing) = self.repo.get_blog(blog_id).await? else {
            return Ok(());
        };
        check_ownership(&existing, actor_user_id)?;

        self.repo.delete_blog(blog_id).await?;
        Ok(())
    }
}

/// A blog with no owning account predates the authentication layer and is
/// never mutable through the API.
fn check_ownership(blog: &Blog, actor_user_id: i64) -> Result<(), DomainError> {
    match blog.user_id {
        Some(owner_id) if owner_id == actor_user_id => Ok(()),
        _ => Err(DomainError::Forbidden),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::Utc;

    use super::BlogService;
    use crate::data::blog_repository::{
        BlogListing, BlogOwner, BlogPatch, BlogRepository, NewBlog,
    };
    use crate::domain::blog::{Blog, CreateBlogRequest, UpdateBlogRequest};
    use crate::domain::error::DomainError;

    #[derive(Clone)]
    struct FakeBlogRepo {
        created_input: Arc<Mutex<Option<NewBlog>>>,
        blog_for_get: Arc<Mutex<Option<Blog>>>,
        update_result: Arc<Mutex<Option<Blog>>>,
        update_call: Arc<Mutex<Option<(i64, BlogPatch)>>>,
        delete_calls: Arc<Mutex<Vec<i64>>>,
        list_result: Arc<Mutex<Vec<BlogListing>>>,
    }

    impl FakeBlogRepo {
        fn new() -> Self {
            Self {
                created_input: Arc::new(Mutex::new(None)),
                blog_for_get: Arc::new(Mutex::new(None)),
                update_result: Arc::new(Mutex::new(None)),
                update_call: Arc::new(Mutex::new(None)),
                delete_calls: Arc::new(Mutex::new(Vec::new())),
                list_result: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn set_blog_for_get(&self, blog: Option<Blog>) {
            *self
                .blog_for_get
                .lock()
                .expect("blog_for_get mutex poisoned") = blog;
        }

        fn delete_calls(&self) -> Vec<i64> {
            self.delete_calls
                .lock()
                .expect("delete_calls mutex poisoned")
                .clone()
        }
    }

    #[async_trait]
    impl BlogRepository for FakeBlogRepo {
        async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError> {
            *self
                .created_input
                .lock()
                .expect("created_input mutex poisoned") = Some(input.clone());
            Ok(sample_blog(
                1,
                &input.title,
                input.likes,
                Some(input.user_id),
            ))
        }

        async fn get_blog(&self, _id: i64) -> Result<Option<Blog>, DomainError> {
            Ok(self
                .blog_for_get
                .lock()
                .expect("blog_for_get mutex poisoned")
                .clone())
        }

        async fn update_blog(
            &self,
            id: i64,
            patch: BlogPatch,
        ) -> Result<Option<Blog>, DomainError> {
            *self
                .update_call
                .lock()
                .expect("update_call mutex poisoned") = Some((id, patch));
            Ok(self
                .update_result
                .lock()
                .expect("update_result mutex poisoned")
                .clone())
        }

        async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
            self.delete_calls
                .lock()
                .expect("delete_calls mutex poisoned")
                .push(id);
            Ok(true)
        }

        async fn list_blogs(&self) -> Result<Vec<BlogListing>, DomainError> {
            Ok(self
                .list_result
                .lock()
                .expect("list_result mutex poisoned")
                .clone())
        }
    }

    #[tokio::test]
    async fn create_blog_defaults_missing_likes_to_zero() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreateBlogRequest {
            title: "  title  ".to_string(),
            author: "author".to_string(),
            url: "https://example.com".to_string(),
            likes: None,
        };

        let created = service
            .create_blog(10, req)
            .await
            .expect("create_blog must succeed");
        assert_eq!(created.likes, 0);

        let input = repo
            .created_input
            .lock()
            .expect("created_input mutex poisoned")
            .clone()
            .expect("repo input must be captured");
        assert_eq!(input.title, "title");
        assert_eq!(input.likes, 0);
        assert_eq!(input.user_id, 10);
    }

    #[tokio::test]
    async fn create_blog_rejects_empty_title() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        let req = CreateBlogRequest {
            title: "   ".to_string(),
            author: "author".to_string(),
            url: "https://example.com".to_string(),
            likes: Some(1),
        };

        let err = service
            .create_blog(10, req)
            .await
            .expect_err("empty title must be rejected");
        assert!(matches!(err, DomainError::Validation { field: "title", .. }));
        assert!(
            repo.created_input
                .lock()
                .expect("created_input mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn get_blog_returns_not_found_when_missing() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo);

        let err = service
            .get_blog(42)
            .await
            .expect_err("blog must be missing");
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_blog_returns_not_found_for_missing_target() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        let err = service
            .update_blog(10, 7, sample_update())
            .await
            .expect_err("missing blog must be 'not found'");
        assert!(matches!(err, DomainError::NotFound(_)));
        assert!(
            repo.update_call
                .lock()
                .expect("update_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_blog_is_forbidden_for_non_owner() {
        let repo = FakeBlogRepo::new();
        repo.set_blog_for_get(Some(sample_blog(7, "title", 3, Some(99))));
        let service = BlogService::new(repo.clone());

        let err = service
            .update_blog(10, 7, sample_update())
            .await
            .expect_err("non-owner must be rejected");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(
            repo.update_call
                .lock()
                .expect("update_call mutex poisoned")
                .is_none()
        );
    }

    #[tokio::test]
    async fn update_blog_is_forbidden_for_legacy_blog_without_owner() {
        let repo = FakeBlogRepo::new();
        repo.set_blog_for_get(Some(sample_blog(7, "title", 3, None)));
        let service = BlogService::new(repo);

        let err = service
            .update_blog(10, 7, sample_update())
            .await
            .expect_err("ownerless blog must never be mutable");
        assert!(matches!(err, DomainError::Forbidden));
    }

    #[tokio::test]
    async fn update_blog_patches_through_for_the_owner() {
        let repo = FakeBlogRepo::new();
        repo.set_blog_for_get(Some(sample_blog(7, "old", 3, Some(10))));
        *repo
            .update_result
            .lock()
            .expect("update_result mutex poisoned") = Some(sample_blog(7, "new", 3, Some(10)));
        let service = BlogService::new(repo.clone());

        let updated = service
            .update_blog(10, 7, sample_update())
            .await
            .expect("owner update must succeed");
        assert_eq!(updated.title, "new");

        let (id, patch) = repo
            .update_call
            .lock()
            .expect("update_call mutex poisoned")
            .clone()
            .expect("update call must be captured");
        assert_eq!(id, 7);
        assert_eq!(patch.title, "new");
        assert_eq!(patch.likes, None);
    }

    #[tokio::test]
    async fn delete_blog_is_a_noop_for_missing_target() {
        let repo = FakeBlogRepo::new();
        let service = BlogService::new(repo.clone());

        service
            .delete_blog(10, 42)
            .await
            .expect("missing blog delete must succeed");
        assert!(repo.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn delete_blog_is_forbidden_for_non_owner() {
        let repo = FakeBlogRepo::new();
        repo.set_blog_for_get(Some(sample_blog(7, "title", 3, Some(99))));
        let service = BlogService::new(repo.clone());

        let err = service
            .delete_blog(10, 7)
            .await
            .expect_err("non-owner must be rejected");
        assert!(matches!(err, DomainError::Forbidden));
        assert!(repo.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn delete_blog_removes_the_owners_blog() {
        let repo = FakeBlogRepo::new();
        repo.set_blog_for_get(Some(sample_blog(7, "title", 3, Some(10))));
        let service = BlogService::new(repo.clone());

        service
            .delete_blog(10, 7)
            .await
            .expect("owner delete must succeed");
        assert_eq!(repo.delete_calls(), vec![7]);
    }

    #[tokio::test]
    async fn list_blogs_passes_listings_through() {
        let repo = FakeBlogRepo::new();
        *repo.list_result.lock().expect("list_result mutex poisoned") = vec![BlogListing {
            blog: sample_blog(1, "title", 3, Some(10)),
            owner: Some(BlogOwner {
                username: "root".to_string(),
                name: "root".to_string(),
            }),
        }];
        let service = BlogService::new(repo);

        let listings = service.list_blogs().await.expect("list must succeed");
        assert_eq!(listings.len(), 1);
        assert_eq!(
            listings[0].owner.as_ref().map(|o| o.username.as_str()),
            Some("root")
        );
    }

    fn sample_blog(id: i64, title: &str, likes: i64, user_id: Option<i64>) -> Blog {
        let now = Utc::now();
        Blog::new(
            id,
            title.to_string(),
            "author".to_string(),
            "https://example.com".to_string(),
            likes,
            user_id,
            now,
            now,
        )
        .expect("sample blog must be valid")
    }

    fn sample_update() -> UpdateBlogRequest {
        UpdateBlogRequest {
            title: "new".to_string(),
            author: "author".to_string(),
            url: "https://example.com".to_string(),
            likes: None,
        }
    }
}
