use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::blog_repository::{BlogListing, BlogOwner, BlogPatch, BlogRepository, NewBlog};
use crate::domain::blog::Blog;
use crate::domain::error::DomainError;

#[derive(Debug, Clone)]
pub(crate) struct PostgresBlogRepository {
    pool: PgPool,
}

impl PostgresBlogRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BlogListingRow {
    id: i64,
    title: String,
    author: String,
    url: String,
    likes: i64,
    user_id: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_username: Option<String>,
    owner_name: Option<String>,
}

#[async_trait]
impl BlogRepository for PostgresBlogRepository {
    async fn create_blog(&self, input: NewBlog) -> Result<Blog, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            INSERT INTO blogs (title, author, url, likes, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, author, url, likes, user_id, created_at, updated_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.author)
        .bind(&input.url)
        .bind(input.likes)
        .bind(input.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        map_row_to_blog(row)
    }

    async fn get_blog(&self, id: i64) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, title, author, url, likes, user_id, created_at, updated_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn update_blog(&self, id: i64, patch: BlogPatch) -> Result<Option<Blog>, DomainError> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            UPDATE blogs
            SET title = $2,
                author = $3,
                url = $4,
                likes = COALESCE($5, likes),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, author, url, likes, user_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&patch.title)
        .bind(&patch.author)
        .bind(&patch.url)
        .bind(patch.likes)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        row.map(map_row_to_blog).transpose()
    }

    async fn delete_blog(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_blogs(&self) -> Result<Vec<BlogListing>, DomainError> {
        let rows = sqlx::query_as::<_, BlogListingRow>(
            r#"
            SELECT
                b.id,
                b.title,
                b.author,
                b.url,
                b.likes,
                b.user_id,
                b.created_at,
                b.updated_at,
                u.username AS owner_username,
                u.name AS owner_name
            FROM blogs b
            LEFT JOIN users u ON u.id = b.user_id
            ORDER BY b.created_at, b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_blog_db_error)?;

        rows.into_iter().map(map_row_to_listing).collect()
    }
}

fn map_row_to_blog(row: BlogRow) -> Result<Blog, DomainError> {
    Blog::new(
        row.id,
        row.title,
        row.author,
        row.url,
        row.likes,
        row.user_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_row_to_listing(row: BlogListingRow) -> Result<BlogListing, DomainError> {
    let owner = match (row.owner_username, row.owner_name) {
        (Some(username), Some(name)) => Some(BlogOwner { username, name }),
        _ => None,
    };

    let blog = Blog::new(
        row.id,
        row.title,
        row.author,
        row.url,
        row.likes,
        row.user_id,
        row.created_at,
        row.updated_at,
    )
    .map_err(|err| DomainError::Unexpected(err.to_string()))?;

    Ok(BlogListing { blog, owner })
}

fn map_blog_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("user".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
