use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::data::user_repository::{
    NewUser, OwnedBlog, UserCredentials, UserRepository, UserWithBlogs,
};
use crate::domain::error::DomainError;
use crate::domain::user::User;

#[derive(Debug, Clone)]
pub(crate) struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    username: String,
    name: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct UserCredentialsRow {
    id: i64,
    username: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OwnedBlogRow {
    user_id: Option<i64>,
    title: String,
    author: String,
    url: String,
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, input: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, name, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, name, created_at
            "#,
        )
        .bind(&input.username)
        .bind(&input.name)
        .bind(&input.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        map_row_to_user(row)
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserCredentials>, DomainError> {
        let row = sqlx::query_as::<_, UserCredentialsRow>(
            r#"
            SELECT id, username, name, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        match row {
            Some(r) => {
                let user = User::new(r.id, r.username, r.name, r.created_at)
                    .map_err(|err| DomainError::Unexpected(err.to_string()))?;
                Ok(Some(UserCredentials {
                    user,
                    password_hash: r.password_hash,
                }))
            }
            None => Ok(None),
        }
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        row.map(map_row_to_user).transpose()
    }

    async fn list_users(&self) -> Result<Vec<UserWithBlogs>, DomainError> {
        let users = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, name, created_at
            FROM users
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        let blogs = sqlx::query_as::<_, OwnedBlogRow>(
            r#"
            SELECT user_id, title, author, url
            FROM blogs
            WHERE user_id IS NOT NULL
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(map_user_db_error)?;

        users
            .into_iter()
            .map(|row| {
                let owned = blogs
                    .iter()
                    .filter(|blog| blog.user_id == Some(row.id))
                    .map(|blog| OwnedBlog {
                        title: blog.title.clone(),
                        author: blog.author.clone(),
                        url: blog.url.clone(),
                    })
                    .collect();
                let user = map_row_to_user(row)?;
                Ok(UserWithBlogs { user, blogs: owned })
            })
            .collect()
    }
}

fn map_row_to_user(row: UserRow) -> Result<User, DomainError> {
    User::new(row.id, row.username, row.name, row.created_at)
        .map_err(|err| DomainError::Unexpected(err.to_string()))
}

fn map_user_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23505")
    {
        return DomainError::AlreadyExists("username".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
