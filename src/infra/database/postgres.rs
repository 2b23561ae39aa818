//! PostgreSQL database client implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};
use std::time::Duration;
use tracing::{info, instrument};

use super::schema::{check_post, check_post_update, normalize_id, prepare_user};
use crate::domain::{
    AppError, DatabaseClient, DatabaseError, NewPost, NewUser, Post, PostRepository, PostUpdate,
    User, UserRepository, generate_entity_id,
};

const POST_COLUMNS: &str = "id, title, body, username, created_at, updated_at";

/// PostgreSQL connection pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(3),
            idle_timeout: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// PostgreSQL database client with connection pooling
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client with custom configuration
    pub async fn new(database_url: &str, config: PostgresConfig) -> Result<Self, AppError> {
        info!("Connecting to PostgreSQL...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .idle_timeout(config.idle_timeout)
            .max_lifetime(config.max_lifetime)
            .connect(database_url)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client with default configuration
    pub async fn with_defaults(database_url: &str) -> Result<Self, AppError> {
        Self::new(database_url, PostgresConfig::default()).await
    }

    /// Run database migrations using sqlx migrate
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    fn row_to_user(row: &PgRow) -> User {
        User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row.get("password_hash"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }

    fn row_to_post(row: &PgRow) -> Post {
        Post {
            id: row.get("id"),
            title: row.get("title"),
            body: row.get("body"),
            username: row.get("username"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl UserRepository for PostgresClient {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn create_user(&self, user: &NewUser) -> Result<User, AppError> {
        let user = prepare_user(user)?;
        let id = generate_entity_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: now,
            updated_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }
}

#[async_trait]
impl PostRepository for PostgresClient {
    #[instrument(skip(self, post), fields(username = %post.username))]
    async fn create_post(&self, post: &NewPost) -> Result<Post, AppError> {
        check_post(post)?;
        let id = generate_entity_id();
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, username, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.username)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Post {
            id,
            title: post.title.clone(),
            body: post.body.clone(),
            username: post.username.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn get_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row = sqlx::query(&format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1"))
            .bind(normalize_id(id))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(Self::row_to_post))
    }

    #[instrument(skip(self, update), fields(username = %update.username))]
    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<Option<Post>, AppError> {
        check_post_update(update)?;

        let row = sqlx::query(&format!(
            r#"
            UPDATE posts
            SET title = COALESCE($1, title),
                body = COALESCE($2, body),
                username = $3,
                updated_at = $4
            WHERE id = $5
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(update.title.as_deref())
        .bind(update.body.as_deref())
        .bind(&update.username)
        .bind(Utc::now())
        .bind(normalize_id(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_post))
    }

    #[instrument(skip(self))]
    async fn delete_post(&self, id: &str) -> Result<Option<Post>, AppError> {
        let row = sqlx::query(&format!(
            "DELETE FROM posts WHERE id = $1 RETURNING {POST_COLUMNS}"
        ))
        .bind(normalize_id(id))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(Self::row_to_post))
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(DatabaseError::Connection(e.to_string())))?;
        Ok(())
    }
}
