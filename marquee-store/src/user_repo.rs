use async_trait::async_trait;
use sqlx::PgPool;
use std::error::Error;

use marquee_domain::repository::UserRepository;
use marquee_domain::User;

pub struct StoreUserRepository {
    pool: PgPool,
}

impl StoreUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i32,
    username: Option<String>,
    email: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username.unwrap_or_default(),
            email: row.email.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl UserRepository for StoreUserRepository {
    async fn list_users(&self) -> Result<Vec<User>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<UserRow> = sqlx::query_as("SELECT id, username, email FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }
}
