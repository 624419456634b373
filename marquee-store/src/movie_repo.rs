use async_trait::async_trait;
use sqlx::PgPool;
use std::error::Error;

use marquee_domain::repository::MovieRepository;
use marquee_domain::Movie;

pub struct StoreMovieRepository {
    pool: PgPool,
}

impl StoreMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct MovieRow {
    title: String,
    description: Option<String>,
    rating: Option<i32>,
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        Movie {
            title: row.title,
            description: row.description.unwrap_or_default(),
            rating: row.rating.unwrap_or(0),
        }
    }
}

#[async_trait]
impl MovieRepository for StoreMovieRepository {
    async fn list_movies(&self) -> Result<Vec<Movie>, Box<dyn Error + Send + Sync>> {
        let rows: Vec<MovieRow> =
            sqlx::query_as("SELECT title, description, rating FROM movies ORDER BY title")
                .fetch_all(&self.pool)
                .await?;

        Ok(rows.into_iter().map(Movie::from).collect())
    }

    async fn find_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Movie>, Box<dyn Error + Send + Sync>> {
        let row: Option<MovieRow> =
            sqlx::query_as("SELECT title, description, rating FROM movies WHERE title = $1")
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Movie::from))
    }
}
