use async_trait::async_trait;
use sqlx::PgPool;
use std::error::Error;

use marquee_domain::repository::BookingRepository;
use marquee_domain::Booking;

pub struct StoreBookingRepository {
    pool: PgPool,
}

impl StoreBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct BookingRow {
    id: i32,
    user_id: i32,
    movie_title: String,
    seats: i32,
}

#[async_trait]
impl BookingRepository for StoreBookingRepository {
    async fn create_booking(
        &self,
        user_id: i32,
        movie_title: &str,
        seats: i32,
    ) -> Result<Booking, Box<dyn Error + Send + Sync>> {
        // RETURNING hands back the generated id in the same statement,
        // so the response text can reference it without a second query.
        let row: BookingRow = sqlx::query_as(
            r#"
            INSERT INTO bookings (user_id, movie_title, seats)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, movie_title, seats
            "#,
        )
        .bind(user_id)
        .bind(movie_title)
        .bind(seats)
        .fetch_one(&self.pool)
        .await?;

        Ok(Booking {
            id: row.id,
            user_id: row.user_id,
            movie_title: row.movie_title,
            seats: row.seats,
        })
    }
}
