use async_trait::async_trait;
use std::error::Error;

use crate::{Booking, Movie, User};

/// Repository trait for movie data access
#[async_trait]
pub trait MovieRepository: Send + Sync {
    async fn list_movies(&self) -> Result<Vec<Movie>, Box<dyn Error + Send + Sync>>;

    async fn find_by_title(
        &self,
        title: &str,
    ) -> Result<Option<Movie>, Box<dyn Error + Send + Sync>>;
}

/// Repository trait for user data access
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, Box<dyn Error + Send + Sync>>;
}

/// Repository trait for booking data access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking and return it with the generated id.
    async fn create_booking(
        &self,
        user_id: i32,
        movie_title: &str,
        seats: i32,
    ) -> Result<Booking, Box<dyn Error + Send + Sync>>;
}
