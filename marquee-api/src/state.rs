use std::sync::Arc;

use marquee_domain::{BookingRepository, MovieRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub movies: Arc<dyn MovieRepository>,
    pub users: Arc<dyn UserRepository>,
    pub bookings: Arc<dyn BookingRepository>,
}
