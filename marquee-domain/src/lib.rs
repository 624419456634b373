pub mod booking;
pub mod movie;
pub mod repository;
pub mod user;

pub use booking::Booking;
pub use movie::Movie;
pub use repository::{BookingRepository, MovieRepository, UserRepository};
pub use user::User;
