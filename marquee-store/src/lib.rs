pub mod app_config;
pub mod booking_repo;
pub mod database;
pub mod movie_repo;
pub mod user_repo;

pub use booking_repo::StoreBookingRepository;
pub use database::DbClient;
pub use movie_repo::StoreMovieRepository;
pub use user_repo::StoreUserRepository;
