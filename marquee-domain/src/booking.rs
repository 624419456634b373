use serde::{Deserialize, Serialize};

/// A confirmed seat booking. The id is assigned by the store on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: i32,
    pub user_id: i32,
    pub movie_title: String,
    pub seats: i32,
}
