use serde::{Deserialize, Serialize};

/// A movie available for booking. The title is the natural key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub title: String,
    pub description: String,
    pub rating: i32,
}
