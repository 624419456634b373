use serde::{Deserialize, Serialize};

/// A registered user. Created out-of-band; this service only reads them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
}
