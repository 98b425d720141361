use serde::{Deserialize, Serialize};

use super::Id;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Response of `POST /auth/login`
#[derive(Deserialize, Debug, Clone)]
pub struct LoginResponse {
    #[allow(unused)]
    pub id: Id,
    pub username: String,
    #[serde(default)]
    pub role: String,
}
