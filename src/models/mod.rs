pub mod analytics;
pub mod auth;
pub mod place;
pub mod post;
pub mod user;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub use analytics::{RankingEntry, Rankings, UserCount};
pub use auth::{Credentials, LoginResponse};
pub use place::{Created, Place, PlaceDraft, PlaceField, PlaceType};
pub use post::{Post, PostPatch};
pub use user::{User, UserField, UserResponse};

/// Record identifier as handed out by the API.
///
/// The backend mixes numeric ids and UUID strings, so both are accepted and
/// kept in their textual form.
#[derive(Serialize, Debug, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(number) => Self(number.to_string()),
            Raw::Text(text) => Self(text),
        })
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<u64> for Id {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}
