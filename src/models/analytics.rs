use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default)]
pub struct UserCount {
    pub count: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RankingEntry {
    pub name: String,
    pub user_count: u64,
}

/// Popularity rankings, already ordered by the server
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Rankings {
    #[serde(default)]
    pub attractions: Vec<RankingEntry>,
    #[serde(default)]
    pub restaurants: Vec<RankingEntry>,
}
