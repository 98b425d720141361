use clap::Subcommand;

use crate::{
    models::{Id, PlaceDraft, PlaceType},
    session::Route,
};

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage users
    Users {
        /// Delete these users
        #[arg(long, num_args = 1..)]
        delete: Vec<String>,
    },
    /// Posts grouped by user
    Posts {
        /// Only show users matching this text
        #[arg(long)]
        user: Option<String>,
        /// Delete these posts
        #[arg(long, num_args = 1..)]
        delete: Vec<String>,
    },
    /// Attractions and restaurants
    Places {
        /// Search by type, name, address or code
        #[arg(short, long)]
        search: Option<String>,
        /// Delete these places
        #[arg(long, num_args = 1..)]
        delete: Vec<String>,
    },
    /// Add an attraction or restaurant
    AddPlace {
        #[arg(long = "type", value_enum, default_value_t = PlaceType::Attraction)]
        kind: PlaceType,
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        /// Google Place ID
        #[arg(long)]
        code: String,
    },
    /// User count and popularity rankings
    Analytics,
    /// Interactive admin shell
    Shell,
}

impl Command {
    pub const fn route(&self) -> Route {
        match self {
            Self::Users { .. } => Route::Users,
            Self::Posts { .. } => Route::Posts,
            Self::Places { .. } => Route::Places,
            Self::AddPlace { .. } => Route::AddPlace,
            Self::Analytics => Route::Analytics,
            Self::Shell => Route::Login,
        }
    }

    /// Text to filter the mounted screen with
    pub fn query(&self) -> Option<&str> {
        match self {
            Self::Posts { user, .. } => user.as_deref(),
            Self::Places { search, .. } => search.as_deref(),
            _ => None,
        }
    }

    pub fn deletions(&self) -> Vec<Id> {
        match self {
            Self::Users { delete } | Self::Posts { delete, .. } | Self::Places { delete, .. } => {
                delete.iter().map(|id| Id::from(id.as_str())).collect()
            }
            _ => vec![],
        }
    }

    pub fn draft(&self) -> Option<PlaceDraft> {
        match self {
            Self::AddPlace {
                kind,
                name,
                address,
                code,
            } => Some(PlaceDraft {
                kind: *kind,
                name: name.clone(),
                address: address.clone(),
                code: code.clone(),
            }),
            _ => None,
        }
    }
}
