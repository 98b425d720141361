pub mod add_place;
pub mod analytics;
pub mod places;
pub mod posts;
pub mod users;

use std::fmt;

use clap::ValueEnum;
use thiserror::Error;

use crate::{
    api::AdminApi,
    models::{Id, PlaceDraft, PlaceField, UserField},
    session::Route,
};

pub use add_place::AddPlaceForm;
pub use analytics::AnalyticsScreen;
pub use places::PlacesScreen;
pub use posts::PostsScreen;
pub use users::UsersScreen;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScreenError {
    #[error("nothing is being edited")]
    NotEditing,
    #[error("no record with id {0}")]
    UnknownRecord(Id),
    #[error("no place with id {0}")]
    UnknownPlace(Id),
    #[error("{0}")]
    Invalid(String),
    #[error("`{0}` is not available on this screen")]
    Unsupported(&'static str),
}

/// The screen currently mounted. Dropping it discards its snapshot.
#[derive(Debug)]
pub enum Screen {
    Login,
    Users(UsersScreen),
    Posts(PostsScreen),
    Places(PlacesScreen),
    AddPlace(AddPlaceForm),
    Analytics(AnalyticsScreen),
}

impl Screen {
    /// Builds the screen behind `route` and runs its initial fetch.
    pub async fn mount(route: Route, api: &impl AdminApi) -> Self {
        match route {
            Route::Login => Self::Login,
            Route::Users => {
                let mut screen = UsersScreen::default();
                screen.load(api).await;
                Self::Users(screen)
            }
            Route::Posts => {
                let mut screen = PostsScreen::default();
                screen.load(api).await;
                Self::Posts(screen)
            }
            Route::Places => {
                let mut screen = PlacesScreen::default();
                screen.load(api).await;
                Self::Places(screen)
            }
            Route::AddPlace => Self::AddPlace(AddPlaceForm::default()),
            Route::Analytics => {
                let mut screen = AnalyticsScreen::default();
                screen.load(api).await;
                Self::Analytics(screen)
            }
        }
    }

    pub fn route(&self) -> Route {
        match self {
            Self::Login => Route::Login,
            Self::Users(_) => Route::Users,
            Self::Posts(_) => Route::Posts,
            Self::Places(_) => Route::Places,
            Self::AddPlace(_) => Route::AddPlace,
            Self::Analytics(_) => Route::Analytics,
        }
    }

    pub fn search(&mut self, query: &str) -> Result<(), ScreenError> {
        match self {
            Self::Posts(screen) => screen.search(query),
            Self::Places(screen) => screen.search(query),
            _ => return Err(ScreenError::Unsupported("search")),
        }
        Ok(())
    }

    pub fn edit(&mut self, id: &Id) -> Result<(), ScreenError> {
        match self {
            Self::Users(screen) => screen.edit(id),
            Self::Posts(screen) => screen.edit(id),
            Self::Places(screen) => screen.edit(id),
            _ => Err(ScreenError::Unsupported("edit")),
        }
    }

    /// `field` is parsed against the fields the mounted form has.
    pub fn set(&mut self, field: &str, value: &str) -> Result<(), ScreenError> {
        match self {
            Self::Users(screen) => screen.set(parse_field::<UserField>(field)?, value),
            Self::Places(screen) => screen.set(parse_field::<PlaceField>(field)?, value),
            Self::AddPlace(form) => form.set(parse_field::<PlaceField>(field)?, value),
            Self::Posts(screen) => match field {
                "place" | "place_id" => screen.choose_place(Id::from(value)),
                _ => Err(ScreenError::Invalid(format!(
                    "unknown field `{field}`, expected `place`"
                ))),
            },
            _ => Err(ScreenError::Unsupported("set")),
        }
    }

    pub fn cancel(&mut self) -> Result<(), ScreenError> {
        match self {
            Self::Users(screen) => screen.cancel(),
            Self::Posts(screen) => screen.cancel(),
            Self::Places(screen) => screen.cancel(),
            Self::AddPlace(form) => *form = AddPlaceForm::default(),
            _ => return Err(ScreenError::Unsupported("cancel")),
        }
        Ok(())
    }

    pub async fn save(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        match self {
            Self::Users(screen) => screen.save(api).await,
            Self::Posts(screen) => screen.save(api).await,
            Self::Places(screen) => screen.save(api).await,
            _ => Err(ScreenError::Unsupported("save")),
        }
    }

    pub async fn submit(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        match self {
            Self::AddPlace(form) => form.submit(api).await,
            _ => Err(ScreenError::Unsupported("submit")),
        }
    }

    pub async fn delete(&mut self, api: &impl AdminApi, ids: &[Id]) -> Result<usize, ScreenError> {
        let removed = match (self, ids) {
            (Self::Users(screen), [id]) => usize::from(screen.delete(api, id).await),
            (Self::Posts(screen), [id]) => usize::from(screen.delete(api, id).await),
            (Self::Places(screen), [id]) => usize::from(screen.delete(api, id).await),
            (Self::Users(screen), ids) => screen.delete_all(api, ids).await,
            (Self::Posts(screen), ids) => screen.delete_all(api, ids).await,
            (Self::Places(screen), ids) => screen.delete_all(api, ids).await,
            _ => return Err(ScreenError::Unsupported("delete")),
        };
        Ok(removed)
    }

    /// Pre-fills the add-place form.
    pub fn fill(&mut self, draft: PlaceDraft) -> Result<(), ScreenError> {
        match self {
            Self::AddPlace(form) => *form = AddPlaceForm::with_draft(draft),
            _ => return Err(ScreenError::Unsupported("fill")),
        }
        Ok(())
    }
}

fn parse_field<T: ValueEnum>(field: &str) -> Result<T, ScreenError> {
    T::from_str(field, true).map_err(|_| {
        let expected: Vec<String> = T::value_variants()
            .iter()
            .filter_map(|v| v.to_possible_value())
            .map(|v| v.get_name().to_string())
            .collect();
        ScreenError::Invalid(format!(
            "unknown field `{}`, expected one of: {}",
            field,
            expected.join(", ")
        ))
    })
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Login => writeln!(f, "Please log in: login <username> <password>"),
            Self::Users(screen) => fmt::Display::fmt(screen, f),
            Self::Posts(screen) => fmt::Display::fmt(screen, f),
            Self::Places(screen) => fmt::Display::fmt(screen, f),
            Self::AddPlace(form) => fmt::Display::fmt(form, f),
            Self::Analytics(screen) => fmt::Display::fmt(screen, f),
        }
    }
}
