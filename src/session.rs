use std::fmt::Write;

use clap::ValueEnum;
use log::info;

use crate::{
    api::{AdminApi, ApiError},
    models::Credentials,
};

#[derive(Debug, Clone, Copy, Hash, ValueEnum, PartialEq, Eq)]
pub enum Route {
    Login,
    Users,
    Posts,
    Places,
    #[value(name = "add")]
    AddPlace,
    Analytics,
}

impl Route {
    pub const NAV: [Route; 5] = [
        Route::Users,
        Route::Posts,
        Route::Places,
        Route::AddPlace,
        Route::Analytics,
    ];

    pub const fn requires_session(self) -> bool {
        !matches!(self, Self::Login)
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Users => "Manage Users",
            Self::Posts => "User Posts",
            Self::Places => "View Places",
            Self::AddPlace => "Add Place",
            Self::Analytics => "Analytics",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin {
    pub username: String,
    pub role: String,
}

/// Client-side login state. Nothing from it is sent with API requests.
#[derive(Debug, Clone, Default)]
pub struct Session {
    admin: Option<Admin>,
}

impl Session {
    pub fn is_logged_in(&self) -> bool {
        self.admin.is_some()
    }

    pub fn admin(&self) -> Option<&Admin> {
        self.admin.as_ref()
    }

    pub async fn login(
        &mut self,
        api: &impl AdminApi,
        credentials: &Credentials,
    ) -> Result<&Admin, ApiError> {
        let response = api.login(credentials).await?;
        info!("Logged in as {} ({})", response.username, response.role);
        let admin = self.admin.insert(Admin {
            username: response.username,
            role: response.role,
        });
        Ok(&*admin)
    }

    pub fn logout(&mut self) {
        self.admin = None;
    }
}

/// Where a request for `route` actually lands.
pub fn guard(route: Route, session: &Session) -> Route {
    match (route, session.is_logged_in()) {
        (Route::Login, true) => Route::Users,
        (route, false) if route.requires_session() => Route::Login,
        (route, _) => route,
    }
}

/// Title bar and navigation, shown only inside a session.
pub fn header(current: Route, session: &Session) -> Option<String> {
    let admin = session.admin()?;
    let mut header = format!("Chi-go Admin · {} ({})\n", admin.username, admin.role);
    for route in Route::NAV {
        let name = route.to_possible_value()?;
        let marker = if route == current { '>' } else { ' ' };
        let _ = write!(header, "{}{} [{}]  ", marker, route.title(), name.get_name());
    }
    Some(header.trim_end().to_string())
}
