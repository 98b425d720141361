use std::fmt;

use crate::{
    api::AdminApi,
    models::{Id, User, UserField},
    resource::{Record, RemoteList},
};

use super::ScreenError;

impl Record for User {
    const KIND: &'static str = "users";

    fn id(&self) -> &Id {
        &self.id
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str()]
    }
}

#[derive(Debug, Default)]
pub struct UsersScreen {
    users: RemoteList<User>,
}

impl UsersScreen {
    pub async fn load(&mut self, api: &impl AdminApi) -> bool {
        self.users.load(api.list_users()).await
    }

    pub fn edit(&mut self, id: &Id) -> Result<(), ScreenError> {
        self.users.begin_edit(id)?;
        Ok(())
    }

    pub fn set(&mut self, field: UserField, value: &str) -> Result<(), ScreenError> {
        let user = self.users.editing_mut()?;
        let mut patch = user.patch();
        patch.set(field, value);
        user.apply(patch);
        Ok(())
    }

    pub fn cancel(&mut self) {
        self.users.cancel_edit();
    }

    /// Sends the whole edited user; the record echoed by the server wins.
    pub async fn save(&mut self, api: &impl AdminApi) -> Result<bool, ScreenError> {
        let user = self.users.editing().ok_or(ScreenError::NotEditing)?;
        user.patch().validate().map_err(ScreenError::Invalid)?;

        self.users
            .update(|user| async move {
                let result = api.update_user(&user).await;
                result.map(|response| response.user.unwrap_or(user))
            })
            .await
    }

    pub async fn delete(&mut self, api: &impl AdminApi, id: &Id) -> bool {
        self.users.remove(id, api.delete_user(id)).await
    }

    pub async fn delete_all(&mut self, api: &impl AdminApi, ids: &[Id]) -> usize {
        self.users.remove_all(ids, |id| api.delete_user(id)).await
    }
}

impl fmt::Display for UsersScreen {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Admin · Manage Users")?;
        writeln!(f)?;
        let editing = self.users.editing();
        for user in self.users.snapshot() {
            match editing.filter(|e| e.id == user.id) {
                Some(draft) => {
                    writeln!(f, "* editing [{}]", user.id)?;
                    writeln!(f, "    name:  {}", draft.name)?;
                    writeln!(f, "    email: {}", draft.email)?;
                }
                None => writeln!(f, "  {} <{}>  [{}]", user.name, user.email, user.id)?,
            }
        }
        if self.users.snapshot().is_empty() {
            writeln!(f, "  No users")?;
        }
        Ok(())
    }
}
