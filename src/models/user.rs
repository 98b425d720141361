use clap::ValueEnum;
use serde::{Deserialize, Serialize, Serializer};

use super::Id;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Id,
    #[serde(alias = "username")]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl User {
    pub fn patch(&self) -> UserPatch {
        UserPatch {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }

    pub fn apply(&mut self, patch: UserPatch) {
        self.name = patch.name;
        self.email = patch.email;
    }
}

// The backend reads `username`; `name` is kept for servers that echo it.
impl Serialize for User {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Body<'a> {
            id: &'a Id,
            username: &'a str,
            name: &'a str,
            email: &'a str,
        }

        Body {
            id: &self.id,
            username: &self.name,
            name: &self.name,
            email: &self.email,
        }
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum UserField {
    Name,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: String,
    pub email: String,
}

impl UserPatch {
    pub fn set(&mut self, field: UserField, value: &str) {
        let value = value.trim().to_string();
        match field {
            UserField::Name => self.name = value,
            UserField::Email => self.email = value,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("`name` is required".to_string());
        }
        if !self.email.contains('@') {
            return Err(format!("`{}` is not an email address", self.email));
        }
        Ok(())
    }
}

/// Response of `PUT /api/users/{id}`
#[derive(Deserialize, Debug, Clone, Default)]
pub struct UserResponse {
    /// Canonical record, when the server sends one back
    #[serde(default)]
    pub user: Option<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_accepts_username_field() {
        let user: User =
            serde_json::from_str(r#"{"id":"u1","username":"ana","email":"ana@chi.go","role":"admin"}"#)
                .unwrap();
        assert_eq!(user.name, "ana");
    }

    #[test]
    fn update_body_sends_username() {
        let user = User {
            id: Id::from(9),
            name: "Bo".to_string(),
            email: "bo@chi.go".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&user).unwrap(),
            serde_json::json!({"id": "9", "username": "Bo", "name": "Bo", "email": "bo@chi.go"})
        );
    }

    #[test]
    fn patch_validation() {
        let mut patch = UserPatch::default();
        assert!(patch.validate().is_err());

        patch.set(UserField::Name, " Ana ");
        patch.set(UserField::Email, "ana-at-chi.go");
        assert_eq!(patch.name, "Ana");
        assert!(patch.validate().is_err());

        patch.set(UserField::Email, "ana@chi.go");
        assert_eq!(patch.validate(), Ok(()));
    }

    #[test]
    fn response_without_user_is_accepted() {
        let response: UserResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(response.user.is_none());
    }
}
