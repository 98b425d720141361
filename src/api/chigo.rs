use serde::de::IgnoredAny;

use crate::{
    config::Config,
    models::{
        Created, Credentials, Id, LoginResponse, Place, PlaceDraft, Post, PostPatch, Rankings,
        User, UserCount, UserResponse,
    },
};

use super::{AdminApi, AdminClient, ApiError};

/// Typed client of the Chi-go REST API
#[derive(Debug, Clone)]
pub struct ChigoClient {
    inner: AdminClient,
}

impl ChigoClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        Ok(Self {
            inner: AdminClient::new(config)?,
        })
    }

    pub fn inner(&self) -> &AdminClient {
        &self.inner
    }

    // acknowledgement bodies carry nothing the screens use
    async fn delete(&self, path: String) -> Result<(), ApiError> {
        let _: IgnoredAny = self.inner.delete(&path).await?;
        Ok(())
    }
}

impl AdminApi for ChigoClient {
    async fn list_places(&self) -> Result<Vec<Place>, ApiError> {
        self.inner.get("/api/places").await
    }

    async fn create_place(&self, draft: &PlaceDraft) -> Result<Created, ApiError> {
        self.inner.post("/api/places", draft).await
    }

    async fn update_place(&self, place: &Place) -> Result<(), ApiError> {
        let path = format!("/api/places/{}", place.id);
        let _: IgnoredAny = self.inner.put(&path, &place.draft()).await?;
        Ok(())
    }

    async fn delete_place(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(format!("/api/places/{id}")).await
    }

    async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        self.inner.get("/api/posts").await
    }

    async fn update_post(&self, id: &Id, patch: &PostPatch) -> Result<(), ApiError> {
        let path = format!("/api/posts/{id}");
        let _: IgnoredAny = self.inner.put(&path, patch).await?;
        Ok(())
    }

    async fn delete_post(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(format!("/api/posts/{id}")).await
    }

    async fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.inner.get("/api/users").await
    }

    async fn update_user(&self, user: &User) -> Result<UserResponse, ApiError> {
        self.inner.put(&format!("/api/users/{}", user.id), user).await
    }

    async fn delete_user(&self, id: &Id) -> Result<(), ApiError> {
        self.delete(format!("/api/users/{id}")).await
    }

    async fn user_count(&self) -> Result<u64, ApiError> {
        let UserCount { count } = self.inner.get("/api/users/count").await?;
        Ok(count)
    }

    async fn rankings(&self) -> Result<Rankings, ApiError> {
        self.inner.get("/api/places/rankings").await
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.inner.post("/auth/login", credentials).await
    }
}
