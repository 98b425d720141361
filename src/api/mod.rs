pub mod chigo;

use std::future::Future;

use log::{debug, log_enabled, trace};
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use url::Url;

use crate::{
    config::Config,
    models::{
        Created, Credentials, Id, LoginResponse, Place, PlaceDraft, Post, PostPatch, Rankings,
        User, UserResponse,
    },
};

pub use chigo::ChigoClient;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error(transparent)]
    Request(#[from] reqwest_middleware::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },
}

/// Every endpoint the admin screens talk to.
pub trait AdminApi {
    fn list_places(&self) -> impl Future<Output = Result<Vec<Place>, ApiError>> + Send;
    fn create_place(
        &self,
        draft: &PlaceDraft,
    ) -> impl Future<Output = Result<Created, ApiError>> + Send;
    fn update_place(&self, place: &Place) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn delete_place(&self, id: &Id) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn list_posts(&self) -> impl Future<Output = Result<Vec<Post>, ApiError>> + Send;
    fn update_post(
        &self,
        id: &Id,
        patch: &PostPatch,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
    fn delete_post(&self, id: &Id) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn list_users(&self) -> impl Future<Output = Result<Vec<User>, ApiError>> + Send;
    fn update_user(
        &self,
        user: &User,
    ) -> impl Future<Output = Result<UserResponse, ApiError>> + Send;
    fn delete_user(&self, id: &Id) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn user_count(&self) -> impl Future<Output = Result<u64, ApiError>> + Send;
    fn rankings(&self) -> impl Future<Output = Result<Rankings, ApiError>> + Send;

    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;
}

//==============================================================================
// HTTP plumbing
//==============================================================================
#[derive(Debug, Clone)]
pub struct AdminClient {
    base: Url,
    client: ClientWithMiddleware,
}

impl AdminClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let base = sanitize_base_url(config.api())?;

        let mut client = Client::builder();
        if let Some(timeout) = config.timeout() {
            client = client.timeout(timeout);
        }

        let mut client = ClientBuilder::new(client.build()?);
        if config.retries() > 0 {
            let retry_policy =
                ExponentialBackoff::builder().build_with_max_retries(config.retries());
            client = client.with(RetryTransientMiddleware::new_with_policy(retry_policy));
        }

        Ok(Self {
            base,
            client: client.build(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, url: Url) -> Result<T, ApiError> {
        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;

        if log_enabled!(log::Level::Trace) {
            trace!("{}", body);
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        debug!("GET {}", url);
        self.send(self.client.get(url.clone()), url).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("POST {}", url);
        self.send(self.client.post(url.clone()).json(body), url).await
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!("PUT {}", url);
        self.send(self.client.put(url.clone()).json(body), url).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        debug!("DELETE {}", url);
        self.send(self.client.delete(url.clone()), url).await
    }
}

/// Accepts `host:port` as well as full URLs; the result always ends with `/`
/// so endpoint paths join below any prefix.
fn sanitize_base_url(base: &str) -> Result<Url, ApiError> {
    let mut base = base.trim().to_string();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        base = format!("http://{base}");
    }
    if !base.ends_with('/') {
        base.push('/');
    }
    Ok(Url::parse(&base)?)
}
