//! HTTP posts gateway using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use url::Url;

use postboard_core::FetchError;
use postboard_core::domain::{Post, PostId};
use postboard_core::ports::PostsApi;

/// HTTP gateway configuration.
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL the `posts` resource lives under.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Posts gateway talking JSON over HTTP.
///
/// No retries: a failed call is reported once and the caller decides
/// whether to issue it again.
#[derive(Debug, Clone)]
pub struct HttpPostsApi {
    client: Client,
    base: Url,
}

impl HttpPostsApi {
    pub fn new(config: &HttpApiConfig) -> Result<Self, FetchError> {
        let mut base = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(config.base_url.clone()));
        }
        // Joining relative paths needs a trailing slash on the base.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        tracing::info!(base_url = %base, "HTTP posts gateway configured");
        Ok(Self { client, base })
    }

    pub fn user_agent() -> &'static str {
        concat!("postboard/", env!("CARGO_PKG_VERSION"))
    }

    fn posts_url(&self) -> Result<Url, FetchError> {
        self.base
            .join("posts")
            .map_err(|e| FetchError::InvalidUrl(e.to_string()))
    }

    fn post_url(&self, id: &PostId) -> Result<Url, FetchError> {
        let mut url = self.posts_url()?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
            .push(id.as_str());
        Ok(url)
    }

    async fn handle<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, FetchError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes).into_owned();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }
        serde_json::from_slice(&bytes).map_err(|e| FetchError::Decode(e.to_string()))
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Self::handle(resp).await
    }
}

#[async_trait]
impl PostsApi for HttpPostsApi {
    async fn fetch_all(&self) -> Result<Vec<Post>, FetchError> {
        self.get(self.posts_url()?).await
    }

    async fn fetch_one(&self, id: &PostId) -> Result<Post, FetchError> {
        match self.get(self.post_url(id)?).await {
            Err(FetchError::Status { status: 404, .. }) => Err(FetchError::NotFound(id.clone())),
            other => other,
        }
    }

    async fn create(&self, post: &Post) -> Result<Post, FetchError> {
        let url = self.posts_url()?;
        tracing::debug!(%url, post_id = %post.id, "POST");

        let resp = self
            .client
            .post(url)
            .json(post)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        Self::handle(resp).await
    }
}
