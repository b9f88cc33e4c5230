// SPDX-License-Identifier: MPL-2.0

use crate::api::types::{NewComment, NewPost, Post, ReactionKind, User};
use crate::config::{APP_NAME, DEFAULT_ENDPOINT};
use crate::state::AppSettings;
use reqwest::{RequestBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::RwLock;
use std::time::Duration;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("network error: {0}")]
    Network(String),
    /// The server answered but refused the request; carries its message.
    #[error("{0}")]
    Rejected(String),
    #[error("invalid path segment: {0:?}")]
    InvalidPath(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not authenticated")]
    NotAuthenticated,
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::InvalidResponse(e.to_string())
        } else {
            ClientError::Network(e.to_string())
        }
    }
}

/// Every response body is wrapped in `{ status, message, ... }`.
#[derive(Deserialize)]
struct Envelope<T> {
    status: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    data: T,
}

#[derive(Deserialize)]
struct Empty {}

#[derive(Deserialize)]
struct PostData {
    #[serde(default)]
    post: Option<Post>,
}

#[derive(Deserialize)]
struct UsersData {
    #[serde(default)]
    users: Option<Vec<User>>,
}

#[derive(Deserialize)]
struct UserData {
    #[serde(default)]
    user: Option<User>,
}

#[derive(serde::Serialize)]
struct ReactionBody {
    #[serde(rename = "reactionType")]
    reaction_type: ReactionKind,
}

/// HTTP client for the Thinkify server. The bearer token lives in memory only.
pub struct ThinkifyClient {
    http: reqwest::Client,
    endpoint: Url,
    token: RwLock<Option<String>>,
}

impl ThinkifyClient {
    pub fn new() -> Result<Self, ClientError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(endpoint: &str) -> Result<Self, ClientError> {
        Self::build(endpoint, None)
    }

    pub fn from_settings(settings: &AppSettings) -> Result<Self, ClientError> {
        Self::build(
            &settings.endpoint,
            Some(Duration::from_secs(settings.request_timeout_secs)),
        )
    }

    fn build(endpoint: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut endpoint =
            Url::parse(endpoint).map_err(|e| ClientError::InvalidEndpoint(e.to_string()))?;
        // Url::join replaces the last path segment unless the base ends in '/'
        if !endpoint.path().ends_with('/') {
            let path = format!("{}/", endpoint.path());
            endpoint.set_path(&path);
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("thinkify/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        tracing::debug!(app = APP_NAME, %endpoint, "client created");

        Ok(Self {
            http,
            endpoint,
            token: RwLock::new(None),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Append `segments` to the endpoint path. Each segment is
    /// percent-encoded, so ids cannot step outside their collection.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || matches!(**s, "." | ".."))
        {
            return Err(ClientError::InvalidPath(bad.to_string()));
        }
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ClientError> {
        let token = self
            .token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(ClientError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Decode an envelope. Non-2xx statuses and `status: false` bodies both
    /// become [`ClientError::Rejected`] with the server's message when present.
    async fn read_envelope<T: DeserializeOwned>(
        response: Response,
    ) -> Result<Envelope<T>, ClientError> {
        let http_status = response.status();
        let body = response.bytes().await?;

        if !http_status.is_success() {
            let message = serde_json::from_slice::<Envelope<Empty>>(&body)
                .ok()
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("server returned {http_status}"));
            return Err(ClientError::Rejected(message));
        }

        let envelope: Envelope<T> = serde_json::from_slice(&body)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        if !envelope.status {
            return Err(ClientError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "request was not accepted".to_string()),
            ));
        }
        Ok(envelope)
    }

    pub async fn get_post(&self, post_id: &str) -> Result<Post, ClientError> {
        let url = self.url(&["posts", post_id])?;
        tracing::debug!(%url, "fetching post");

        let response = self.http.get(url).send().await?;
        Self::read_envelope::<PostData>(response)
            .await?
            .data
            .post
            .ok_or_else(|| ClientError::InvalidResponse("missing post".into()))
    }

    /// The user directory used for mention suggestions and resolution.
    pub async fn mention_candidates(&self) -> Result<Vec<User>, ClientError> {
        let url = self.url(&["users", "search", "mention"])?;
        tracing::debug!(%url, "fetching mention candidates");

        let response = self.authorized(self.http.get(url))?.send().await?;
        Ok(Self::read_envelope::<UsersData>(response)
            .await?
            .data
            .users
            .unwrap_or_default())
    }

    pub async fn current_user(&self) -> Result<User, ClientError> {
        let url = self.url(&["users", "profile"])?;
        tracing::debug!(%url, "fetching current user");

        let response = self.authorized(self.http.get(url))?.send().await?;
        Self::read_envelope::<UserData>(response)
            .await?
            .data
            .user
            .ok_or_else(|| ClientError::InvalidResponse("missing user".into()))
    }

    /// Submit a comment and return the server's confirmation message.
    pub async fn submit_comment(
        &self,
        post_id: &str,
        comment: &NewComment,
    ) -> Result<String, ClientError> {
        let url = self.url(&["posts", post_id, "comment"])?;
        tracing::debug!(%url, mentions = comment.mentions.len(), "submitting comment");

        let response = self
            .authorized(self.http.post(url).json(comment))?
            .send()
            .await?;
        let envelope = Self::read_envelope::<Empty>(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    /// Submit a reaction. The caller reconciles local state itself; the
    /// server does not return the new reaction set.
    pub async fn submit_reaction(
        &self,
        post_id: &str,
        kind: ReactionKind,
    ) -> Result<String, ClientError> {
        let url = self.url(&["posts", post_id, "reaction"])?;
        tracing::debug!(%url, %kind, "submitting reaction");

        let response = self
            .authorized(self.http.post(url).json(&ReactionBody {
                reaction_type: kind,
            }))?
            .send()
            .await?;
        let envelope = Self::read_envelope::<Empty>(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<String, ClientError> {
        let url = self.url(&["posts"])?;
        tracing::debug!(%url, "creating post");

        let response = self
            .authorized(self.http.post(url).json(post))?
            .send()
            .await?;
        let envelope = Self::read_envelope::<Empty>(response).await?;
        Ok(envelope.message.unwrap_or_default())
    }
}
