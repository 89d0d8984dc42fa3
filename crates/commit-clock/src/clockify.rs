// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Clockify REST client
//!
//! A thin [`TimeTracker`] implementation over the Clockify v1 API. Every
//! request carries the `X-Api-Key` header; nothing is retried.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::tracker::{ApiError, NewTimeEntry, TimeEntry, TimeTracker, User, Workspace};

/// Default API base URL
pub const DEFAULT_API_URL: &str = "https://api.clockify.me/api/v1";

const API_KEY_HEADER: &str = "x-api-key";

/// Client for the Clockify v1 REST API
#[derive(Debug, Clone)]
pub struct ClockifyClient {
    http: Client,
    base_url: Url,
}

impl ClockifyClient {
    /// Create a client for `base_url` authenticating with `api_key`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the URL does not parse or the key is
    /// not a valid header value, and `ApiError::Http` if the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, ApiError> {
        // A trailing slash keeps Url::join from dropping the last path segment.
        let base_url = Url::parse(&format!("{}/", base_url.trim_end_matches('/')))
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut key = HeaderValue::from_str(api_key)
            .map_err(|_| ApiError::InvalidUrl("API key is not a valid header value".into()))?;
        key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let http = Client::builder()
            .user_agent(concat!("commit-clock/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, base_url })
    }

    /// The base URL all paths are resolved against
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve an API path such as `workspaces/abc/time-entries`
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let url = self.endpoint(path)?;
        debug!(%method, %url, "Clockify request");
        Ok(self.http.request(method, url))
    }

    async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = Self::send(self.request(Method::GET, path)?).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl TimeTracker for ClockifyClient {
    async fn workspaces(&self) -> Result<Vec<Workspace>, ApiError> {
        self.get_json("workspaces").await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("user").await
    }

    async fn time_entries(
        &self,
        workspace_id: &str,
        user_id: &str,
    ) -> Result<Vec<TimeEntry>, ApiError> {
        self.get_json(&format!(
            "workspaces/{workspace_id}/user/{user_id}/time-entries"
        ))
        .await
    }

    async fn delete_time_entry(&self, workspace_id: &str, entry_id: &str) -> Result<(), ApiError> {
        let path = format!("workspaces/{workspace_id}/time-entries/{entry_id}");
        Self::send(self.request(Method::DELETE, &path)?).await?;
        Ok(())
    }

    async fn create_time_entry(
        &self,
        workspace_id: &str,
        entry: &NewTimeEntry,
    ) -> Result<TimeEntry, ApiError> {
        let path = format!("workspaces/{workspace_id}/time-entries");
        let builder = self.request(Method::POST, &path)?.json(entry);
        let response = Self::send(builder).await?;
        Ok(response.json().await?)
    }
}
