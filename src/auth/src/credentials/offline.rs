// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Offline (refresh token) credentials.
//!
//! The Ads APIs use the OAuth 2.0 installed-application flow: a human grants
//! access once, the application stores the resulting long-lived refresh
//! token, and every later run exchanges that refresh token for short-lived
//! access tokens without user interaction. Acquiring the initial refresh
//! token (through user consent) is outside the scope of this library.
//!
//! Example usage:
//!
//! ```
//! # use google_ads_auth::credentials::offline::{Api, Builder};
//! # tokio_test::block_on(async {
//! let credentials = Builder::new(
//!     "YOUR_CLIENT_ID.apps.googleusercontent.com",
//!     "YOUR_CLIENT_SECRET",
//!     "YOUR_REFRESH_TOKEN",
//!     Api::AdWords,
//! )
//! .build()?;
//! let token = credentials.token().await?;
//! # Ok::<(), google_ads_auth::errors::CredentialsError>(())
//! # });
//! ```

use crate::Result;
use crate::credentials::dynamic::CredentialsProvider;
use crate::credentials::{Credentials, build_bearer_headers};
use crate::errors::{self, CredentialsError, is_retryable};
use crate::properties::Properties;
use crate::token::{Token, TokenProvider};
use crate::token_cache::TokenCache;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use std::sync::Arc;
use std::time::Duration;

const OAUTH2_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/token";

/// Which Ads API a credential is for.
///
/// The two APIs use distinct OAuth scopes and distinct key prefixes in an
/// `ads.properties` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Api {
    AdWords,
    AdManager,
}

impl Api {
    /// The key prefix used in `ads.properties` files.
    pub fn prefix(&self) -> &'static str {
        match self {
            Api::AdWords => "api.adwords",
            Api::AdManager => "api.admanager",
        }
    }

    /// The OAuth scope of the API.
    pub fn scope(&self) -> &'static str {
        match self {
            Api::AdWords => "https://www.googleapis.com/auth/adwords",
            Api::AdManager => "https://www.googleapis.com/auth/dfp",
        }
    }
}

/// A builder for offline [Credentials] instances.
#[derive(Debug)]
pub struct Builder {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    api: Api,
    scopes: Option<Vec<String>>,
    token_uri: Option<String>,
}

impl Builder {
    /// Creates a new builder from explicit OAuth client details.
    pub fn new<S1, S2, S3>(client_id: S1, client_secret: S2, refresh_token: S3, api: Api) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
            api,
            scopes: None,
            token_uri: None,
        }
    }

    /// Creates a new builder from a loaded `ads.properties` file.
    ///
    /// Reads `<prefix>.clientId`, `<prefix>.clientSecret` and
    /// `<prefix>.refreshToken`, where the prefix is [Api::prefix].
    ///
    /// # Errors
    ///
    /// Returns a [CredentialsError] when any of the three keys is missing.
    pub fn from_properties(properties: &Properties, api: Api) -> Result<Self> {
        let key = |suffix: &str| format!("{}.{suffix}", api.prefix());
        let require = |suffix: &str| {
            properties.get(&key(suffix)).map(str::to_string).ok_or_else(|| {
                errors::non_retryable_from_str(format!("missing property {}", key(suffix)))
            })
        };
        Ok(Self::new(
            require("clientId")?,
            require("clientSecret")?,
            require("refreshToken")?,
            api,
        ))
    }

    /// Sets the URI for the token endpoint used to fetch access tokens.
    ///
    /// Defaults to `https://accounts.google.com/o/oauth2/token`.
    pub fn with_token_uri<S: Into<String>>(mut self, token_uri: S) -> Self {
        self.token_uri = Some(token_uri.into());
        self
    }

    /// Overrides the OAuth scopes requested for the access token.
    ///
    /// Defaults to the scope of the [Api] passed to the constructor.
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = Some(scopes.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Returns a [Credentials] instance with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns a [CredentialsError] when the client id, client secret, or
    /// refresh token is empty.
    pub fn build(self) -> Result<Credentials> {
        for (name, value) in [
            ("client id", &self.client_id),
            ("client secret", &self.client_secret),
            ("refresh token", &self.refresh_token),
        ] {
            if value.is_empty() {
                return Err(errors::non_retryable_from_str(format!(
                    "the {name} must not be empty"
                )));
            }
        }
        let endpoint = self.token_uri.unwrap_or_else(|| OAUTH2_ENDPOINT.to_string());
        let scopes = self
            .scopes
            .map(|scopes| scopes.join(" "))
            .unwrap_or_else(|| self.api.scope().to_string());

        let token_provider = OfflineTokenProvider {
            client_id: self.client_id,
            client_secret: self.client_secret,
            refresh_token: self.refresh_token,
            endpoint,
            scopes,
        };
        let token_provider = TokenCache::new(token_provider);

        Ok(Credentials {
            inner: Arc::new(OfflineCredentials { token_provider }),
        })
    }
}

#[derive(PartialEq)]
struct OfflineTokenProvider {
    client_id: String,
    client_secret: String,
    refresh_token: String,
    endpoint: String,
    scopes: String,
}

impl std::fmt::Debug for OfflineTokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OfflineTokenProvider")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[censored]")
            .field("refresh_token", &"[censored]")
            .field("endpoint", &self.endpoint)
            .field("scopes", &self.scopes)
            .finish()
    }
}

#[async_trait::async_trait]
impl TokenProvider for OfflineTokenProvider {
    async fn token(&self) -> Result<Token> {
        tracing::debug!(endpoint = %self.endpoint, "exchanging refresh token for an access token");
        let client = Client::new();

        let req = Oauth2RefreshRequest {
            grant_type: RefreshGrantType::RefreshToken,
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            refresh_token: self.refresh_token.clone(),
            scope: self.scopes.clone(),
        };
        let header = HeaderValue::from_static("application/json");
        let builder = client
            .request(Method::POST, self.endpoint.as_str())
            .header(CONTENT_TYPE, header)
            .json(&req);
        let resp = builder.send().await.map_err(errors::retryable)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp
                .text()
                .await
                .map_err(|e| CredentialsError::new(is_retryable(status), e))?;
            return Err(CredentialsError::from_str(
                is_retryable(status),
                format!("failed to fetch token: {body}"),
            ));
        }
        let response = resp.json::<Oauth2RefreshResponse>().await.map_err(|e| {
            let retryable = !e.is_decode();
            CredentialsError::new(retryable, e)
        })?;
        Ok(Token {
            token: response.access_token,
            token_type: response.token_type,
            expires_at: response
                .expires_in
                .map(|d| tokio::time::Instant::now() + Duration::from_secs(d)),
        })
    }
}

#[derive(Debug)]
struct OfflineCredentials<T>
where
    T: TokenProvider,
{
    token_provider: T,
}

#[async_trait::async_trait]
impl<T> CredentialsProvider for OfflineCredentials<T>
where
    T: TokenProvider,
{
    async fn token(&self) -> Result<Token> {
        self.token_provider.token().await
    }

    async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        let token = self.token().await?;
        build_bearer_headers(&token)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
enum RefreshGrantType {
    #[serde(rename = "refresh_token")]
    RefreshToken,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Oauth2RefreshRequest {
    grant_type: RefreshGrantType,
    client_id: String,
    client_secret: String,
    refresh_token: String,
    scope: String,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
struct Oauth2RefreshResponse {
    access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_in: Option<u64>,
    token_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<String>,
}
