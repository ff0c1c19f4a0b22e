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

//! Per-API sessions: endpoint, credentials, and request headers.

use crate::error::Error;
use google_ads_auth::credentials::Credentials;
use google_ads_auth::credentials::offline::{Api, Builder as CredentialsBuilder};
use google_ads_auth::properties::Properties;
use std::path::Path;
use url::Url;

const ADWORDS_ENDPOINT: &str = "https://adwords.google.com";
const ADMANAGER_ENDPOINT: &str = "https://ads.google.com";

/// The configuration shared by every service client of one API.
///
/// A session carries the endpoint, the credentials, and the header values
/// the services copy into each request: the developer token and customer id
/// for AdWords, the network code and application name for Ad Manager, and the
/// `validateOnly` / `partialFailure` flags. Sessions are cheap to clone and
/// immutable once built.
#[derive(Clone, Debug)]
pub struct Session {
    api: Api,
    endpoint: Url,
    credentials: Credentials,
    developer_token: Option<String>,
    client_customer_id: Option<String>,
    network_code: Option<String>,
    application_name: Option<String>,
    validate_only: bool,
    partial_failure: bool,
}

impl Session {
    /// Starts a builder for the given API.
    pub fn builder(api: Api) -> SessionBuilder {
        SessionBuilder::new(api)
    }

    /// Builds a session from an `ads.properties` file.
    ///
    /// Credentials come from the `<prefix>.clientId` / `clientSecret` /
    /// `refreshToken` keys; the remaining session fields come from the other
    /// `<prefix>.*` keys when present.
    ///
    /// # Errors
    ///
    /// Returns [Error::configuration] when the file cannot be read or a
    /// required key is missing.
    pub fn from_file<P: AsRef<Path>>(path: P, api: Api) -> Result<Self, Error> {
        let properties = Properties::load(path).map_err(Error::configuration)?;
        Self::from_properties(&properties, api)
    }

    /// Builds a session from already-parsed properties.
    pub fn from_properties(properties: &Properties, api: Api) -> Result<Self, Error> {
        let credentials = CredentialsBuilder::from_properties(properties, api)
            .and_then(CredentialsBuilder::build)
            .map_err(Error::configuration)?;
        let key = |suffix: &str| format!("{}.{suffix}", api.prefix());
        let get = |suffix: &str| properties.get(&key(suffix)).map(str::to_string);

        let mut builder = SessionBuilder::new(api).with_credentials(credentials);
        if let Some(endpoint) = get("endpoint") {
            builder = builder.with_endpoint(endpoint);
        }
        if let Some(token) = get("developerToken") {
            builder = builder.with_developer_token(token);
        }
        if let Some(id) = get("clientCustomerId") {
            builder = builder.with_client_customer_id(id);
        }
        if let Some(code) = get("networkCode") {
            builder = builder.with_network_code(code);
        }
        if let Some(name) = get("applicationName") {
            builder = builder.with_application_name(name);
        }
        if let Some(flag) = get("isPartialFailure") {
            builder = builder.with_partial_failure(flag == "true");
        }
        builder.build()
    }

    /// The API this session is for.
    pub fn api(&self) -> Api {
        self.api
    }

    /// The base endpoint of the API.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The credentials used to authorize requests.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The AdWords developer token, if set.
    pub fn developer_token(&self) -> Option<&str> {
        self.developer_token.as_deref()
    }

    /// The AdWords client customer id, if set.
    pub fn client_customer_id(&self) -> Option<&str> {
        self.client_customer_id.as_deref()
    }

    /// The Ad Manager network code, if set.
    pub fn network_code(&self) -> Option<&str> {
        self.network_code.as_deref()
    }

    /// The Ad Manager application name, if set.
    pub fn application_name(&self) -> Option<&str> {
        self.application_name.as_deref()
    }

    /// Whether requests validate without applying changes.
    pub fn validate_only(&self) -> bool {
        self.validate_only
    }

    /// Whether bulk mutations apply valid operations despite invalid ones.
    pub fn partial_failure(&self) -> bool {
        self.partial_failure
    }
}

/// A builder for [Session].
///
/// # Example
/// ```
/// # use google_ads_gax::session::Session;
/// # use google_ads_auth::credentials::offline::Api;
/// let credentials = google_ads_auth::credentials::anonymous::Builder::new().build();
/// let session = Session::builder(Api::AdWords)
///     .with_credentials(credentials)
///     .with_developer_token("INSERT_DEVELOPER_TOKEN")
///     .with_client_customer_id("123-456-7890")
///     .build()?;
/// assert_eq!(session.endpoint().as_str(), "https://adwords.google.com/");
/// # Ok::<(), google_ads_gax::error::Error>(())
/// ```
pub struct SessionBuilder {
    api: Api,
    endpoint: Option<String>,
    credentials: Option<Credentials>,
    developer_token: Option<String>,
    client_customer_id: Option<String>,
    network_code: Option<String>,
    application_name: Option<String>,
    validate_only: bool,
    partial_failure: bool,
}

impl SessionBuilder {
    /// Creates a builder with the API's default endpoint.
    pub fn new(api: Api) -> Self {
        Self {
            api,
            endpoint: None,
            credentials: None,
            developer_token: None,
            client_customer_id: None,
            network_code: None,
            application_name: None,
            validate_only: false,
            partial_failure: false,
        }
    }

    /// Overrides the default endpoint.
    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the credentials used to authorize requests.
    pub fn with_credentials<C: Into<Credentials>>(mut self, credentials: C) -> Self {
        self.credentials = Some(credentials.into());
        self
    }

    /// Sets the AdWords developer token.
    pub fn with_developer_token<S: Into<String>>(mut self, token: S) -> Self {
        self.developer_token = Some(token.into());
        self
    }

    /// Sets the AdWords client customer id.
    pub fn with_client_customer_id<S: Into<String>>(mut self, id: S) -> Self {
        self.client_customer_id = Some(id.into());
        self
    }

    /// Sets the Ad Manager network code.
    pub fn with_network_code<S: Into<String>>(mut self, code: S) -> Self {
        self.network_code = Some(code.into());
        self
    }

    /// Sets the Ad Manager application name.
    pub fn with_application_name<S: Into<String>>(mut self, name: S) -> Self {
        self.application_name = Some(name.into());
        self
    }

    /// Requests validation without applying changes.
    pub fn with_validate_only(mut self, validate_only: bool) -> Self {
        self.validate_only = validate_only;
        self
    }

    /// Lets bulk mutations apply valid operations despite invalid ones.
    pub fn with_partial_failure(mut self, partial_failure: bool) -> Self {
        self.partial_failure = partial_failure;
        self
    }

    /// Builds the session.
    ///
    /// # Errors
    ///
    /// Returns [Error::configuration] when no credentials were provided or
    /// the endpoint is not a valid `http` or `https` URL.
    pub fn build(self) -> Result<Session, Error> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::configuration("a session requires credentials"))?;
        let default_endpoint = match self.api {
            Api::AdWords => ADWORDS_ENDPOINT,
            Api::AdManager => ADMANAGER_ENDPOINT,
        };
        let endpoint = self.endpoint.as_deref().unwrap_or(default_endpoint);
        let endpoint = Url::parse(endpoint)
            .map_err(|e| Error::configuration(format!("invalid endpoint {endpoint}: {e}")))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(Error::configuration(format!(
                "the endpoint scheme must be http or https, got {}",
                endpoint.scheme()
            )));
        }
        Ok(Session {
            api: self.api,
            endpoint,
            credentials,
            developer_token: self.developer_token,
            client_customer_id: self.client_customer_id,
            network_code: self.network_code,
            application_name: self.application_name,
            validate_only: self.validate_only,
            partial_failure: self.partial_failure,
        })
    }
}
