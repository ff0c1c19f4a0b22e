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

//! The Ad Manager service resolver.

use crate::client;
use crate::transport;
use google_ads_gax::error::Error;
use google_ads_gax::session::Session;
use google_ads_soap::client::SoapClient;
use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// The service tags this API version registers.
const REGISTERED_SERVICES: &[&str] = &["PlacementService"];

/// Implemented by every client type [AdManagerServices] can resolve.
pub trait Service: Sized {
    /// The registry tag of the service.
    const TAG: &'static str;

    /// The transport behind the client.
    type Transport: Send + Sync + 'static;

    /// Builds the transport for a resolved session.
    fn new_transport(client: SoapClient) -> Self::Transport;

    /// Wraps a (possibly cached) transport in the client type.
    fn from_transport(transport: Arc<Self::Transport>) -> Self;
}

/// Resolves service clients for Ad Manager sessions.
///
/// The resolver is the only place transports are constructed. Transports are
/// cached per `(endpoint, service tag)` pair, so resolving the same service
/// for the same endpoint twice shares one transport and its connection pool.
///
/// # Example
/// ```no_run
/// # use google_ads_admanager::client::PlacementService;
/// # use google_ads_admanager::service::AdManagerServices;
/// # use google_ads_auth::credentials::offline::Api;
/// # use google_ads_gax::session::Session;
/// # tokio_test::block_on(async {
/// let session = Session::from_file("ads.properties", Api::AdManager)?;
/// let services = AdManagerServices::new();
/// let service = services.get::<PlacementService>(&session).await?;
/// # Ok::<(), google_ads_gax::error::Error>(())
/// # });
/// ```
#[derive(Debug, Default)]
pub struct AdManagerServices {
    transports: Mutex<HashMap<(String, &'static str), Arc<dyn Any + Send + Sync>>>,
}

impl AdManagerServices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a service client for the session.
    ///
    /// # Errors
    ///
    /// Returns [Error::unknown_service] when the service tag is not in this
    /// version's registry, and an authentication error when the session
    /// credentials cannot produce request headers.
    pub async fn get<S: Service>(&self, session: &Session) -> Result<S, Error> {
        if !REGISTERED_SERVICES.contains(&S::TAG) {
            return Err(Error::unknown_service(S::TAG));
        }
        // Resolving with a dead credential should fail here, not on first use.
        session
            .credentials()
            .headers()
            .await
            .map_err(Error::authentication)?;

        let key = (session.endpoint().to_string(), S::TAG);
        let mut transports = self
            .transports
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(cached) = transports.get(&key) {
            if let Ok(transport) = cached.clone().downcast::<S::Transport>() {
                return Ok(S::from_transport(transport));
            }
        }
        tracing::debug!(tag = S::TAG, endpoint = %session.endpoint(), "binding service transport");
        let transport = Arc::new(S::new_transport(SoapClient::new(session.clone())));
        transports.insert(key, transport.clone());
        Ok(S::from_transport(transport))
    }
}

impl Service for client::PlacementService {
    const TAG: &'static str = "PlacementService";
    type Transport = transport::PlacementService;

    fn new_transport(client: SoapClient) -> Self::Transport {
        transport::PlacementService::new(client)
    }

    fn from_transport(transport: Arc<Self::Transport>) -> Self {
        Self { inner: transport }
    }
}
