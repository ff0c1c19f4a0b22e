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

use super::ApiFault;
use google_ads_auth::errors::CredentialsError;
use std::error::Error as StdError;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The core error returned by all components of the client library.
///
/// Applications typically just return or log the error. Applications that
/// need to branch on the failure mode can use the predicates
/// ([is_transport()][Error::is_transport], [is_service()][Error::is_service],
/// ...) or query the [fault()][Error::fault] details for service errors. The
/// underlying cause, if any, is available via
/// [source()][std::error::Error::source].
///
/// # Example
/// ```
/// use google_ads_gax::error::Error;
/// fn handle(e: Error) {
///     if let Some(fault) = e.fault() {
///         eprintln!("the service rejected the request: {fault}");
///     } else if e.is_transport() {
///         eprintln!("transport problem: {e}");
///     }
/// }
/// ```
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    source: Option<BoxError>,
}

#[derive(Debug)]
enum ErrorKind {
    /// Missing or malformed session or credential properties.
    Configuration,
    /// A builder refused to produce a query, or a batch was malformed.
    InvalidQuery,
    /// Network, TLS, or envelope-level failure. Never retried by the core.
    Transport,
    /// A well-formed SOAP fault reporting a business-logic rejection.
    Service(Box<ApiFault>),
    /// The service resolver could not bind a service tag.
    UnknownService(String),
    /// The session credential could not be refreshed.
    Authentication,
    /// The request could not be serialized.
    Serialization,
    /// The response could not be deserialized.
    Deserialization,
    /// The request could not complete before its deadline.
    Timeout,
}

impl Error {
    /// Creates an error for missing or malformed session properties.
    pub fn configuration<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            source: Some(source.into()),
        }
    }

    /// The session properties are missing or malformed.
    pub fn is_configuration(&self) -> bool {
        matches!(self.kind, ErrorKind::Configuration)
    }

    /// Creates an error for a query the builder refuses to produce.
    pub fn invalid_query<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::InvalidQuery,
            source: Some(source.into()),
        }
    }

    /// A builder rejected the query, or an operation batch was malformed.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self.kind, ErrorKind::InvalidQuery)
    }

    /// Creates an error for a network or envelope-level failure.
    pub fn transport<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Transport,
            source: Some(source.into()),
        }
    }

    /// The request failed before a well-formed response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport)
    }

    /// Creates an error with the fault information returned by a service.
    ///
    /// # Example
    /// ```
    /// use google_ads_gax::error::{ApiFault, Error};
    /// let fault = ApiFault::new("soap:Server", "[QuotaCheckError.INVALID_TOKEN_HEADER]");
    /// let error = Error::service(fault.clone());
    /// assert_eq!(error.fault(), Some(&fault));
    /// ```
    pub fn service(fault: ApiFault) -> Self {
        Self {
            kind: ErrorKind::Service(Box::new(fault)),
            source: None,
        }
    }

    /// The service returned a well-formed SOAP fault.
    pub fn is_service(&self) -> bool {
        matches!(self.kind, ErrorKind::Service(_))
    }

    /// The parsed SOAP fault, if the service returned one.
    pub fn fault(&self) -> Option<&ApiFault> {
        match &self.kind {
            ErrorKind::Service(f) => Some(f),
            _ => None,
        }
    }

    /// Creates an error for a service tag the resolver does not know.
    pub fn unknown_service<T: Into<String>>(tag: T) -> Self {
        Self {
            kind: ErrorKind::UnknownService(tag.into()),
            source: None,
        }
    }

    /// The service resolver could not bind the requested service tag.
    pub fn is_unknown_service(&self) -> bool {
        matches!(self.kind, ErrorKind::UnknownService(_))
    }

    /// Creates an error for a credential that could not be refreshed.
    pub fn authentication(source: CredentialsError) -> Self {
        Self {
            kind: ErrorKind::Authentication,
            source: Some(source.into()),
        }
    }

    /// The session credential could not produce an authorization header.
    pub fn is_authentication(&self) -> bool {
        matches!(self.kind, ErrorKind::Authentication)
    }

    /// Creates an error for a request that could not be serialized.
    pub fn ser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Serialization,
            source: Some(source.into()),
        }
    }

    /// The request could not be serialized.
    pub fn is_serialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Serialization)
    }

    /// Creates an error for a response that could not be deserialized.
    pub fn deser<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Deserialization,
            source: Some(source.into()),
        }
    }

    /// The response could not be deserialized.
    pub fn is_deserialization(&self) -> bool {
        matches!(self.kind, ErrorKind::Deserialization)
    }

    /// Creates an error for a request that ran past its deadline.
    pub fn timeout<T: Into<BoxError>>(source: T) -> Self {
        Self {
            kind: ErrorKind::Timeout,
            source: Some(source.into()),
        }
    }

    /// The request could not be completed before its deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self.kind, ErrorKind::Timeout)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::Configuration => {
                write!(f, "cannot create a session from the supplied properties")
            }
            ErrorKind::InvalidQuery => write!(f, "cannot build the query or operation batch"),
            ErrorKind::Transport => write!(f, "the request failed in the transport"),
            ErrorKind::Service(fault) => {
                write!(f, "the service rejected the request: {fault}")
            }
            ErrorKind::UnknownService(tag) => {
                write!(f, "no service is registered under the tag {tag}")
            }
            ErrorKind::Authentication => {
                write!(f, "cannot obtain an access token for the session")
            }
            ErrorKind::Serialization => write!(f, "cannot serialize the request"),
            ErrorKind::Deserialization => write!(f, "cannot deserialize the response"),
            ErrorKind::Timeout => write!(f, "the request exceeded its deadline"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}
