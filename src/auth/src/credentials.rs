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

//! Credential types for authenticating with the Ads services.

pub mod offline;

use crate::Result;
use crate::errors::{self, CredentialsError};
use crate::token::Token;
use http::header::{AUTHORIZATION, HeaderName, HeaderValue};
use std::sync::Arc;

/// The credentials a session authorizes its requests with.
///
/// A facade over an implementation of [dynamic::CredentialsProvider]; cheap
/// to clone and safe to share across tasks.
#[derive(Clone, Debug)]
pub struct Credentials {
    // We use an `Arc` to hold the inner implementation.
    //
    // Credentials may be shared across threads (`Send + Sync`), so an `Rc`
    // will not do. They are also immutable, so `Box` is not needed.
    pub(crate) inner: Arc<dyn dynamic::CredentialsProvider>,
}

impl<T> From<T> for Credentials
where
    T: dynamic::CredentialsProvider + 'static,
{
    fn from(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }
}

impl Credentials {
    /// Asynchronously retrieves a token.
    ///
    /// Returns a [Token][crate::token::Token] for the current credentials.
    /// The underlying implementation refreshes the token as needed.
    pub async fn token(&self) -> Result<Token> {
        self.inner.token().await
    }

    /// Asynchronously constructs the auth headers.
    ///
    /// Different auth tokens are sent via different headers. The
    /// [Credentials] constructs the headers (and header values) that should be
    /// sent with a request.
    pub async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
        self.inner.headers().await
    }
}

/// A module containing the dyn-compatible version of [CredentialsProvider].
pub mod dynamic {
    use super::{HeaderName, HeaderValue, Result, Token};

    /// A dyn-compatible, crate-private version of `CredentialsProvider`.
    #[async_trait::async_trait]
    pub trait CredentialsProvider: std::fmt::Debug + Send + Sync {
        /// Asynchronously retrieves a token.
        async fn token(&self) -> Result<Token>;

        /// Asynchronously constructs the auth headers.
        async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>>;
    }
}

/// Builds the `Authorization: Bearer` header from a token.
pub(crate) fn build_bearer_headers(token: &Token) -> Result<Vec<(HeaderName, HeaderValue)>> {
    let mut value = HeaderValue::from_str(&format!("{} {}", token.token_type, token.token))
        .map_err(errors::non_retryable)?;
    value.set_sensitive(true);
    Ok(vec![(AUTHORIZATION, value)])
}

/// Credentials that carry no authentication information.
///
/// Useful in tests and against local service emulators.
pub mod anonymous {
    use super::*;

    #[derive(Debug)]
    struct AnonymousCredentials;

    /// A builder for anonymous credentials.
    #[derive(Debug, Default)]
    pub struct Builder {}

    impl Builder {
        /// Creates a new builder.
        pub fn new() -> Self {
            Self::default()
        }

        /// Returns a [Credentials] instance.
        pub fn build(self) -> Credentials {
            Credentials {
                inner: Arc::new(AnonymousCredentials),
            }
        }
    }

    #[async_trait::async_trait]
    impl dynamic::CredentialsProvider for AnonymousCredentials {
        async fn token(&self) -> Result<Token> {
            Err(CredentialsError::from_str(
                false,
                "anonymous credentials do not produce tokens",
            ))
        }

        async fn headers(&self) -> Result<Vec<(HeaderName, HeaderValue)>> {
            Ok(Vec::new())
        }
    }
}
