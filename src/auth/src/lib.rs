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

//! Authentication for the Ads API Client Libraries for Rust.
//!
//! The Ads services authenticate with short-lived OAuth2 bearer tokens
//! obtained from a long-lived refresh token. This crate loads the refresh
//! token (and its client id/secret pair) from an `ads.properties` file or
//! from explicit values, exchanges it for access tokens on demand, and caches
//! the result until shortly before it expires.
//!
//! Most applications only touch [credentials::offline::Builder]:
//!
//! ```no_run
//! # use google_ads_auth::credentials::offline::{Api, Builder};
//! # use google_ads_auth::properties::Properties;
//! # tokio_test::block_on(async {
//! let properties = Properties::load("ads.properties")?;
//! let credentials = Builder::from_properties(&properties, Api::AdWords)?.build()?;
//! let token = credentials.token().await?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! # });
//! ```

/// An alias of [std::result::Result] where the error is always
/// [CredentialsError][crate::errors::CredentialsError].
pub type Result<T> = std::result::Result<T, errors::CredentialsError>;

pub mod credentials;
pub mod errors;
pub mod properties;

/// Types and traits to work with auth tokens.
pub mod token;

mod token_cache;
