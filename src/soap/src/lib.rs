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

//! SOAP transport for the Ads API Client Libraries for Rust.
//!
//! The AdWords and Ad Manager services speak SOAP 1.1 over HTTPS. This crate
//! renders request envelopes, posts them with the session's credentials, and
//! parses responses into a small XML tree ([xml::Element]) the service crates
//! pick apart. SOAP faults become
//! [Error::service][google_ads_gax::error::Error::service] values carrying
//! the parsed [ApiFault][google_ads_gax::error::ApiFault].
//!
//! Application code does not use this crate directly; the service crates
//! wrap it behind their typed stubs.

pub mod client;
pub mod envelope;
pub mod xml;
