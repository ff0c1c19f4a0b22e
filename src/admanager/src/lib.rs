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

//! Client library for the Ad Manager (DFP) API, version v201705.
//!
//! The library covers `PlacementService`: statement-based retrieval with
//! [client::PlacementService::get_placements_by_statement] and full-object
//! updates with [client::PlacementService::update_placements]. Clients are
//! resolved from an [service::AdManagerServices] value:
//!
//! ```no_run
//! # use google_ads_admanager::client::PlacementService;
//! # use google_ads_admanager::service::AdManagerServices;
//! # use google_ads_auth::credentials::offline::Api;
//! # use google_ads_gax::statement::StatementBuilder;
//! # use google_ads_gax::session::Session;
//! # tokio_test::block_on(async {
//! let session = Session::from_file("ads.properties", Api::AdManager)?;
//! let services = AdManagerServices::new();
//! let service = services.get::<PlacementService>(&session).await?;
//! let page = service
//!     .get_placements_by_statement(StatementBuilder::new().build()?)
//!     .await?;
//! println!("found {} placements", page.total_num_entries());
//! # Ok::<(), google_ads_gax::error::Error>(())
//! # });
//! ```

pub use google_ads_gax::Result;
pub use google_ads_gax::error::Error;

pub mod client;
pub mod model;
pub mod service;
pub mod stub;
pub mod transport;
