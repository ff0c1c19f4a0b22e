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

//! Client library for the AdWords API, version v201710.
//!
//! The library covers the services the shared-set workflows use:
//! `CampaignSharedSetService` and `SharedCriterionService`, each with the
//! selector-based `get` and the bulk `mutate` operation. Clients are
//! resolved from a [service::AdWordsServices] value:
//!
//! ```no_run
//! # use google_ads_adwords::client::CampaignSharedSetService;
//! # use google_ads_adwords::service::AdWordsServices;
//! # use google_ads_auth::credentials::offline::Api;
//! # use google_ads_gax::selector::SelectorBuilder;
//! # use google_ads_gax::session::Session;
//! # tokio_test::block_on(async {
//! let session = Session::from_file("ads.properties", Api::AdWords)?;
//! let services = AdWordsServices::new();
//! let service = services.get::<CampaignSharedSetService>(&session).await?;
//! let page = service
//!     .get(SelectorBuilder::new().fields(["SharedSetId"]).build()?)
//!     .await?;
//! println!("found {} shared sets", page.total_num_entries());
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
