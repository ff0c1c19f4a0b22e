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

//! Traits to mock the AdWords service clients.
//!
//! Application code never uses these traits directly; they exist so tests
//! can substitute the transport behind [client][crate::client] wrappers,
//! typically with a [mockall](https://docs.rs/mockall) mock passed to the
//! client's `from_stub`.

use crate::model::{CampaignSharedSet, SharedCriterion};
use google_ads_gax::Result;
use google_ads_gax::operation::{BulkReturn, Operation};
use google_ads_gax::page::Page;
use google_ads_gax::selector::Selector;

/// The operations of the campaign shared set service.
#[async_trait::async_trait]
pub trait CampaignSharedSetService: std::fmt::Debug + Send + Sync {
    /// Returns one page of campaign shared sets matching the selector.
    async fn get(&self, selector: Selector) -> Result<Page<CampaignSharedSet>>;

    /// Applies a batch of operations and returns the aligned results.
    async fn mutate(
        &self,
        operations: Vec<Operation<CampaignSharedSet>>,
    ) -> Result<BulkReturn<CampaignSharedSet>>;
}

/// The operations of the shared criterion service.
#[async_trait::async_trait]
pub trait SharedCriterionService: std::fmt::Debug + Send + Sync {
    /// Returns one page of shared criteria matching the selector.
    async fn get(&self, selector: Selector) -> Result<Page<SharedCriterion>>;

    /// Applies a batch of operations and returns the aligned results.
    async fn mutate(
        &self,
        operations: Vec<Operation<SharedCriterion>>,
    ) -> Result<BulkReturn<SharedCriterion>>;
}
