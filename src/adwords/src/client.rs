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

//! Clients for the AdWords shared-set services.

use crate::model::{CampaignSharedSet, SharedCriterion};
use crate::stub;
use google_ads_gax::Result;
use google_ads_gax::operation::{BulkReturn, Operation};
use google_ads_gax::page::Page;
use google_ads_gax::selector::Selector;
use std::sync::Arc;

/// Implements the `CampaignSharedSetService` operations.
///
/// Instances are resolved with
/// [AdWordsServices::get][crate::service::AdWordsServices::get]; tests build
/// them directly over a mock with [from_stub][Self::from_stub].
#[derive(Clone, Debug)]
pub struct CampaignSharedSetService {
    pub(crate) inner: Arc<dyn stub::CampaignSharedSetService>,
}

impl CampaignSharedSetService {
    /// Creates a client from a custom stub, usually a mock in tests.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::CampaignSharedSetService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Returns one page of campaign shared sets matching the selector.
    pub async fn get(&self, selector: Selector) -> Result<Page<CampaignSharedSet>> {
        self.inner.get(selector).await
    }

    /// Applies a batch of operations and returns the aligned results.
    pub async fn mutate(
        &self,
        operations: Vec<Operation<CampaignSharedSet>>,
    ) -> Result<BulkReturn<CampaignSharedSet>> {
        self.inner.mutate(operations).await
    }
}

/// Implements the `SharedCriterionService` operations.
#[derive(Clone, Debug)]
pub struct SharedCriterionService {
    pub(crate) inner: Arc<dyn stub::SharedCriterionService>,
}

impl SharedCriterionService {
    /// Creates a client from a custom stub, usually a mock in tests.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::SharedCriterionService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Returns one page of shared criteria matching the selector.
    pub async fn get(&self, selector: Selector) -> Result<Page<SharedCriterion>> {
        self.inner.get(selector).await
    }

    /// Applies a batch of operations and returns the aligned results.
    pub async fn mutate(
        &self,
        operations: Vec<Operation<SharedCriterion>>,
    ) -> Result<BulkReturn<SharedCriterion>> {
        self.inner.mutate(operations).await
    }
}
