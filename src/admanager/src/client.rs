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

//! Clients for the Ad Manager placement service.

use crate::model::Placement;
use crate::stub;
use google_ads_gax::Result;
use google_ads_gax::page::Page;
use google_ads_gax::statement::Statement;
use std::sync::Arc;

/// Implements the `PlacementService` operations.
///
/// Instances are resolved with
/// [AdManagerServices::get][crate::service::AdManagerServices::get]; tests
/// build them directly over a mock with [from_stub][Self::from_stub].
#[derive(Clone, Debug)]
pub struct PlacementService {
    pub(crate) inner: Arc<dyn stub::PlacementService>,
}

impl PlacementService {
    /// Creates a client from a custom stub, usually a mock in tests.
    pub fn from_stub<T>(stub: T) -> Self
    where
        T: stub::PlacementService + 'static,
    {
        Self {
            inner: Arc::new(stub),
        }
    }

    /// Returns one page of placements matching the statement.
    pub async fn get_placements_by_statement(
        &self,
        statement: Statement,
    ) -> Result<Page<Placement>> {
        self.inner.get_placements_by_statement(statement).await
    }

    /// Updates the placements and returns them as stored.
    pub async fn update_placements(&self, placements: Vec<Placement>) -> Result<Vec<Placement>> {
        self.inner.update_placements(placements).await
    }
}
