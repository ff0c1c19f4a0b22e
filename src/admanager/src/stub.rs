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

//! Traits to mock the Ad Manager service clients.

use crate::model::Placement;
use google_ads_gax::Result;
use google_ads_gax::page::Page;
use google_ads_gax::statement::Statement;

/// The operations of the placement service.
#[async_trait::async_trait]
pub trait PlacementService: std::fmt::Debug + Send + Sync {
    /// Returns one page of placements matching the statement.
    async fn get_placements_by_statement(&self, statement: Statement) -> Result<Page<Placement>>;

    /// Updates the placements and returns them as stored.
    async fn update_placements(&self, placements: Vec<Placement>) -> Result<Vec<Placement>>;
}
