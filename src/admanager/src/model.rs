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

//! The Ad Manager entities the placement workflows exchange.

/// The serving status of a [Placement].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PlacementStatus {
    #[default]
    Active,
    Inactive,
    Archived,
    /// A status tag this library version does not know.
    Other(String),
}

impl PlacementStatus {
    /// The wire name of the status.
    pub fn as_str(&self) -> &str {
        match self {
            PlacementStatus::Active => "ACTIVE",
            PlacementStatus::Inactive => "INACTIVE",
            PlacementStatus::Archived => "ARCHIVED",
            PlacementStatus::Other(tag) => tag,
        }
    }
}

impl From<&str> for PlacementStatus {
    fn from(value: &str) -> Self {
        match value {
            "ACTIVE" => PlacementStatus::Active,
            "INACTIVE" => PlacementStatus::Inactive,
            "ARCHIVED" => PlacementStatus::Archived,
            other => PlacementStatus::Other(other.to_string()),
        }
    }
}

/// A named collection of ad units.
///
/// Updates are whole-object: `update_placements` sends the placement as it
/// should look after the call, so workflows read, modify, and write back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Placement {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub status: PlacementStatus,
    pub targeted_ad_unit_ids: Vec<String>,
}

impl Placement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `id`.
    pub fn set_id(mut self, v: i64) -> Self {
        self.id = v;
        self
    }

    /// Sets the value of `name`.
    pub fn set_name<S: Into<String>>(mut self, v: S) -> Self {
        self.name = v.into();
        self
    }

    /// Sets the value of `description`.
    pub fn set_description<S: Into<String>>(mut self, v: S) -> Self {
        self.description = v.into();
        self
    }

    /// Sets the value of `status`.
    pub fn set_status(mut self, v: PlacementStatus) -> Self {
        self.status = v;
        self
    }

    /// Sets the value of `targeted_ad_unit_ids`.
    pub fn set_targeted_ad_unit_ids<I, S>(mut self, v: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targeted_ad_unit_ids = v.into_iter().map(|s| s.into()).collect();
        self
    }
}
