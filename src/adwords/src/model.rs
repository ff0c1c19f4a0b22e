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

//! The AdWords entities the shared-set services exchange.
//!
//! This is a hand-written model of the handful of types the workflows touch,
//! not a rendering of the full WSDL surface. Enum-like service fields keep an
//! `Other` arm so a response carrying a tag this version does not know still
//! deserializes.

/// The type of a shared set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SharedSetType {
    #[default]
    NegativeKeywords,
    NegativePlacements,
    /// A type tag this library version does not know.
    Other(String),
}

impl SharedSetType {
    /// The wire name of the type.
    pub fn as_str(&self) -> &str {
        match self {
            SharedSetType::NegativeKeywords => "NEGATIVE_KEYWORDS",
            SharedSetType::NegativePlacements => "NEGATIVE_PLACEMENTS",
            SharedSetType::Other(tag) => tag,
        }
    }
}

impl From<&str> for SharedSetType {
    fn from(value: &str) -> Self {
        match value {
            "NEGATIVE_KEYWORDS" => SharedSetType::NegativeKeywords,
            "NEGATIVE_PLACEMENTS" => SharedSetType::NegativePlacements,
            other => SharedSetType::Other(other.to_string()),
        }
    }
}

/// The association between a campaign and a shared set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CampaignSharedSet {
    pub shared_set_id: i64,
    pub campaign_id: i64,
    pub shared_set_name: String,
    pub shared_set_type: SharedSetType,
}

impl CampaignSharedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of `shared_set_id`.
    pub fn set_shared_set_id(mut self, v: i64) -> Self {
        self.shared_set_id = v;
        self
    }

    /// Sets the value of `campaign_id`.
    pub fn set_campaign_id(mut self, v: i64) -> Self {
        self.campaign_id = v;
        self
    }

    /// Sets the value of `shared_set_name`.
    pub fn set_shared_set_name<S: Into<String>>(mut self, v: S) -> Self {
        self.shared_set_name = v.into();
        self
    }

    /// Sets the value of `shared_set_type`.
    pub fn set_shared_set_type(mut self, v: SharedSetType) -> Self {
        self.shared_set_type = v;
        self
    }
}

/// A criterion inside a shared set.
///
/// The services model criteria as an open polymorphic hierarchy; the
/// workflows only look inside keywords and placements, so everything else
/// parses into [Criterion::Other] with its type tag preserved.
#[derive(Clone, Debug, PartialEq)]
pub enum Criterion {
    Keyword {
        id: i64,
        text: String,
        match_type: String,
    },
    Placement {
        id: i64,
        url: String,
    },
    Other {
        id: i64,
        criterion_type: String,
    },
}

impl Criterion {
    /// The criterion id, whatever the concrete type.
    pub fn id(&self) -> i64 {
        match self {
            Criterion::Keyword { id, .. } => *id,
            Criterion::Placement { id, .. } => *id,
            Criterion::Other { id, .. } => *id,
        }
    }

    /// A criterion carrying only its id, as used in REMOVE operands.
    pub fn by_id(id: i64) -> Self {
        Criterion::Other {
            id,
            criterion_type: String::new(),
        }
    }

    /// The wire type tag.
    pub fn type_tag(&self) -> &str {
        match self {
            Criterion::Keyword { .. } => "Keyword",
            Criterion::Placement { .. } => "Placement",
            Criterion::Other { criterion_type, .. } => criterion_type,
        }
    }
}

/// The membership of one criterion in one shared set.
#[derive(Clone, Debug, PartialEq)]
pub struct SharedCriterion {
    pub shared_set_id: i64,
    pub criterion: Criterion,
}

impl SharedCriterion {
    pub fn new(shared_set_id: i64, criterion: Criterion) -> Self {
        Self {
            shared_set_id,
            criterion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("NEGATIVE_KEYWORDS", SharedSetType::NegativeKeywords)]
    #[test_case("NEGATIVE_PLACEMENTS", SharedSetType::NegativePlacements)]
    #[test_case("FUTURE_TYPE", SharedSetType::Other("FUTURE_TYPE".to_string()))]
    fn shared_set_type_round_trip(tag: &str, want: SharedSetType) {
        let parsed = SharedSetType::from(tag);
        assert_eq!(parsed, want);
        assert_eq!(parsed.as_str(), tag);
    }

    #[test]
    fn criterion_id_across_variants() {
        assert_eq!(
            Criterion::Keyword {
                id: 1,
                text: "mars cruise".into(),
                match_type: "BROAD".into()
            }
            .id(),
            1
        );
        assert_eq!(
            Criterion::Placement {
                id: 2,
                url: "www.example.com".into()
            }
            .id(),
            2
        );
        assert_eq!(Criterion::by_id(3).id(), 3);
    }

    #[test]
    fn builder_chain() {
        let set = CampaignSharedSet::new()
            .set_campaign_id(11)
            .set_shared_set_id(22)
            .set_shared_set_name("negative placements list")
            .set_shared_set_type(SharedSetType::NegativePlacements);
        assert_eq!(set.campaign_id, 11);
        assert_eq!(set.shared_set_id, 22);
        assert_eq!(set.shared_set_type.as_str(), "NEGATIVE_PLACEMENTS");
    }
}
