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

//! AdWords-style selectors and their builder.
//!
//! A [Selector] describes a field projection, a set of AND-combined
//! predicates, an optional ordering, and numeric paging. Field names are
//! opaque identifier strings; validating them against a service schema is the
//! service's job, not the builder's.
//!
//! # Example
//! ```
//! # use google_ads_gax::query::Pageable;
//! # use google_ads_gax::selector::{SelectorBuilder, SortOrder};
//! let selector = SelectorBuilder::new()
//!     .fields(["SharedSetId", "CampaignId", "SharedSetName"])
//!     .equals("CampaignId", "123456789")
//!     .is_in("SharedSetType", ["NEGATIVE_KEYWORDS", "NEGATIVE_PLACEMENTS"])
//!     .order_by("SharedSetId", SortOrder::Ascending)
//!     .limit(100)
//!     .build()?;
//! assert_eq!(selector.limit(), 100);
//! # Ok::<(), google_ads_gax::error::Error>(())
//! ```

use crate::error::Error;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pageable};

/// The comparison operator of a [Predicate].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredicateOperator {
    Equals,
    NotEquals,
    In,
    NotIn,
    GreaterThan,
    GreaterThanEquals,
    LessThan,
    LessThanEquals,
    StartsWith,
    Contains,
    Like,
}

impl PredicateOperator {
    /// The wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            PredicateOperator::Equals => "EQUALS",
            PredicateOperator::NotEquals => "NOT_EQUALS",
            PredicateOperator::In => "IN",
            PredicateOperator::NotIn => "NOT_IN",
            PredicateOperator::GreaterThan => "GREATER_THAN",
            PredicateOperator::GreaterThanEquals => "GREATER_THAN_EQUALS",
            PredicateOperator::LessThan => "LESS_THAN",
            PredicateOperator::LessThanEquals => "LESS_THAN_EQUALS",
            PredicateOperator::StartsWith => "STARTS_WITH",
            PredicateOperator::Contains => "CONTAINS",
            PredicateOperator::Like => "LIKE",
        }
    }
}

/// A single filter condition. Predicates always combine with logical AND.
#[derive(Clone, Debug, PartialEq)]
pub struct Predicate {
    field: String,
    operator: PredicateOperator,
    values: Vec<String>,
}

impl Predicate {
    /// The field the condition applies to.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The comparison operator.
    pub fn operator(&self) -> PredicateOperator {
        self.operator
    }

    /// The literal operands. Single-valued except for IN / NOT_IN.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The direction of an [OrderBy].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The wire name of the direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASCENDING",
            SortOrder::Descending => "DESCENDING",
        }
    }
}

/// A sort key. At most one is active per query.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderBy {
    field: String,
    sort_order: SortOrder,
}

impl OrderBy {
    /// The field sorted on.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The sort direction.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }
}

/// An immutable selector produced by [SelectorBuilder::build].
#[derive(Clone, Debug, PartialEq)]
pub struct Selector {
    fields: Vec<String>,
    predicates: Vec<Predicate>,
    ordering: Option<OrderBy>,
    start_index: u32,
    number_results: u32,
}

impl Selector {
    /// The projected fields, in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The filter conditions, in declaration order.
    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    /// The active ordering, if any.
    pub fn ordering(&self) -> Option<&OrderBy> {
        self.ordering.as_ref()
    }
}

impl Pageable for Selector {
    fn offset(&self) -> u32 {
        self.start_index
    }

    fn limit(&self) -> u32 {
        self.number_results
    }

    fn with_offset(&self, offset: u32) -> Self {
        Self {
            start_index: offset,
            ..self.clone()
        }
    }
}

/// A fluent builder for [Selector] values.
///
/// Every method takes and returns the builder by value, so chains read the
/// way the queries they build do. [build()][SelectorBuilder::build] validates
/// the accumulated state and is idempotent: calling it twice on a clone of
/// the same builder produces equal selectors.
#[derive(Clone, Debug, Default)]
pub struct SelectorBuilder {
    fields: Vec<String>,
    predicates: Vec<Predicate>,
    ordering: Option<OrderBy>,
    start_index: u32,
    number_results: u32,
}

impl SelectorBuilder {
    /// Creates a builder with no projection and the default page size.
    pub fn new() -> Self {
        Self {
            number_results: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// Sets the projection, replacing any previous one.
    ///
    /// Duplicate fields are dropped, keeping the first occurrence.
    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.clear();
        for field in fields {
            let field = field.into();
            if !self.fields.contains(&field) {
                self.fields.push(field);
            }
        }
        self
    }

    /// Appends an EQUALS predicate.
    pub fn equals<F, V>(self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: ToString,
    {
        self.predicate(field, PredicateOperator::Equals, [value.to_string()])
    }

    /// Appends an IN predicate over `values`.
    pub fn is_in<F, I, V>(self, field: F, values: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let values = values.into_iter().map(|v| v.to_string());
        self.predicate(field, PredicateOperator::In, values)
    }

    /// Appends a LIKE predicate.
    pub fn like<F, V>(self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: ToString,
    {
        self.predicate(field, PredicateOperator::Like, [value.to_string()])
    }

    /// Appends a GREATER_THAN predicate.
    pub fn greater_than<F, V>(self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: ToString,
    {
        self.predicate(field, PredicateOperator::GreaterThan, [value.to_string()])
    }

    /// Appends a LESS_THAN predicate.
    pub fn less_than<F, V>(self, field: F, value: V) -> Self
    where
        F: Into<String>,
        V: ToString,
    {
        self.predicate(field, PredicateOperator::LessThan, [value.to_string()])
    }

    /// Appends a predicate with an explicit operator.
    pub fn predicate<F, I>(mut self, field: F, operator: PredicateOperator, values: I) -> Self
    where
        F: Into<String>,
        I: IntoIterator<Item = String>,
    {
        self.predicates.push(Predicate {
            field: field.into(),
            operator,
            values: values.into_iter().collect(),
        });
        self
    }

    /// Sets the ordering. A later call replaces an earlier one.
    pub fn order_by<F: Into<String>>(mut self, field: F, sort_order: SortOrder) -> Self {
        self.ordering = Some(OrderBy {
            field: field.into(),
            sort_order,
        });
        self
    }

    /// Sets the page size. Validated at [build()][SelectorBuilder::build].
    pub fn limit(mut self, limit: u32) -> Self {
        self.number_results = limit;
        self
    }

    /// Sets the index of the first entry to return.
    pub fn offset(mut self, offset: u32) -> Self {
        self.start_index = offset;
        self
    }

    /// Validates the accumulated state and returns the immutable selector.
    ///
    /// # Errors
    ///
    /// Returns [Error::invalid_query] when the projection is empty, or when
    /// the limit is zero or exceeds the service page cap of
    /// [MAX_PAGE_SIZE] entries.
    pub fn build(self) -> Result<Selector, Error> {
        if self.fields.is_empty() {
            return Err(Error::invalid_query("a selector requires at least one projected field"));
        }
        if self.number_results == 0 {
            return Err(Error::invalid_query("the selector limit must be positive"));
        }
        if self.number_results > MAX_PAGE_SIZE {
            return Err(Error::invalid_query(format!(
                "the selector limit {} exceeds the service page cap of {MAX_PAGE_SIZE}",
                self.number_results
            )));
        }
        Ok(Selector {
            fields: self.fields,
            predicates: self.predicates,
            ordering: self.ordering,
            start_index: self.start_index,
            number_results: self.number_results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    type Result = anyhow::Result<()>;

    #[test]
    fn full_chain() -> Result {
        let selector = SelectorBuilder::new()
            .fields(["SharedSetId", "Id", "KeywordText"])
            .equals("CampaignId", 123456789_i64)
            .is_in("SharedSetId", [11_i64, 22])
            .order_by("Id", SortOrder::Descending)
            .limit(100)
            .offset(200)
            .build()?;
        assert_eq!(selector.fields(), ["SharedSetId", "Id", "KeywordText"]);
        let p = &selector.predicates()[0];
        assert_eq!((p.field(), p.operator()), ("CampaignId", PredicateOperator::Equals));
        assert_eq!(p.values(), ["123456789"]);
        let p = &selector.predicates()[1];
        assert_eq!(p.operator(), PredicateOperator::In);
        assert_eq!(p.values(), ["11", "22"]);
        let ordering = selector.ordering().unwrap();
        assert_eq!(ordering.field(), "Id");
        assert_eq!(ordering.sort_order(), SortOrder::Descending);
        assert_eq!(selector.offset(), 200);
        assert_eq!(selector.limit(), 100);
        Ok(())
    }

    #[test]
    fn fields_override_and_dedupe() -> Result {
        let selector = SelectorBuilder::new()
            .fields(["A", "B"])
            .fields(["Id", "Name", "Id", "Status", "Name"])
            .build()?;
        assert_eq!(selector.fields(), ["Id", "Name", "Status"]);
        Ok(())
    }

    #[test]
    fn order_by_last_call_wins() -> Result {
        let selector = SelectorBuilder::new()
            .fields(["Id"])
            .order_by("Id", SortOrder::Ascending)
            .order_by("Name", SortOrder::Descending)
            .build()?;
        let ordering = selector.ordering().unwrap();
        assert_eq!(ordering.field(), "Name");
        Ok(())
    }

    #[test]
    fn build_is_idempotent() -> Result {
        let builder = SelectorBuilder::new()
            .fields(["Id", "Name"])
            .equals("Status", "ENABLED")
            .limit(50);
        let first = builder.clone().build()?;
        let second = builder.build()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn empty_projection_rejected() {
        let error = SelectorBuilder::new().build().unwrap_err();
        assert!(error.is_invalid_query(), "{error:?}");
    }

    #[test_case(0; "zero")]
    #[test_case(501; "above the cap")]
    #[test_case(u32::MAX; "absurd")]
    fn bad_limit_rejected(limit: u32) {
        let error = SelectorBuilder::new()
            .fields(["Id"])
            .limit(limit)
            .build()
            .unwrap_err();
        assert!(error.is_invalid_query(), "{error:?}");
    }

    #[test]
    fn with_offset_copies() -> Result {
        let selector = SelectorBuilder::new().fields(["Id"]).build()?;
        let moved = selector.with_offset(300);
        assert_eq!(selector.offset(), 0);
        assert_eq!(moved.offset(), 300);
        assert_eq!(moved.fields(), selector.fields());
        Ok(())
    }
}
