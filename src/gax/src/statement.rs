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

//! Ad Manager-style statements and their builder.
//!
//! A [Statement] is a PQL-like filter: a `WHERE` expression with `:name`
//! placeholders, a bind-variable table supplying the placeholder values, an
//! optional ordering, and `LIMIT`/`OFFSET` paging.
//!
//! # Example
//! ```
//! # use google_ads_gax::statement::StatementBuilder;
//! # use google_ads_gax::selector::SortOrder;
//! let statement = StatementBuilder::new()
//!     .where_clause("id = :id")
//!     .order_by("id", SortOrder::Ascending)
//!     .limit(1)
//!     .with_bind_variable("id", 424242_i64)
//!     .build()?;
//! assert_eq!(statement.to_pql(), "WHERE id = :id ORDER BY id ASC LIMIT 1 OFFSET 0");
//! # Ok::<(), google_ads_gax::error::Error>(())
//! ```

use crate::error::Error;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Pageable};
use crate::selector::SortOrder;
use std::collections::BTreeMap;

/// The value of a bind variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Number(i64),
    Text(String),
    Boolean(bool),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Boolean(v) => write!(f, "{v}"),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

/// An immutable statement produced by [StatementBuilder::build].
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    where_clause: Option<String>,
    ordering: Option<(String, SortOrder)>,
    limit: u32,
    offset: u32,
    values: BTreeMap<String, Value>,
}

impl Statement {
    /// The `WHERE` expression, without the keyword.
    pub fn where_clause(&self) -> Option<&str> {
        self.where_clause.as_deref()
    }

    /// The bind-variable table, keyed by placeholder name.
    pub fn values(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// Renders the full PQL query string, paging included.
    pub fn to_pql(&self) -> String {
        let mut parts = Vec::new();
        if let Some(clause) = &self.where_clause {
            parts.push(format!("WHERE {clause}"));
        }
        if let Some((field, order)) = &self.ordering {
            let direction = match order {
                SortOrder::Ascending => "ASC",
                SortOrder::Descending => "DESC",
            };
            parts.push(format!("ORDER BY {field} {direction}"));
        }
        parts.push(format!("LIMIT {}", self.limit));
        parts.push(format!("OFFSET {}", self.offset));
        parts.join(" ")
    }
}

impl Pageable for Statement {
    fn offset(&self) -> u32 {
        self.offset
    }

    fn limit(&self) -> u32 {
        self.limit
    }

    fn with_offset(&self, offset: u32) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }
}

/// A fluent builder for [Statement] values.
#[derive(Clone, Debug, Default)]
pub struct StatementBuilder {
    where_clause: Option<String>,
    ordering: Option<(String, SortOrder)>,
    limit: u32,
    offset: u32,
    values: BTreeMap<String, Value>,
}

impl StatementBuilder {
    /// Creates a builder with no filter and the default page size.
    pub fn new() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// Sets the `WHERE` expression. Placeholders are written `:name`.
    ///
    /// A later call replaces an earlier one; expressions combine conditions
    /// with `AND` inside the expression itself.
    pub fn where_clause<S: Into<String>>(mut self, clause: S) -> Self {
        self.where_clause = Some(clause.into());
        self
    }

    /// Sets the ordering. A later call replaces an earlier one.
    pub fn order_by<F: Into<String>>(mut self, field: F, sort_order: SortOrder) -> Self {
        self.ordering = Some((field.into(), sort_order));
        self
    }

    /// Sets the page size. Validated at [build()][StatementBuilder::build].
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the index of the first result to return.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    /// Binds `value` to the `:name` placeholder.
    pub fn with_bind_variable<N, V>(mut self, name: N, value: V) -> Self
    where
        N: Into<String>,
        V: Into<Value>,
    {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Validates the accumulated state and returns the immutable statement.
    ///
    /// # Errors
    ///
    /// Returns [Error::invalid_query] when the limit is out of range, when a
    /// bound variable is never referenced in the `WHERE` expression, or when
    /// the expression references a placeholder that was never bound.
    pub fn build(self) -> Result<Statement, Error> {
        if self.limit == 0 {
            return Err(Error::invalid_query("the statement limit must be positive"));
        }
        if self.limit > MAX_PAGE_SIZE {
            return Err(Error::invalid_query(format!(
                "the statement limit {} exceeds the service page cap of {MAX_PAGE_SIZE}",
                self.limit
            )));
        }
        let referenced = placeholders(self.where_clause.as_deref().unwrap_or(""));
        for name in self.values.keys() {
            if !referenced.contains(name) {
                return Err(Error::invalid_query(format!(
                    "the bind variable :{name} is never referenced in the WHERE expression"
                )));
            }
        }
        for name in &referenced {
            if !self.values.contains_key(name) {
                return Err(Error::invalid_query(format!(
                    "the WHERE expression references the undeclared bind variable :{name}"
                )));
            }
        }
        Ok(Statement {
            where_clause: self.where_clause,
            ordering: self.ordering,
            limit: self.limit,
            offset: self.offset,
            values: self.values,
        })
    }
}

/// The `:name` placeholders referenced in a PQL expression.
fn placeholders(clause: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut chars = clause.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        if c != ':' {
            continue;
        }
        // Bind names are identifiers; `:30` inside a time literal is not one.
        match chars.peek() {
            Some((_, c)) if c.is_ascii_alphabetic() || *c == '_' => {}
            _ => continue,
        }
        let mut name = String::new();
        while let Some((_, c)) = chars.peek() {
            if c.is_ascii_alphanumeric() || *c == '_' {
                name.push(*c);
                chars.next();
            } else {
                break;
            }
        }
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    type Result = anyhow::Result<()>;

    #[test]
    fn renders_pql() -> Result {
        let statement = StatementBuilder::new()
            .where_clause("id = :id")
            .order_by("id", SortOrder::Ascending)
            .limit(1)
            .with_bind_variable("id", 424242_i64)
            .build()?;
        assert_eq!(statement.to_pql(), "WHERE id = :id ORDER BY id ASC LIMIT 1 OFFSET 0");
        assert_eq!(statement.values().get("id"), Some(&Value::Number(424242)));
        Ok(())
    }

    #[test]
    fn no_filter_is_paging_only() -> Result {
        let statement = StatementBuilder::new().limit(500).offset(1500).build()?;
        assert_eq!(statement.to_pql(), "LIMIT 500 OFFSET 1500");
        Ok(())
    }

    #[test]
    fn unreferenced_bind_rejected() {
        let error = StatementBuilder::new()
            .where_clause("id = :id")
            .with_bind_variable("id", 1_i64)
            .with_bind_variable("status", "ACTIVE")
            .build()
            .unwrap_err();
        assert!(error.is_invalid_query(), "{error:?}");
        let source = std::error::Error::source(&error).unwrap().to_string();
        assert!(source.contains(":status"), "{source}");
    }

    #[test]
    fn undeclared_placeholder_rejected() {
        let error = StatementBuilder::new()
            .where_clause("id = :id AND status = :status")
            .with_bind_variable("id", 1_i64)
            .build()
            .unwrap_err();
        assert!(error.is_invalid_query(), "{error:?}");
    }

    #[test_case(0)]
    #[test_case(501)]
    fn bad_limit_rejected(limit: u32) {
        let error = StatementBuilder::new().limit(limit).build().unwrap_err();
        assert!(error.is_invalid_query(), "{error:?}");
    }

    #[test]
    fn build_is_idempotent() -> Result {
        let builder = StatementBuilder::new()
            .where_clause("lineItemId = :lineItemId")
            .with_bind_variable("lineItemId", 77_i64)
            .limit(200);
        assert_eq!(builder.clone().build()?, builder.build()?);
        Ok(())
    }

    #[test]
    fn with_offset_copies() -> Result {
        let statement = StatementBuilder::new().limit(200).build()?;
        let moved = statement.with_offset(200);
        assert_eq!(statement.offset(), 0);
        assert_eq!(moved.offset(), 200);
        assert_eq!(moved.to_pql(), "LIMIT 200 OFFSET 200");
        Ok(())
    }

    #[test]
    fn placeholder_scan() {
        assert_eq!(placeholders("id = :id AND a = :b_2 OR x = :id"), ["id", "b_2"]);
        assert!(placeholders("status = 'ACTIVE'").is_empty());
        assert!(placeholders("time = '12:30'").is_empty());
    }
}
