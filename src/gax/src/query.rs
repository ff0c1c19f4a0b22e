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

//! A uniform view over the two query dialects.
//!
//! AdWords-style services take a [Selector][crate::selector::Selector] with
//! predicate objects and numeric paging. Ad Manager-style services take a
//! [Statement][crate::statement::Statement] with a PQL-like filter and bind
//! variables. The [Pageable] trait exposes the paging parameters both carry so
//! the [page cursor][crate::paginator::PageCursor] works with either, and
//! [Query] holds one or the other for code that must carry both shapes.

use crate::selector::Selector;
use crate::statement::Statement;

/// The page size used by builders unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// The largest page either service accepts.
pub const MAX_PAGE_SIZE: u32 = 500;

/// A query that can be re-issued at a different offset.
///
/// Implementations are immutable values; [with_offset][Pageable::with_offset]
/// returns a copy, leaving the original untouched.
pub trait Pageable {
    /// The index of the first entry requested.
    fn offset(&self) -> u32;

    /// The maximum number of entries requested per page.
    fn limit(&self) -> u32;

    /// A copy of this query starting at `offset`.
    #[must_use]
    fn with_offset(&self, offset: u32) -> Self;
}

/// Either of the two query dialects.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// An AdWords-style selector.
    Selector(Selector),
    /// An Ad Manager-style statement.
    Statement(Statement),
}

impl Pageable for Query {
    fn offset(&self) -> u32 {
        match self {
            Query::Selector(s) => s.offset(),
            Query::Statement(s) => s.offset(),
        }
    }

    fn limit(&self) -> u32 {
        match self {
            Query::Selector(s) => s.limit(),
            Query::Statement(s) => s.limit(),
        }
    }

    fn with_offset(&self, offset: u32) -> Self {
        match self {
            Query::Selector(s) => Query::Selector(s.with_offset(offset)),
            Query::Statement(s) => Query::Statement(s.with_offset(offset)),
        }
    }
}

impl From<Selector> for Query {
    fn from(value: Selector) -> Self {
        Query::Selector(value)
    }
}

impl From<Statement> for Query {
    fn from(value: Statement) -> Self {
        Query::Statement(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorBuilder;
    use crate::statement::StatementBuilder;

    type Result = anyhow::Result<()>;

    #[test]
    fn uniform_paging() -> Result {
        let selector = SelectorBuilder::new()
            .fields(["Id"])
            .limit(100)
            .build()?;
        let statement = StatementBuilder::new().limit(200).offset(40).build()?;

        let query = Query::from(selector);
        assert_eq!(query.offset(), 0);
        assert_eq!(query.limit(), 100);
        let moved = query.with_offset(100);
        assert_eq!(moved.offset(), 100);
        // The original is untouched.
        assert_eq!(query.offset(), 0);

        let query = Query::from(statement);
        assert_eq!(query.offset(), 40);
        assert_eq!(query.limit(), 200);
        assert_eq!(query.with_offset(240).offset(), 240);
        Ok(())
    }
}
