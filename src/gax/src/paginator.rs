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

//! Traverse selector and statement result sets page by page.
//!
//! The Ads services page with an advancing `(offset, limit)` pair rather than
//! opaque page tokens: the cursor re-issues the same query at
//! `offset + limit` until the next page would start at or past the server's
//! reported total. [PageCursor] adapts that loop into a [futures::Stream] of
//! pages; [PageCursor::items] flattens it into a stream of entries.

use crate::page::Page;
use crate::query::Pageable;
use futures::stream::unfold;
use futures::{Stream, StreamExt};
use pin_project::pin_project;
use std::future::Future;
use std::pin::Pin;

type ControlFlow = std::ops::ControlFlow<(), u32>;

/// A lazy sequence of pages produced by repeated `get(query)` calls.
///
/// Each step clones the query at the current offset and invokes the `execute`
/// function it was created with. Pages surface in offset order and entries
/// within a page in server order. A failed call is yielded once and ends the
/// stream; the cursor never retries.
#[pin_project]
pub struct PageCursor<T, E> {
    #[pin]
    stream: Pin<Box<dyn Stream<Item = Result<Page<T>, E>>>>,
}

impl<T, E> PageCursor<T, E> {
    /// Creates a cursor over `query`, fetching pages with `execute`.
    ///
    /// Iteration starts at the query's own offset and advances by the query's
    /// limit. Termination trusts the most recent `total_num_entries`: a total
    /// at or below the next offset stops the iteration, so a result set that
    /// shrinks under concurrent mutation never makes the cursor re-seek.
    pub fn new<Q, F>(query: Q, execute: impl Fn(Q) -> F + Clone + 'static) -> Self
    where
        Q: Pageable + Clone + 'static,
        F: Future<Output = Result<Page<T>, E>> + 'static,
        T: 'static,
        E: 'static,
    {
        let limit = query.limit();
        let stream = unfold(ControlFlow::Continue(query.offset()), move |state| {
            let execute = execute.clone();
            let query = query.clone();
            async move {
                let offset = match state {
                    ControlFlow::Continue(offset) => offset,
                    ControlFlow::Break(_) => return None,
                };
                match execute(query.with_offset(offset)).await {
                    Ok(page) => {
                        tracing::debug!(
                            offset,
                            entries = page.entries().len(),
                            total = page.total_num_entries(),
                            "fetched page"
                        );
                        let next = offset.saturating_add(limit);
                        let next_state = if next < page.total_num_entries() {
                            ControlFlow::Continue(next)
                        } else {
                            ControlFlow::Break(())
                        };
                        Some((Ok(page), next_state))
                    }
                    Err(e) => Some((Err(e), ControlFlow::Break(()))),
                }
            }
        });
        Self {
            stream: Box::pin(stream),
        }
    }

    /// Returns the next page of the wrapped stream.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self> {
        StreamExt::next(self)
    }

    /// Flattens the cursor into a stream of entries in emission order.
    pub fn items(self) -> ItemCursor<T, E> {
        ItemCursor {
            cursor: self,
            current: Vec::new().into_iter(),
        }
    }
}

impl<T, E> Stream for PageCursor<T, E> {
    type Item = Result<Page<T>, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        self.project().stream.poll_next(cx)
    }
}

/// A [PageCursor] flattened into individual entries.
#[pin_project]
pub struct ItemCursor<T, E> {
    #[pin]
    cursor: PageCursor<T, E>,
    current: std::vec::IntoIter<T>,
}

impl<T, E> ItemCursor<T, E> {
    /// Returns the next entry of the wrapped stream.
    pub fn next(&mut self) -> futures::stream::Next<'_, Self>
    where
        Self: Unpin,
    {
        StreamExt::next(self)
    }
}

impl<T, E> Stream for ItemCursor<T, E> {
    type Item = Result<T, E>;

    fn poll_next(
        self: Pin<&mut Self>,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Option<Self::Item>> {
        use std::task::Poll;
        let mut this = self.project();
        loop {
            if let Some(item) = this.current.next() {
                return Poll::Ready(Some(Ok(item)));
            }
            match this.cursor.as_mut().poll_next(cx) {
                Poll::Ready(Some(Ok(page))) => {
                    *this.current = page.into_entries().into_iter();
                }
                Poll::Ready(Some(Err(e))) => return Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::SelectorBuilder;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    type TestError = Box<dyn std::error::Error + Send + Sync>;
    type Result = std::result::Result<(), TestError>;

    /// A scripted `get` that records the offsets it was called with.
    fn scripted(
        pages: Vec<Page<i64>>,
    ) -> (
        Rc<RefCell<Vec<u32>>>,
        impl Fn(crate::selector::Selector) -> std::future::Ready<std::result::Result<Page<i64>, TestError>>
        + Clone,
    ) {
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let pages = Rc::new(RefCell::new(VecDeque::from(pages)));
        let recorded = offsets.clone();
        let execute = move |selector: crate::selector::Selector| {
            use crate::query::Pageable as _;
            recorded.borrow_mut().push(selector.offset());
            let page = pages.borrow_mut().pop_front().expect("no page scripted");
            std::future::ready(Ok(page))
        };
        (offsets, execute)
    }

    fn entries(range: std::ops::Range<i64>) -> Vec<i64> {
        range.collect()
    }

    #[tokio::test]
    async fn three_pages_in_offset_order() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        let (offsets, execute) = scripted(vec![
            Page::new(entries(0..100), 250),
            Page::new(entries(100..200), 250),
            Page::new(entries(200..250), 250),
        ]);
        let mut cursor = PageCursor::new(query, execute);
        let mut collected = Vec::new();
        while let Some(page) = cursor.next().await {
            collected.extend(page?.into_entries());
        }
        assert_eq!(*offsets.borrow(), [0, 100, 200]);
        assert_eq!(collected, entries(0..250));
        Ok(())
    }

    #[tokio::test]
    async fn empty_result_issues_one_call() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        let (offsets, execute) = scripted(vec![Page::new(Vec::new(), 0)]);
        let mut cursor = PageCursor::new(query, execute);
        let mut pages = 0;
        while let Some(page) = cursor.next().await {
            assert!(page?.entries().is_empty());
            pages += 1;
        }
        assert_eq!(pages, 1);
        assert_eq!(*offsets.borrow(), [0]);
        Ok(())
    }

    #[tokio::test]
    async fn shrinking_total_stops_without_reseek() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        // The server first claims 350 entries, then reports the set shrank
        // below the already-consumed offset.
        let (offsets, execute) = scripted(vec![
            Page::new(entries(0..100), 350),
            Page::new(entries(100..150), 80),
        ]);
        let mut cursor = PageCursor::new(query, execute);
        let mut collected = Vec::new();
        while let Some(page) = cursor.next().await {
            collected.extend(page?.into_entries());
        }
        assert_eq!(*offsets.borrow(), [0, 100]);
        assert_eq!(collected.len(), 150);
        Ok(())
    }

    #[tokio::test]
    async fn oversized_page_is_kept_whole() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        // The server returns 120 entries against a limit of 100. All are
        // surfaced and the offset still advances by the limit.
        let (offsets, execute) = scripted(vec![
            Page::new(entries(0..120), 150),
            Page::new(entries(100..150), 150),
        ]);
        let mut cursor = PageCursor::new(query, execute);
        let mut collected = Vec::new();
        while let Some(page) = cursor.next().await {
            collected.extend(page?.into_entries());
        }
        assert_eq!(*offsets.borrow(), [0, 100]);
        assert_eq!(collected.len(), 170);
        Ok(())
    }

    #[tokio::test]
    async fn short_page_mid_iteration_continues() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        // Tombstoned rows leave a gap in the middle page; the total still
        // promises more, so the cursor keeps advancing by the limit.
        let (offsets, execute) = scripted(vec![
            Page::new(entries(0..100), 230),
            Page::new(entries(100..140), 230),
            Page::new(entries(200..230), 230),
        ]);
        let mut cursor = PageCursor::new(query, execute);
        let mut pages = 0;
        while let Some(page) = cursor.next().await {
            page?;
            pages += 1;
        }
        assert_eq!(pages, 3);
        assert_eq!(*offsets.borrow(), [0, 100, 200]);
        Ok(())
    }

    #[tokio::test]
    async fn starts_at_the_query_offset() -> Result {
        let query = SelectorBuilder::new()
            .fields(["Id"])
            .limit(100)
            .offset(200)
            .build()?;
        let (offsets, execute) = scripted(vec![Page::new(entries(200..250), 250)]);
        let mut cursor = PageCursor::new(query, execute);
        while let Some(page) = cursor.next().await {
            page?;
        }
        assert_eq!(*offsets.borrow(), [200]);
        Ok(())
    }

    #[tokio::test]
    async fn error_ends_the_stream() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(100).build()?;
        let execute = |_| async { Err::<Page<i64>, TestError>("boom".into()) };
        let mut cursor = PageCursor::new(query, execute);
        let mut errors = 0;
        while let Some(page) = cursor.next().await {
            match page {
                Ok(_) => panic!("no pages were scripted"),
                Err(e) => {
                    assert_eq!(e.to_string(), "boom");
                    errors += 1;
                }
            }
        }
        assert_eq!(errors, 1);
        Ok(())
    }

    #[tokio::test]
    async fn items_flatten_in_emission_order() -> Result {
        let query = SelectorBuilder::new().fields(["Id"]).limit(3).build()?;
        let (_, execute) = scripted(vec![
            Page::new(vec![1, 2, 3], 5),
            Page::new(vec![4, 5], 5),
        ]);
        let mut items = PageCursor::new(query, execute).items();
        let mut collected = Vec::new();
        while let Some(item) = items.next().await {
            collected.push(item?);
        }
        assert_eq!(collected, [1, 2, 3, 4, 5]);
        Ok(())
    }

    #[tokio::test]
    async fn statement_queries_page_the_same_way() -> Result {
        use crate::statement::StatementBuilder;
        let query = StatementBuilder::new().limit(2).build()?;
        let offsets = Rc::new(RefCell::new(Vec::new()));
        let pages = Rc::new(RefCell::new(VecDeque::from(vec![
            Page::new(vec!["a", "b"], 3),
            Page::new(vec!["c"], 3),
        ])));
        let recorded = offsets.clone();
        let execute = move |statement: crate::statement::Statement| {
            use crate::query::Pageable as _;
            recorded.borrow_mut().push(statement.offset());
            let page = pages.borrow_mut().pop_front().unwrap();
            std::future::ready(Ok::<_, TestError>(page))
        };
        let mut cursor = PageCursor::new(query, execute);
        let mut collected = Vec::new();
        while let Some(page) = cursor.next().await {
            collected.extend(page?.into_entries());
        }
        assert_eq!(*offsets.borrow(), [0, 2]);
        assert_eq!(collected, ["a", "b", "c"]);
        Ok(())
    }
}
