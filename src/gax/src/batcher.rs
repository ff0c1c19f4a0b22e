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

//! Accumulate mutation operations and flush them as one bulk call.

use crate::error::Error;
use crate::operation::{BulkReturn, Operation};
use std::future::Future;

/// Collects homogeneous operations and submits them in a single `mutate`.
///
/// Operations are submitted exactly in `add` order; the batcher never chunks,
/// reorders, or de-duplicates. A workflow needing chunking constructs several
/// batchers or flushes between additions. Flushing an empty batcher is a
/// no-op that never contacts the transport.
///
/// # Example
/// ```
/// # use google_ads_gax::batcher::OperationBatcher;
/// # use google_ads_gax::operation::{BulkReturn, Operation};
/// # tokio_test::block_on(async {
/// let mut batcher = OperationBatcher::new(|ops: Vec<Operation<i64>>| async move {
///     BulkReturn::from_wire(ops.iter().map(|op| *op.operand()).collect(), vec![], ops.len())
/// });
/// batcher.add(Operation::remove(1001))?;
/// batcher.add(Operation::remove(2001))?;
/// let ret = batcher.flush().await?;
/// assert_eq!(ret.len(), 2);
/// assert!(batcher.is_empty());
/// # Ok::<(), google_ads_gax::error::Error>(())
/// # });
/// ```
pub struct OperationBatcher<T, F> {
    pending: Vec<Operation<T>>,
    mutate: F,
}

impl<T, F, Fut> OperationBatcher<T, F>
where
    F: Fn(Vec<Operation<T>>) -> Fut,
    Fut: Future<Output = Result<BulkReturn<T>, Error>>,
{
    /// Creates a batcher that submits batches with `mutate`.
    pub fn new(mutate: F) -> Self {
        Self {
            pending: Vec::new(),
            mutate,
        }
    }

    /// Appends an operation to the pending batch.
    ///
    /// # Errors
    ///
    /// Returns [Error::invalid_query] when the operator differs from the
    /// operations already pending. The services reject mixed-operator arrays,
    /// so the batcher fails at the call site where the mix is introduced.
    pub fn add(&mut self, op: Operation<T>) -> Result<(), Error> {
        if let Some(first) = self.pending.first() {
            if first.operator() != op.operator() {
                return Err(Error::invalid_query(format!(
                    "cannot mix {} and {} operations in one batch",
                    first.operator().as_str(),
                    op.operator().as_str()
                )));
            }
        }
        self.pending.push(op);
        Ok(())
    }

    /// The number of pending operations.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no operations are pending.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Submits the pending operations as one bulk call.
    ///
    /// The pending list is cleared whether or not the call succeeds; on
    /// failure the operations are gone and the caller decides whether to
    /// rebuild them. An empty batcher returns an empty [BulkReturn] without
    /// invoking the transport.
    pub async fn flush(&mut self) -> Result<BulkReturn<T>, Error> {
        if self.pending.is_empty() {
            return Ok(BulkReturn::empty());
        }
        let batch = std::mem::take(&mut self.pending);
        (self.mutate)(batch).await
    }
}
