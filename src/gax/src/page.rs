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

/// One page of a selector or statement query.
///
/// `total_num_entries` is the server's count for the *full* result set
/// matching the query, not for this page. Concurrent mutations can make the
/// count move between pages; the [page cursor][crate::paginator::PageCursor]
/// always trusts the most recent value.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    entries: Vec<T>,
    total_num_entries: u32,
}

impl<T> Page<T> {
    /// Creates a page from its entries and the reported total.
    pub fn new(entries: Vec<T>, total_num_entries: u32) -> Self {
        Self {
            entries,
            total_num_entries,
        }
    }

    /// The entries of this page, in server emission order.
    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Consumes the page, returning its entries.
    pub fn into_entries(self) -> Vec<T> {
        self.entries
    }

    /// The server's entry count for the full result set.
    pub fn total_num_entries(&self) -> u32 {
        self.total_num_entries
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            total_num_entries: 0,
        }
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
