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

//! Shared machinery for the Ads API Client Libraries for Rust.
//!
//! This crate holds the pieces every Ads service client is built from: the
//! query builders ([selector] for AdWords, [statement] for Ad Manager PQL),
//! the offset-based [paginator], bulk mutation [operation]s and the
//! [batcher] that accumulates them, the per-API [session] configuration, and
//! the common [error] type.
//!
//! Application code rarely depends on this crate directly; the
//! `google-ads-adwords` and `google-ads-admanager` crates re-export what
//! their surfaces need.

/// An alias of [std::result::Result] where the error is always
/// [Error][crate::error::Error].
pub type Result<T> = std::result::Result<T, error::Error>;

pub mod batcher;
pub mod error;
pub mod operation;
pub mod page;
pub mod paginator;
pub mod query;
pub mod selector;
pub mod session;
pub mod statement;
