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

//! Errors reported while building queries, resolving services, or talking to
//! the Ads SOAP services.
//!
//! The library distinguishes errors detected before a request is sent (bad
//! configuration, a query the builder refuses to produce), errors trying to
//! send or receive a request, and errors returned by the service itself. The
//! [Error] type carries the error kind and, where available, the underlying
//! cause and the parsed SOAP fault.

mod core_error;
mod fault;
pub use core_error::*;
pub use fault::*;
