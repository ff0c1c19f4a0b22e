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

//! Loading `ads.properties` configuration files.
//!
//! The Ads client libraries have historically been configured through a Java
//! style properties file with one `key=value` pair per line, keys prefixed
//! by the API they apply to (`api.adwords.` or `api.admanager.`). This module
//! reads the subset of that format those files actually use: blank lines,
//! `#` and `!` comments, and `=` or `:` separators.

use crate::Result;
use crate::errors;
use std::collections::HashMap;
use std::path::Path;

/// A parsed properties file.
#[derive(Clone, Debug, Default)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Loads and parses a properties file.
    ///
    /// # Errors
    ///
    /// Returns a [CredentialsError][crate::errors::CredentialsError] when the
    /// file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref()).map_err(errors::non_retryable)?;
        Ok(Self::parse(&contents))
    }

    /// Parses properties from a string.
    ///
    /// Later occurrences of a key override earlier ones.
    pub fn parse(contents: &str) -> Self {
        let mut values = HashMap::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let Some(split) = line.find(['=', ':']) else {
                continue;
            };
            let key = line[..split].trim();
            let value = line[split + 1..].trim();
            if !key.is_empty() {
                values.insert(key.to_string(), value.to_string());
            }
        }
        Self { values }
    }

    /// Returns the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Returns the value of `key`, or an error naming the missing key.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| errors::non_retryable_from_str(format!("missing property {key}")))
    }

    /// The number of properties.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the file held no properties.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
