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

/// The details of a SOAP fault returned by an Ads service.
///
/// Both the AdWords and the Ad Manager services report business-logic
/// rejections as a `soap:Fault` whose detail element carries a list of
/// [ApiError] values. The transport parses the fault into this type and the
/// library surfaces it verbatim via
/// [Error::service][crate::error::Error::service].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiFault {
    fault_code: String,
    fault_string: String,
    errors: Vec<ApiError>,
}

impl ApiFault {
    /// Creates a fault from the envelope-level code and string.
    pub fn new<C, S>(fault_code: C, fault_string: S) -> Self
    where
        C: Into<String>,
        S: Into<String>,
    {
        Self {
            fault_code: fault_code.into(),
            fault_string: fault_string.into(),
            errors: Vec::new(),
        }
    }

    /// Sets the per-operand or request-level errors in the fault detail.
    pub fn set_errors<I>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = ApiError>,
    {
        self.errors = errors.into_iter().collect();
        self
    }

    /// The `faultcode` element, e.g. `soap:Server`.
    pub fn fault_code(&self) -> &str {
        &self.fault_code
    }

    /// The `faultstring` element.
    pub fn fault_string(&self) -> &str {
        &self.fault_string
    }

    /// The errors carried in the fault detail, possibly empty.
    pub fn errors(&self) -> &[ApiError] {
        &self.errors
    }
}

impl std::fmt::Display for ApiFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.fault_string, self.fault_code)?;
        for e in &self.errors {
            write!(f, "; {e}")?;
        }
        Ok(())
    }
}

/// A single error reported by an Ads service.
///
/// Services report these both inside SOAP faults and as the
/// `partialFailureErrors` of a bulk mutate call. The `field_path` locates the
/// offending input; for mutate calls it starts with `operations[i]` where `i`
/// is the index of the rejected operation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ApiError {
    error_type: String,
    field_path: String,
    trigger: String,
    error_string: String,
}

impl ApiError {
    /// Creates an error from its wire fields.
    pub fn new<T, S>(error_type: T, error_string: S) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            error_type: error_type.into(),
            error_string: error_string.into(),
            ..Default::default()
        }
    }

    /// Sets the path of the field that triggered the error.
    pub fn set_field_path<S: Into<String>>(mut self, field_path: S) -> Self {
        self.field_path = field_path.into();
        self
    }

    /// Sets the data that triggered the error.
    pub fn set_trigger<S: Into<String>>(mut self, trigger: S) -> Self {
        self.trigger = trigger.into();
        self
    }

    /// The concrete error type, e.g. `CriterionError`.
    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    /// The path of the field that triggered the error, possibly empty.
    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    /// The data that triggered the error, possibly empty.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// The error description, e.g. `CriterionError.INVALID_PLACEMENT_URL`.
    pub fn error_string(&self) -> &str {
        &self.error_string
    }

    /// The index of the operation this error applies to.
    ///
    /// Bulk mutate calls report per-operand errors with a field path of the
    /// form `operations[i].operand...`. Returns `None` when the error is not
    /// tied to a specific operation.
    pub fn operation_index(&self) -> Option<usize> {
        let rest = self.field_path.strip_prefix("operations[")?;
        let end = rest.find(']')?;
        rest[..end].parse().ok()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_string)?;
        if !self.field_path.is_empty() {
            write!(f, " @ {}", self.field_path)?;
        }
        if !self.trigger.is_empty() {
            write!(f, " trigger:'{}'", self.trigger)?;
        }
        Ok(())
    }
}
