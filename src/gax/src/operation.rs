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

//! Bulk mutation operations and their results.

use crate::error::{ApiError, Error};

/// The mutation verb of an [Operation].
///
/// Which verbs a given service accepts for a given operand type is a policy
/// of that service, not of this library.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Set,
    Remove,
}

impl Operator {
    /// The wire name of the operator.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Add => "ADD",
            Operator::Set => "SET",
            Operator::Remove => "REMOVE",
        }
    }
}

/// A single mutation: an operator applied to an operand.
#[derive(Clone, Debug, PartialEq)]
pub struct Operation<T> {
    operator: Operator,
    operand: T,
}

impl<T> Operation<T> {
    /// Creates an ADD operation.
    pub fn add(operand: T) -> Self {
        Self {
            operator: Operator::Add,
            operand,
        }
    }

    /// Creates a SET operation.
    pub fn set(operand: T) -> Self {
        Self {
            operator: Operator::Set,
            operand,
        }
    }

    /// Creates a REMOVE operation.
    pub fn remove(operand: T) -> Self {
        Self {
            operator: Operator::Remove,
            operand,
        }
    }

    /// The mutation verb.
    pub fn operator(&self) -> Operator {
        self.operator
    }

    /// The operand the verb applies to.
    pub fn operand(&self) -> &T {
        &self.operand
    }
}

/// The outcome of one submitted operation.
#[derive(Clone, Debug, PartialEq)]
pub enum OperandResult<T> {
    /// The service applied the operation and returned the resulting value.
    Applied(T),
    /// The service rejected the operation without applying it.
    Rejected(ApiError),
}

/// The per-operand results of a bulk mutate call.
///
/// Results align positionally with the submitted operations: `results()[i]`
/// is the outcome of operation `i`, either the value the service returned or
/// the error that rejected it. Rejected slots only appear when the session
/// has partial failure enabled; otherwise any rejection fails the whole call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BulkReturn<T> {
    results: Vec<OperandResult<T>>,
}

impl<T> BulkReturn<T> {
    /// A return value with no results, as produced by an empty flush.
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
        }
    }

    /// Builds the aligned results from the wire response.
    ///
    /// The services return the applied values as a dense array plus a
    /// separate list of partial-failure errors whose `fieldPath` names the
    /// index of the rejected operation. `submitted` is the number of
    /// operations in the request; positions claimed by an error take that
    /// error, the rest take the returned values in order.
    ///
    /// # Errors
    ///
    /// Returns a deserialization error when the values and errors do not add
    /// up to `submitted` results, or when an error names an out-of-range
    /// index.
    pub fn from_wire(values: Vec<T>, errors: Vec<ApiError>, submitted: usize) -> Result<Self, Error> {
        let mut slots: Vec<Option<OperandResult<T>>> = std::iter::repeat_with(|| None)
            .take(submitted)
            .collect();
        for error in errors {
            let index = error.operation_index().ok_or_else(|| {
                Error::deser(format!(
                    "partial failure error without an operation index: {}",
                    error.field_path()
                ))
            })?;
            let slot = slots.get_mut(index).ok_or_else(|| {
                Error::deser(format!(
                    "partial failure error for operation {index}, but only {submitted} were submitted"
                ))
            })?;
            *slot = Some(OperandResult::Rejected(error));
        }
        let mut values = values.into_iter();
        for slot in slots.iter_mut() {
            if slot.is_none() {
                let value = values.next().ok_or_else(|| {
                    Error::deser("the mutate response carries fewer values than operations")
                })?;
                *slot = Some(OperandResult::Applied(value));
            }
        }
        if values.next().is_some() {
            return Err(Error::deser(
                "the mutate response carries more values than operations",
            ));
        }
        Ok(Self {
            results: slots.into_iter().flatten().collect(),
        })
    }

    /// The per-operand outcomes, positionally aligned with the submission.
    pub fn results(&self) -> &[OperandResult<T>] {
        &self.results
    }

    /// The number of per-operand outcomes.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether the call produced no outcomes at all.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// The applied values, in submission order.
    pub fn applied(&self) -> impl Iterator<Item = &T> {
        self.results.iter().filter_map(|r| match r {
            OperandResult::Applied(v) => Some(v),
            OperandResult::Rejected(_) => None,
        })
    }

    /// The rejected slots with their operation indices, in submission order.
    pub fn rejected(&self) -> impl Iterator<Item = (usize, &ApiError)> {
        self.results.iter().enumerate().filter_map(|(i, r)| match r {
            OperandResult::Applied(_) => None,
            OperandResult::Rejected(e) => Some((i, e)),
        })
    }
}
