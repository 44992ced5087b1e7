// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a variable, or result type of a function term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ValueType {
    /// Boolean (feature/propositional variables)
    Bool,
    /// Mathematical integer
    Integer,
    /// Floating point in the model, rational in the backend
    Double,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Bool => write!(f, "Bool"),
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Double => write!(f, "Double"),
        }
    }
}
