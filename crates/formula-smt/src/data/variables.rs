// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::types::ValueType;
use std::fmt;

/// A logical variable of the formula model.
///
/// Identity is the pair of name and declared type: a boolean `x` and an integer `x`
/// are different variables and get different backend objects.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    name: String,
    value_type: ValueType,
}

impl Variable {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Bool)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Integer)
    }

    pub fn double(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Double)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value_type)
    }
}
