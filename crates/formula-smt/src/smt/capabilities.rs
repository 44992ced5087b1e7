// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::terms::Term;
use crate::data::types::ValueType;
use crate::error::{TranslationError, TranslationResult};
use serde::{Deserialize, Serialize};

/// Feature set a backend declares when it is bound to a translator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Capabilities {
    /// Rational (real) arithmetic
    pub rationals: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

impl Capabilities {
    pub fn all() -> Self {
        Self { rationals: true }
    }

    pub fn integer_only() -> Self {
        Self { rationals: false }
    }

    pub fn supports(&self, value_type: ValueType) -> bool {
        match value_type {
            ValueType::Bool | ValueType::Integer => true,
            ValueType::Double => self.rationals,
        }
    }

    /// Fail unless values of `value_type` can be built by the backend
    pub fn require(&self, value_type: ValueType) -> TranslationResult<()> {
        if self.supports(value_type) {
            Ok(())
        } else {
            Err(TranslationError::BackendUnsupportedType(value_type))
        }
    }

    pub fn require_rationals(&self) -> TranslationResult<()> {
        self.require(ValueType::Double)
    }

    /// Check a whole term tree without touching the backend.
    ///
    /// Only the numeral sorts are checked here; other typing errors surface when the
    /// term is reduced.
    pub fn check_term(&self, term: &Term) -> TranslationResult<()> {
        for subterm in term.iter() {
            if subterm.value_type() == ValueType::Double {
                self.require_rationals()?;
            }
        }
        Ok(())
    }
}
