// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Error types for formula translation
//!
//! Every error is terminal: translation is a structural mapping, so a failure aborts
//! the whole top-level call and is handed back to the caller unchanged.

use crate::backend::Sort;
use crate::data::terms::FunctionKind;
use crate::data::types::ValueType;
use thiserror::Error;

/// Result type alias for translation
pub type TranslationResult<T> = std::result::Result<T, TranslationError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TranslationError {
    /// Expression node without a backend counterpart
    #[error("nodes of kind {0} are not supported by the translator")]
    UnsupportedNode(&'static str),

    /// Function symbol not implemented for the numeral sort of its result
    #[error("function {kind} is not supported for result type {result_type}")]
    UnsupportedFunction {
        kind: FunctionKind,
        result_type: ValueType,
    },

    /// Term or result type outside the numeral types
    #[error("unsupported term type: {0}")]
    UnsupportedType(ValueType),

    /// The bound backend lacks the theory needed for this type
    #[error("backend does not support values of type {0}")]
    BackendUnsupportedType(ValueType),

    /// Strict mode met a variable that was never declared
    #[error("variable '{0}' was not registered before translation")]
    VariableNotPreregistered(String),

    /// Registry entry exists under another sort
    #[error("variable '{variable}' is registered as {found}, requested as {expected}")]
    SortMismatch {
        variable: String,
        expected: Sort,
        found: Sort,
    },

    /// Operand of an integer operation reduced to a non-integer numeral
    #[error("expected an operand of sort {expected}, got {found}")]
    IncompatibleOperand { expected: Sort, found: Sort },

    /// Double constant without a rational counterpart
    #[error("constant {0} has no rational representation")]
    NonFiniteConstant(f64),
}
