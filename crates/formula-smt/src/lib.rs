// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Formula to SMT translation
//!
//! This crate maps a generic propositional/arithmetic formula tree onto the native
//! expression objects of a constraint-solving backend. It does NOT invoke the solver -
//! that responsibility belongs to the caller, which consumes the translated formula and
//! the registry of backend variables created along the way.

mod data;
pub mod backend;
pub mod error;
pub mod options;
pub mod smt;

// Formula model (from data/mod.rs)
pub use data::expressions::{ComparisonKind, Expression};
pub use data::terms::{ConstantValue, FunctionKind, Term, TermIter};
pub use data::types::ValueType;
pub use data::variables::Variable;

// Backend abstraction
pub use backend::{Numeral, SolverBackend};
pub use backend::smtlib::{SExpr, SmtLibBackend};
#[cfg(feature = "z3")]
pub use backend::z3::Z3Backend;

// Translation
pub use error::{TranslationError, TranslationResult};
pub use options::TranslatorOptions;
pub use smt::{BackendVariable, Capabilities, Sort, Translator, VariableRegistry};
