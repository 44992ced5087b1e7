// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Solver backends
//!
//! A backend owns the native expression representation of a constraint solver and
//! exposes factory operations for boolean, integer and rational expressions. The
//! translator only ever talks to this trait, so supporting another solver means
//! implementing it and describing the solver's [`Capabilities`].

pub mod smtlib;
#[cfg(feature = "z3")]
pub mod z3;

use crate::data::expressions::ComparisonKind;
use crate::data::types::ValueType;
use crate::error::{TranslationError, TranslationResult};
use crate::smt::Capabilities;
use num::BigRational;
use std::fmt;

/// Sort of a backend object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sort {
    Bool,
    Integer,
    Rational,
}

impl fmt::Display for Sort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Bool => write!(f, "Bool"),
            Sort::Integer => write!(f, "Int"),
            Sort::Rational => write!(f, "Real"),
        }
    }
}

/// Factory interface of a solver context.
///
/// Rational operations default to failing with
/// [`TranslationError::BackendUnsupportedType`]; backends whose capabilities include
/// rationals must override all of them.
pub trait SolverBackend: Sized {
    type Bool: Clone + fmt::Debug;
    type Int: Clone + fmt::Debug;
    type Rational: Clone + fmt::Debug;

    /// Feature set of this backend
    fn capabilities(&self) -> Capabilities;

    fn make_bool(&mut self, value: bool) -> Self::Bool;
    fn bool_var(&mut self, name: &str) -> Self::Bool;
    fn not(&mut self, operand: &Self::Bool) -> Self::Bool;
    /// N-ary conjunction; the meaning of zero operands is up to the backend
    fn and(&mut self, operands: &[Self::Bool]) -> Self::Bool;
    /// N-ary disjunction; the meaning of zero operands is up to the backend
    fn or(&mut self, operands: &[Self::Bool]) -> Self::Bool;
    fn implies(&mut self, lhs: &Self::Bool, rhs: &Self::Bool) -> Self::Bool;
    fn equivalence(&mut self, lhs: &Self::Bool, rhs: &Self::Bool) -> Self::Bool;

    fn int_constant(&mut self, value: i64) -> Self::Int;
    fn int_var(&mut self, name: &str) -> Self::Int;
    fn int_add(&mut self, operands: &[Self::Int]) -> Self::Int;
    fn int_multiply(&mut self, operands: &[Self::Int]) -> Self::Int;
    fn int_compare(&mut self, kind: ComparisonKind, lhs: &Self::Int, rhs: &Self::Int)
        -> Self::Bool;

    fn rational_constant(&mut self, _value: &BigRational) -> TranslationResult<Self::Rational> {
        Err(TranslationError::BackendUnsupportedType(ValueType::Double))
    }

    fn rational_var(&mut self, _name: &str) -> TranslationResult<Self::Rational> {
        Err(TranslationError::BackendUnsupportedType(ValueType::Double))
    }

    /// Rational addition. Integer operands are coerced by the backend.
    fn rational_add(&mut self, _operands: &[Numeral<Self>]) -> TranslationResult<Self::Rational> {
        Err(TranslationError::BackendUnsupportedType(ValueType::Double))
    }

    /// Rational multiplication. Integer operands are coerced by the backend.
    fn rational_multiply(
        &mut self,
        _operands: &[Numeral<Self>],
    ) -> TranslationResult<Self::Rational> {
        Err(TranslationError::BackendUnsupportedType(ValueType::Double))
    }

    /// Rational comparison. Integer operands are coerced by the backend.
    fn rational_compare(
        &mut self,
        _kind: ComparisonKind,
        _lhs: &Numeral<Self>,
        _rhs: &Numeral<Self>,
    ) -> TranslationResult<Self::Bool> {
        Err(TranslationError::BackendUnsupportedType(ValueType::Double))
    }
}

/// Numeral-valued backend object tagged with its runtime sort
pub enum Numeral<B: SolverBackend> {
    Integer(B::Int),
    Rational(B::Rational),
}

impl<B: SolverBackend> Numeral<B> {
    pub fn sort(&self) -> Sort {
        match self {
            Numeral::Integer(_) => Sort::Integer,
            Numeral::Rational(_) => Sort::Rational,
        }
    }

    pub fn is_rational(&self) -> bool {
        matches!(self, Numeral::Rational(_))
    }

    pub fn as_integer(&self) -> Option<&B::Int> {
        match self {
            Numeral::Integer(i) => Some(i),
            Numeral::Rational(_) => None,
        }
    }

    pub fn as_rational(&self) -> Option<&B::Rational> {
        match self {
            Numeral::Integer(_) => None,
            Numeral::Rational(r) => Some(r),
        }
    }
}

impl<B: SolverBackend> Clone for Numeral<B> {
    fn clone(&self) -> Self {
        match self {
            Numeral::Integer(i) => Numeral::Integer(i.clone()),
            Numeral::Rational(r) => Numeral::Rational(r.clone()),
        }
    }
}

impl<B: SolverBackend> fmt::Debug for Numeral<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeral::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Numeral::Rational(r) => f.debug_tuple("Rational").field(r).finish(),
        }
    }
}
