// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Recording test double for `SolverBackend`

#![allow(dead_code)]

use formula_smt::{Capabilities, ComparisonKind, Numeral, SolverBackend, TranslationResult};
use num::BigRational;

/// Backend object: index of the call that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(pub usize);

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    MakeBool(bool),
    BoolVar(String),
    Not(Handle),
    And(Vec<Handle>),
    Or(Vec<Handle>),
    Implies(Handle, Handle),
    Equivalence(Handle, Handle),
    IntConstant(i64),
    IntVar(String),
    IntAdd(Vec<Handle>),
    IntMultiply(Vec<Handle>),
    IntCompare(ComparisonKind, Handle, Handle),
    RationalConstant(BigRational),
    RationalVar(String),
    RationalAdd(Vec<Handle>),
    RationalMultiply(Vec<Handle>),
    RationalCompare(ComparisonKind, Handle, Handle),
}

#[derive(Debug)]
pub struct RecordingBackend {
    pub capabilities: Capabilities,
    pub calls: Vec<Call>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::all())
    }

    pub fn integer_only() -> Self {
        Self::with_capabilities(Capabilities::integer_only())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            calls: Vec::new(),
        }
    }

    fn record(&mut self, call: Call) -> Handle {
        self.calls.push(call);
        Handle(self.calls.len() - 1)
    }
}

pub fn handle(numeral: &Numeral<RecordingBackend>) -> Handle {
    match numeral {
        Numeral::Integer(h) | Numeral::Rational(h) => *h,
    }
}

fn handles(numerals: &[Numeral<RecordingBackend>]) -> Vec<Handle> {
    numerals.iter().map(handle).collect()
}

impl SolverBackend for RecordingBackend {
    type Bool = Handle;
    type Int = Handle;
    type Rational = Handle;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn make_bool(&mut self, value: bool) -> Handle {
        self.record(Call::MakeBool(value))
    }

    fn bool_var(&mut self, name: &str) -> Handle {
        self.record(Call::BoolVar(name.to_string()))
    }

    fn not(&mut self, operand: &Handle) -> Handle {
        self.record(Call::Not(*operand))
    }

    fn and(&mut self, operands: &[Handle]) -> Handle {
        self.record(Call::And(operands.to_vec()))
    }

    fn or(&mut self, operands: &[Handle]) -> Handle {
        self.record(Call::Or(operands.to_vec()))
    }

    fn implies(&mut self, lhs: &Handle, rhs: &Handle) -> Handle {
        self.record(Call::Implies(*lhs, *rhs))
    }

    fn equivalence(&mut self, lhs: &Handle, rhs: &Handle) -> Handle {
        self.record(Call::Equivalence(*lhs, *rhs))
    }

    fn int_constant(&mut self, value: i64) -> Handle {
        self.record(Call::IntConstant(value))
    }

    fn int_var(&mut self, name: &str) -> Handle {
        self.record(Call::IntVar(name.to_string()))
    }

    fn int_add(&mut self, operands: &[Handle]) -> Handle {
        self.record(Call::IntAdd(operands.to_vec()))
    }

    fn int_multiply(&mut self, operands: &[Handle]) -> Handle {
        self.record(Call::IntMultiply(operands.to_vec()))
    }

    fn int_compare(&mut self, kind: ComparisonKind, lhs: &Handle, rhs: &Handle) -> Handle {
        self.record(Call::IntCompare(kind, *lhs, *rhs))
    }

    fn rational_constant(&mut self, value: &BigRational) -> TranslationResult<Handle> {
        Ok(self.record(Call::RationalConstant(value.clone())))
    }

    fn rational_var(&mut self, name: &str) -> TranslationResult<Handle> {
        Ok(self.record(Call::RationalVar(name.to_string())))
    }

    fn rational_add(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<Handle> {
        Ok(self.record(Call::RationalAdd(handles(operands))))
    }

    fn rational_multiply(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<Handle> {
        Ok(self.record(Call::RationalMultiply(handles(operands))))
    }

    fn rational_compare(
        &mut self,
        kind: ComparisonKind,
        lhs: &Numeral<Self>,
        rhs: &Numeral<Self>,
    ) -> TranslationResult<Handle> {
        Ok(self.record(Call::RationalCompare(kind, handle(lhs), handle(rhs))))
    }
}

/// Integer-only backend relying on the trait's default rational operations
#[derive(Debug, Default)]
pub struct IntegerBackend {
    pub calls: usize,
}

impl SolverBackend for IntegerBackend {
    type Bool = usize;
    type Int = usize;
    type Rational = usize;

    fn capabilities(&self) -> Capabilities {
        Capabilities::integer_only()
    }

    fn make_bool(&mut self, _value: bool) -> usize {
        self.tick()
    }

    fn bool_var(&mut self, _name: &str) -> usize {
        self.tick()
    }

    fn not(&mut self, _operand: &usize) -> usize {
        self.tick()
    }

    fn and(&mut self, _operands: &[usize]) -> usize {
        self.tick()
    }

    fn or(&mut self, _operands: &[usize]) -> usize {
        self.tick()
    }

    fn implies(&mut self, _lhs: &usize, _rhs: &usize) -> usize {
        self.tick()
    }

    fn equivalence(&mut self, _lhs: &usize, _rhs: &usize) -> usize {
        self.tick()
    }

    fn int_constant(&mut self, _value: i64) -> usize {
        self.tick()
    }

    fn int_var(&mut self, _name: &str) -> usize {
        self.tick()
    }

    fn int_add(&mut self, _operands: &[usize]) -> usize {
        self.tick()
    }

    fn int_multiply(&mut self, _operands: &[usize]) -> usize {
        self.tick()
    }

    fn int_compare(&mut self, _kind: ComparisonKind, _lhs: &usize, _rhs: &usize) -> usize {
        self.tick()
    }
}

impl IntegerBackend {
    fn tick(&mut self) -> usize {
        self.calls += 1;
        self.calls
    }
}
