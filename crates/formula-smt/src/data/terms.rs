// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::types::ValueType;
use crate::data::variables::Variable;
use itertools::Itertools;
use std::fmt;

/// Constant numeral value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstantValue {
    Integer(i64),
    Double(f64),
}

impl ConstantValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            ConstantValue::Integer(_) => ValueType::Integer,
            ConstantValue::Double(_) => ValueType::Double,
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Integer(v) => write!(f, "{}", v),
            ConstantValue::Double(v) => write!(f, "{:?}", v),
        }
    }
}

/// Arithmetic function symbols of the formula model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    Add,
    Multiply,
    /// Known to the formula model but not mapped onto any backend
    Divide,
}

impl FunctionKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            FunctionKind::Add => "+",
            FunctionKind::Multiply => "*",
            FunctionKind::Divide => "/",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionKind::Add => write!(f, "Add"),
            FunctionKind::Multiply => write!(f, "Multiply"),
            FunctionKind::Divide => write!(f, "Divide"),
        }
    }
}

/// Numeral-valued node of a formula
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Constant(ConstantValue),
    Variable(Variable),
    /// Function application. Children are ordered; `result_type` selects the numeral
    /// sort the function is evaluated in.
    Function {
        kind: FunctionKind,
        children: Vec<Term>,
        result_type: ValueType,
    },
}

impl Term {
    pub fn integer(value: i64) -> Self {
        Term::Constant(ConstantValue::Integer(value))
    }

    pub fn double(value: f64) -> Self {
        Term::Constant(ConstantValue::Double(value))
    }

    pub fn var(variable: Variable) -> Self {
        Term::Variable(variable)
    }

    pub fn function(kind: FunctionKind, children: Vec<Term>, result_type: ValueType) -> Self {
        Term::Function {
            kind,
            children,
            result_type,
        }
    }

    pub fn add(children: Vec<Term>, result_type: ValueType) -> Self {
        Self::function(FunctionKind::Add, children, result_type)
    }

    pub fn multiply(children: Vec<Term>, result_type: ValueType) -> Self {
        Self::function(FunctionKind::Multiply, children, result_type)
    }

    /// Type this term evaluates to, as declared by the model
    pub fn value_type(&self) -> ValueType {
        match self {
            Term::Constant(c) => c.value_type(),
            Term::Variable(v) => v.value_type(),
            Term::Function { result_type, .. } => *result_type,
        }
    }

    /// Pre-order iterator over this term and all its subterms
    pub fn iter(&self) -> TermIter<'_> {
        TermIter { stack: vec![self] }
    }
}

pub struct TermIter<'a> {
    stack: Vec<&'a Term>,
}

impl<'a> Iterator for TermIter<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let term = self.stack.pop()?;
        if let Term::Function { children, .. } = term {
            self.stack.extend(children.iter().rev());
        }
        Some(term)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Constant(c) => write!(f, "{}", c),
            Term::Variable(v) => write!(f, "{}", v.name()),
            Term::Function { kind, children, .. } if children.is_empty() => {
                write!(f, "({})", kind.symbol())
            }
            Term::Function { kind, children, .. } => {
                write!(f, "({} {})", kind.symbol(), children.iter().join(" "))
            }
        }
    }
}
