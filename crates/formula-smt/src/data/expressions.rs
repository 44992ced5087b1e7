// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use crate::data::terms::Term;
use crate::data::variables::Variable;
use itertools::Itertools;
use std::fmt;

/// Numeral comparison predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonKind {
    LessThan,
    GreaterThan,
    LessEqual,
    GreaterEqual,
    Equals,
}

impl ComparisonKind {
    /// SMT-LIB symbol of the predicate
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonKind::LessThan => "<",
            ComparisonKind::GreaterThan => ">",
            ComparisonKind::LessEqual => "<=",
            ComparisonKind::GreaterEqual => ">=",
            ComparisonKind::Equals => "=",
        }
    }
}

/// Boolean-valued node of a formula
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Constant(bool),
    Not(Box<Expression>),
    And(Vec<Expression>),
    Or(Vec<Expression>),
    Implies(Box<Expression>, Box<Expression>),
    BiImplies(Box<Expression>, Box<Expression>),
    /// Boolean variable, negated when `positive` is false
    Literal {
        variable: Variable,
        positive: bool,
    },
    Comparison {
        kind: ComparisonKind,
        left: Term,
        right: Term,
    },

    // Connectives of the formula model without a translation
    AtLeast {
        bound: usize,
        children: Vec<Expression>,
    },
    AtMost {
        bound: usize,
        children: Vec<Expression>,
    },
    Between {
        min: usize,
        max: usize,
        children: Vec<Expression>,
    },
    Choose {
        bound: usize,
        children: Vec<Expression>,
    },
    Exists {
        variable: Variable,
        body: Box<Expression>,
    },
    ForAll {
        variable: Variable,
        body: Box<Expression>,
    },
}

impl Expression {
    pub fn not(operand: Expression) -> Self {
        Expression::Not(Box::new(operand))
    }

    pub fn and(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Expression>) -> Self {
        Expression::Or(children.into_iter().collect())
    }

    pub fn implies(lhs: Expression, rhs: Expression) -> Self {
        Expression::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn bi_implies(lhs: Expression, rhs: Expression) -> Self {
        Expression::BiImplies(Box::new(lhs), Box::new(rhs))
    }

    pub fn literal(variable: Variable, positive: bool) -> Self {
        Expression::Literal { variable, positive }
    }

    pub fn compare(kind: ComparisonKind, left: Term, right: Term) -> Self {
        Expression::Comparison { kind, left, right }
    }

    pub fn less_than(left: Term, right: Term) -> Self {
        Self::compare(ComparisonKind::LessThan, left, right)
    }

    pub fn greater_than(left: Term, right: Term) -> Self {
        Self::compare(ComparisonKind::GreaterThan, left, right)
    }

    pub fn less_equal(left: Term, right: Term) -> Self {
        Self::compare(ComparisonKind::LessEqual, left, right)
    }

    pub fn greater_equal(left: Term, right: Term) -> Self {
        Self::compare(ComparisonKind::GreaterEqual, left, right)
    }

    pub fn equals(left: Term, right: Term) -> Self {
        Self::compare(ComparisonKind::Equals, left, right)
    }

    /// Name of the node kind, used in diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Constant(true) => "True",
            Expression::Constant(false) => "False",
            Expression::Not(_) => "Not",
            Expression::And(_) => "And",
            Expression::Or(_) => "Or",
            Expression::Implies(..) => "Implies",
            Expression::BiImplies(..) => "BiImplies",
            Expression::Literal { .. } => "Literal",
            Expression::Comparison { kind, .. } => match kind {
                ComparisonKind::LessThan => "LessThan",
                ComparisonKind::GreaterThan => "GreaterThan",
                ComparisonKind::LessEqual => "LessEqual",
                ComparisonKind::GreaterEqual => "GreaterEqual",
                ComparisonKind::Equals => "Equals",
            },
            Expression::AtLeast { .. } => "AtLeast",
            Expression::AtMost { .. } => "AtMost",
            Expression::Between { .. } => "Between",
            Expression::Choose { .. } => "Choose",
            Expression::Exists { .. } => "Exists",
            Expression::ForAll { .. } => "ForAll",
        }
    }
}

fn write_nary(f: &mut fmt::Formatter<'_>, op: &str, children: &[Expression]) -> fmt::Result {
    if children.is_empty() {
        write!(f, "({})", op)
    } else {
        write!(f, "({} {})", op, children.iter().join(" "))
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Constant(b) => write!(f, "{}", b),
            Expression::Not(e) => write!(f, "(not {})", e),
            Expression::And(es) => write_nary(f, "and", es),
            Expression::Or(es) => write_nary(f, "or", es),
            Expression::Implies(l, r) => write!(f, "(=> {} {})", l, r),
            Expression::BiImplies(l, r) => write!(f, "(= {} {})", l, r),
            Expression::Literal { variable, positive: true } => write!(f, "{}", variable.name()),
            Expression::Literal { variable, positive: false } => {
                write!(f, "(not {})", variable.name())
            }
            Expression::Comparison { kind, left, right } => {
                write!(f, "({} {} {})", kind.symbol(), left, right)
            }
            Expression::AtLeast { bound, children } => {
                write_nary(f, &format!("at-least {}", bound), children)
            }
            Expression::AtMost { bound, children } => {
                write_nary(f, &format!("at-most {}", bound), children)
            }
            Expression::Between { min, max, children } => {
                write_nary(f, &format!("between {} {}", min, max), children)
            }
            Expression::Choose { bound, children } => {
                write_nary(f, &format!("choose {}", bound), children)
            }
            Expression::Exists { variable, body } => {
                write!(f, "(exists {} {})", variable.name(), body)
            }
            Expression::ForAll { variable, body } => {
                write!(f, "(forall {} {})", variable.name(), body)
            }
        }
    }
}
