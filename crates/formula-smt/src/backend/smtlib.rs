// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! SMT-LIB 2 backend
//!
//! Builds terms as shared s-expressions instead of handing them to a solver library.
//! Every factory call allocates a new node, so two results are the same backend
//! object exactly when [`SExpr::same`] holds. Constants are declared once per
//! (name, sort) pair and the resulting script can be piped into any SMT-LIB solver.

use super::{Numeral, SolverBackend, Sort};
use crate::data::expressions::ComparisonKind;
use crate::error::TranslationResult;
use crate::smt::Capabilities;
use itertools::Itertools;
use num::{BigInt, BigRational, One, Signed};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq)]
enum Node {
    Atom(String),
    List(Vec<SExpr>),
}

/// Shared s-expression node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SExpr(Rc<Node>);

impl SExpr {
    pub fn atom(text: impl Into<String>) -> Self {
        SExpr(Rc::new(Node::Atom(text.into())))
    }

    pub fn list(items: Vec<SExpr>) -> Self {
        SExpr(Rc::new(Node::List(items)))
    }

    fn apply(op: &str, args: impl IntoIterator<Item = SExpr>) -> Self {
        let mut items = vec![SExpr::atom(op)];
        items.extend(args);
        SExpr::list(items)
    }

    /// Whether both handles refer to the very same node
    pub fn same(&self, other: &SExpr) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for SExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            Node::Atom(text) => write!(f, "{}", text),
            Node::List(items) => write!(f, "({})", items.iter().join(" ")),
        }
    }
}

const RESERVED: &[&str] = &[
    "!", "_", "as", "assert", "check-sat", "declare-const", "declare-fun", "define-fun",
    "exists", "forall", "let", "match", "par", "true", "false", "and", "or", "not", "=>",
    "ite", "distinct", "BINARY", "DECIMAL", "HEXADECIMAL", "NUMERAL", "STRING",
];

fn is_simple_symbol(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => return false,
        Some(c) if c.is_ascii_digit() => return false,
        _ => {}
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || "~!@$%^&*_-+=<>.?/".contains(c))
        && !RESERVED.contains(&name)
}

/// Escape a variable name into an SMT-LIB symbol
pub fn escape_symbol(name: &str) -> String {
    if is_simple_symbol(name) {
        name.to_string()
    } else {
        format!("|{}|", name.replace(['|', '\\'], "_"))
    }
}

/// Symbol as the solver sees it: `|a_b|` and `a_b` are the same symbol
fn symbol_body(symbol: &str) -> &str {
    symbol
        .strip_prefix('|')
        .and_then(|s| s.strip_suffix('|'))
        .unwrap_or(symbol)
}

fn sort_name(sort: Sort) -> &'static str {
    match sort {
        Sort::Bool => "Bool",
        Sort::Integer => "Int",
        Sort::Rational => "Real",
    }
}

fn int_literal(value: &BigInt) -> SExpr {
    if value.is_negative() {
        SExpr::apply("-", [SExpr::atom(value.abs().to_string())])
    } else {
        SExpr::atom(value.to_string())
    }
}

fn real_literal(value: &BigRational) -> SExpr {
    let magnitude = value.abs();
    let unsigned = if magnitude.denom().is_one() {
        SExpr::atom(format!("{}.0", magnitude.numer()))
    } else {
        SExpr::apply(
            "/",
            [
                SExpr::atom(format!("{}.0", magnitude.numer())),
                SExpr::atom(format!("{}.0", magnitude.denom())),
            ],
        )
    };
    if value.is_negative() {
        SExpr::apply("-", [unsigned])
    } else {
        unsigned
    }
}

/// Backend producing SMT-LIB 2 terms
#[derive(Debug, Clone)]
pub struct SmtLibBackend {
    capabilities: Capabilities,
    /// Declared constants in creation order (symbol, sort)
    declarations: Vec<(String, Sort)>,
    /// (name, sort) -> declared constant
    constants: HashMap<(String, Sort), SExpr>,
    /// Bodies of declared symbols, without `|` quotes
    symbols: HashSet<String>,
}

impl Default for SmtLibBackend {
    fn default() -> Self {
        Self::with_capabilities(Capabilities::all())
    }
}

impl SmtLibBackend {
    /// Backend with integer and rational arithmetic
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend restricted to integer arithmetic, as for solvers without a real theory
    pub fn integer_only() -> Self {
        Self::with_capabilities(Capabilities::integer_only())
    }

    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self {
            capabilities,
            declarations: Vec::new(),
            constants: HashMap::new(),
            symbols: HashSet::new(),
        }
    }

    /// Declared constants in creation order
    pub fn declarations(&self) -> &[(String, Sort)] {
        &self.declarations
    }

    /// Render declarations and assertions as an SMT-LIB script
    pub fn script<'a>(&self, assertions: impl IntoIterator<Item = &'a SExpr>) -> String {
        let mut out = String::new();
        for (symbol, sort) in &self.declarations {
            out.push_str(&format!("(declare-const {} {})\n", symbol, sort_name(*sort)));
        }
        for assertion in assertions {
            out.push_str(&format!("(assert {})\n", assertion));
        }
        out.push_str("(check-sat)\n");
        out
    }

    fn constant(&mut self, name: &str, sort: Sort) -> SExpr {
        let key = (name.to_string(), sort);
        if let Some(existing) = self.constants.get(&key) {
            return existing.clone();
        }
        // A taken symbol gets a sort-qualified one, then a numbered one
        let mut symbol = escape_symbol(name);
        if self.symbols.contains(symbol_body(&symbol)) {
            symbol = escape_symbol(&format!("{}@{}", name, sort_name(sort)));
        }
        let mut suffix = 1;
        while self.symbols.contains(symbol_body(&symbol)) {
            symbol = escape_symbol(&format!("{}@{}{}", name, sort_name(sort), suffix));
            suffix += 1;
        }
        log::trace!("declaring {} as {}", symbol, sort_name(sort));
        self.symbols.insert(symbol_body(&symbol).to_string());
        self.declarations.push((symbol.clone(), sort));
        let expr = SExpr::atom(symbol);
        self.constants.insert(key, expr.clone());
        expr
    }

    fn to_real(operand: &Numeral<Self>) -> SExpr {
        match operand {
            Numeral::Integer(i) => SExpr::apply("to_real", [i.clone()]),
            Numeral::Rational(r) => r.clone(),
        }
    }

    fn fold(op: &str, neutral: &str, operands: &[SExpr]) -> SExpr {
        match operands {
            [] => SExpr::atom(neutral),
            [single] => single.clone(),
            _ => SExpr::apply(op, operands.iter().cloned()),
        }
    }
}

impl SolverBackend for SmtLibBackend {
    type Bool = SExpr;
    type Int = SExpr;
    type Rational = SExpr;

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    fn make_bool(&mut self, value: bool) -> SExpr {
        SExpr::atom(if value { "true" } else { "false" })
    }

    fn bool_var(&mut self, name: &str) -> SExpr {
        self.constant(name, Sort::Bool)
    }

    fn not(&mut self, operand: &SExpr) -> SExpr {
        SExpr::apply("not", [operand.clone()])
    }

    fn and(&mut self, operands: &[SExpr]) -> SExpr {
        Self::fold("and", "true", operands)
    }

    fn or(&mut self, operands: &[SExpr]) -> SExpr {
        Self::fold("or", "false", operands)
    }

    fn implies(&mut self, lhs: &SExpr, rhs: &SExpr) -> SExpr {
        SExpr::apply("=>", [lhs.clone(), rhs.clone()])
    }

    fn equivalence(&mut self, lhs: &SExpr, rhs: &SExpr) -> SExpr {
        SExpr::apply("=", [lhs.clone(), rhs.clone()])
    }

    fn int_constant(&mut self, value: i64) -> SExpr {
        int_literal(&BigInt::from(value))
    }

    fn int_var(&mut self, name: &str) -> SExpr {
        self.constant(name, Sort::Integer)
    }

    fn int_add(&mut self, operands: &[SExpr]) -> SExpr {
        Self::fold("+", "0", operands)
    }

    fn int_multiply(&mut self, operands: &[SExpr]) -> SExpr {
        Self::fold("*", "1", operands)
    }

    fn int_compare(&mut self, kind: ComparisonKind, lhs: &SExpr, rhs: &SExpr) -> SExpr {
        SExpr::apply(kind.symbol(), [lhs.clone(), rhs.clone()])
    }

    fn rational_constant(&mut self, value: &BigRational) -> TranslationResult<SExpr> {
        Ok(real_literal(value))
    }

    fn rational_var(&mut self, name: &str) -> TranslationResult<SExpr> {
        Ok(self.constant(name, Sort::Rational))
    }

    fn rational_add(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<SExpr> {
        let operands: Vec<SExpr> = operands.iter().map(Self::to_real).collect();
        Ok(Self::fold("+", "0.0", &operands))
    }

    fn rational_multiply(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<SExpr> {
        let operands: Vec<SExpr> = operands.iter().map(Self::to_real).collect();
        Ok(Self::fold("*", "1.0", &operands))
    }

    fn rational_compare(
        &mut self,
        kind: ComparisonKind,
        lhs: &Numeral<Self>,
        rhs: &Numeral<Self>,
    ) -> TranslationResult<SExpr> {
        Ok(SExpr::apply(
            kind.symbol(),
            [Self::to_real(lhs), Self::to_real(rhs)],
        ))
    }
}
