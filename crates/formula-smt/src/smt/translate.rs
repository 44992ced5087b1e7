// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation from formula trees to backend expressions

use super::capabilities::Capabilities;
use super::registry::{BackendVariable, VariableRegistry};
use crate::backend::{Numeral, SolverBackend, Sort};
use crate::data::expressions::{ComparisonKind, Expression};
use crate::data::terms::{ConstantValue, FunctionKind, Term};
use crate::data::types::ValueType;
use crate::data::variables::Variable;
use crate::error::{TranslationError, TranslationResult};
use crate::options::TranslatorOptions;
use num::BigRational;

/// Translator bound to one backend context.
///
/// Every node is mapped one to one onto a backend object; nothing is simplified.
/// Variables are interned in a [`VariableRegistry`] that lives as long as the
/// translator, so repeated references yield the same backend object.
pub struct Translator<B: SolverBackend> {
    backend: B,
    capabilities: Capabilities,
    options: TranslatorOptions,
    registry: VariableRegistry<B>,
}

impl<B: SolverBackend> Translator<B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, TranslatorOptions::default())
    }

    pub fn with_options(backend: B, options: TranslatorOptions) -> Self {
        Self {
            capabilities: backend.capabilities(),
            backend,
            options,
            registry: VariableRegistry::new(),
        }
    }

    /// Bind a new backend context and return the previous one.
    ///
    /// The registry is kept: objects created in the old context stay in it. Use a
    /// fresh translator per context unless that is intended.
    pub fn rebind(&mut self, backend: B) -> B {
        if !self.registry.is_empty() {
            log::warn!(
                "rebinding translator with {} registered variables from the previous context",
                self.registry.len()
            );
        }
        self.capabilities = backend.capabilities();
        log::debug!("rebound translator, capabilities {:?}", self.capabilities);
        std::mem::replace(&mut self.backend, backend)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    pub fn set_create_variables(&mut self, create_variables: bool) {
        self.options.create_variables = create_variables;
    }

    pub fn registry(&self) -> &VariableRegistry<B> {
        &self.registry
    }

    /// Backend objects of all variables translated so far
    pub fn variable_objects(&self) -> Vec<BackendVariable<B>> {
        self.registry.objects()
    }

    /// All variables translated so far
    pub fn variables(&self) -> Vec<Variable> {
        self.registry.variables()
    }

    pub fn into_parts(self) -> (B, VariableRegistry<B>) {
        (self.backend, self.registry)
    }

    /// Register `variable` under the sort its declared type maps to, regardless of
    /// the creation policy. Used to prepare strict-mode translation.
    pub fn declare(&mut self, variable: &Variable) -> TranslationResult<BackendVariable<B>> {
        let create_variables = std::mem::replace(&mut self.options.create_variables, true);
        let declared = match variable.value_type() {
            ValueType::Bool => self.resolve_bool(variable).map(BackendVariable::Bool),
            ValueType::Integer | ValueType::Double => {
                self.resolve_numeral(variable).map(|n| match n {
                    Numeral::Integer(i) => BackendVariable::Integer(i),
                    Numeral::Rational(r) => BackendVariable::Rational(r),
                })
            }
        };
        self.options.create_variables = create_variables;
        declared
    }

    /// Translate a formula into a backend boolean expression
    pub fn translate(&mut self, expr: &Expression) -> TranslationResult<B::Bool> {
        log::trace!("translating {} node", expr.kind_name());
        match expr {
            Expression::Constant(value) => Ok(self.backend.make_bool(*value)),

            Expression::Not(operand) => {
                let operand = self.translate(operand)?;
                Ok(self.backend.not(&operand))
            }

            Expression::And(children) => {
                let children = self.translate_all(children)?;
                Ok(self.backend.and(&children))
            }

            Expression::Or(children) => {
                let children = self.translate_all(children)?;
                Ok(self.backend.or(&children))
            }

            Expression::Implies(lhs, rhs) => {
                let lhs = self.translate(lhs)?;
                let rhs = self.translate(rhs)?;
                Ok(self.backend.implies(&lhs, &rhs))
            }

            Expression::BiImplies(lhs, rhs) => {
                let lhs = self.translate(lhs)?;
                let rhs = self.translate(rhs)?;
                Ok(self.backend.equivalence(&lhs, &rhs))
            }

            Expression::Literal { variable, positive } => {
                let var = self.resolve_bool(variable)?;
                if *positive {
                    Ok(var)
                } else {
                    Ok(self.backend.not(&var))
                }
            }

            Expression::Comparison { kind, left, right } => {
                self.translate_comparison(*kind, left, right)
            }

            Expression::AtLeast { .. }
            | Expression::AtMost { .. }
            | Expression::Between { .. }
            | Expression::Choose { .. }
            | Expression::Exists { .. }
            | Expression::ForAll { .. } => Err(TranslationError::UnsupportedNode(expr.kind_name())),
        }
    }

    fn translate_all(&mut self, children: &[Expression]) -> TranslationResult<Vec<B::Bool>> {
        children.iter().map(|child| self.translate(child)).collect()
    }

    fn translate_comparison(
        &mut self,
        kind: ComparisonKind,
        left: &Term,
        right: &Term,
    ) -> TranslationResult<B::Bool> {
        // Reject rational operands before the backend sees any part of the comparison
        if !self.capabilities.rationals {
            self.capabilities.check_term(left)?;
            self.capabilities.check_term(right)?;
        }
        let lhs = self.translate_term(left)?;
        let rhs = self.translate_term(right)?;
        self.comparison(kind, &lhs, &rhs)
    }

    /// Issue a comparison between two numerals.
    ///
    /// The rational predicate family is used as soon as one operand is rational and
    /// the backend supports it; the backend coerces the other operand. Otherwise both
    /// operands must be integers.
    pub fn comparison(
        &mut self,
        kind: ComparisonKind,
        lhs: &Numeral<B>,
        rhs: &Numeral<B>,
    ) -> TranslationResult<B::Bool> {
        if (lhs.is_rational() || rhs.is_rational()) && self.capabilities.rationals {
            return self.backend.rational_compare(kind, lhs, rhs);
        }
        let lhs = expect_integer(lhs)?;
        let rhs = expect_integer(rhs)?;
        Ok(self.backend.int_compare(kind, lhs, rhs))
    }

    /// Reduce a term to a backend numeral
    pub fn translate_term(&mut self, term: &Term) -> TranslationResult<Numeral<B>> {
        match term {
            Term::Constant(ConstantValue::Integer(value)) => {
                Ok(Numeral::Integer(self.backend.int_constant(*value)))
            }

            Term::Constant(ConstantValue::Double(value)) => {
                self.capabilities.require_rationals()?;
                let rational = BigRational::from_float(*value)
                    .ok_or(TranslationError::NonFiniteConstant(*value))?;
                Ok(Numeral::Rational(self.backend.rational_constant(&rational)?))
            }

            Term::Variable(variable) => self.resolve_numeral(variable),

            Term::Function {
                kind,
                children,
                result_type,
            } => self.translate_function(*kind, children, *result_type),
        }
    }

    fn translate_function(
        &mut self,
        kind: FunctionKind,
        children: &[Term],
        result_type: ValueType,
    ) -> TranslationResult<Numeral<B>> {
        let operands = children
            .iter()
            .map(|child| self.translate_term(child))
            .collect::<TranslationResult<Vec<_>>>()?;

        match result_type {
            ValueType::Integer => {
                let operands = operands
                    .iter()
                    .map(|operand| expect_integer(operand).cloned())
                    .collect::<TranslationResult<Vec<_>>>()?;
                match kind {
                    FunctionKind::Add => Ok(Numeral::Integer(self.backend.int_add(&operands))),
                    FunctionKind::Multiply => {
                        Ok(Numeral::Integer(self.backend.int_multiply(&operands)))
                    }
                    FunctionKind::Divide => {
                        Err(TranslationError::UnsupportedFunction { kind, result_type })
                    }
                }
            }

            ValueType::Double => {
                self.capabilities.require_rationals()?;
                let result = match kind {
                    FunctionKind::Add => self.backend.rational_add(&operands)?,
                    FunctionKind::Multiply => self.backend.rational_multiply(&operands)?,
                    FunctionKind::Divide => {
                        return Err(TranslationError::UnsupportedFunction { kind, result_type })
                    }
                };
                Ok(Numeral::Rational(result))
            }

            ValueType::Bool => Err(TranslationError::UnsupportedType(result_type)),
        }
    }

    fn resolve_bool(&mut self, variable: &Variable) -> TranslationResult<B::Bool> {
        let backend = &mut self.backend;
        let resolved = self.registry.resolve(
            variable,
            Sort::Bool,
            self.options.create_variables,
            |name| Ok(BackendVariable::Bool(backend.bool_var(name))),
        )?;
        match resolved {
            BackendVariable::Bool(b) => Ok(b),
            other => Err(TranslationError::SortMismatch {
                variable: variable.name().to_string(),
                expected: Sort::Bool,
                found: other.sort(),
            }),
        }
    }

    fn resolve_numeral(&mut self, variable: &Variable) -> TranslationResult<Numeral<B>> {
        let sort = match variable.value_type() {
            ValueType::Integer => Sort::Integer,
            ValueType::Double => {
                self.capabilities.require_rationals()?;
                Sort::Rational
            }
            ValueType::Bool => return Err(TranslationError::UnsupportedType(ValueType::Bool)),
        };
        let backend = &mut self.backend;
        let resolved = self.registry.resolve(
            variable,
            sort,
            self.options.create_variables,
            |name| match sort {
                Sort::Rational => backend.rational_var(name).map(BackendVariable::Rational),
                _ => Ok(BackendVariable::Integer(backend.int_var(name))),
            },
        )?;
        resolved
            .to_numeral()
            .ok_or_else(|| TranslationError::SortMismatch {
                variable: variable.name().to_string(),
                expected: sort,
                found: Sort::Bool,
            })
    }
}

fn expect_integer<B: SolverBackend>(numeral: &Numeral<B>) -> TranslationResult<&B::Int> {
    numeral
        .as_integer()
        .ok_or(TranslationError::IncompatibleOperand {
            expected: Sort::Integer,
            found: numeral.sort(),
        })
}
