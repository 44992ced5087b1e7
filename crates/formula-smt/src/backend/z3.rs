// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Z3 backend

use super::{Numeral, SolverBackend};
use crate::data::expressions::ComparisonKind;
use crate::data::types::ValueType;
use crate::error::{TranslationError, TranslationResult};
use crate::smt::Capabilities;
use num::BigRational;
use z3::ast::{Ast, Bool, Int, Real};
use z3::{Config, Context};

/// Backend building expressions in a Z3 context
pub struct Z3Backend<'ctx> {
    ctx: &'ctx Context,
}

impl<'ctx> Z3Backend<'ctx> {
    pub fn new(ctx: &'ctx Context) -> Self {
        Self { ctx }
    }

    fn to_real(operand: &Numeral<Self>) -> Real<'ctx> {
        match operand {
            Numeral::Integer(i) => i.to_real(),
            Numeral::Rational(r) => r.clone(),
        }
    }

    fn reals(operands: &[Numeral<Self>]) -> Vec<Real<'ctx>> {
        operands.iter().map(Self::to_real).collect()
    }
}

fn compare<'ctx, T>(kind: ComparisonKind, lhs: &T, rhs: &T) -> Bool<'ctx>
where
    T: Ordered<'ctx>,
{
    match kind {
        ComparisonKind::LessThan => lhs.lt_(rhs),
        ComparisonKind::GreaterThan => lhs.gt_(rhs),
        ComparisonKind::LessEqual => lhs.le_(rhs),
        ComparisonKind::GreaterEqual => lhs.ge_(rhs),
        ComparisonKind::Equals => lhs._eq(rhs),
    }
}

/// Ordering predicates shared by `Int` and `Real`
trait Ordered<'ctx>: Ast<'ctx> {
    fn lt_(&self, other: &Self) -> Bool<'ctx>;
    fn gt_(&self, other: &Self) -> Bool<'ctx>;
    fn le_(&self, other: &Self) -> Bool<'ctx>;
    fn ge_(&self, other: &Self) -> Bool<'ctx>;
}

macro_rules! impl_ordered {
    ($ty:ident) => {
        impl<'ctx> Ordered<'ctx> for $ty<'ctx> {
            fn lt_(&self, other: &Self) -> Bool<'ctx> {
                self.lt(other)
            }
            fn gt_(&self, other: &Self) -> Bool<'ctx> {
                self.gt(other)
            }
            fn le_(&self, other: &Self) -> Bool<'ctx> {
                self.le(other)
            }
            fn ge_(&self, other: &Self) -> Bool<'ctx> {
                self.ge(other)
            }
        }
    };
}

impl_ordered!(Int);
impl_ordered!(Real);

impl<'ctx> SolverBackend for Z3Backend<'ctx> {
    type Bool = Bool<'ctx>;
    type Int = Int<'ctx>;
    type Rational = Real<'ctx>;

    fn capabilities(&self) -> Capabilities {
        Capabilities::all()
    }

    fn make_bool(&mut self, value: bool) -> Bool<'ctx> {
        Bool::from_bool(self.ctx, value)
    }

    fn bool_var(&mut self, name: &str) -> Bool<'ctx> {
        Bool::new_const(self.ctx, name)
    }

    fn not(&mut self, operand: &Bool<'ctx>) -> Bool<'ctx> {
        operand.not()
    }

    fn and(&mut self, operands: &[Bool<'ctx>]) -> Bool<'ctx> {
        let refs: Vec<&Bool<'ctx>> = operands.iter().collect();
        Bool::and(self.ctx, &refs)
    }

    fn or(&mut self, operands: &[Bool<'ctx>]) -> Bool<'ctx> {
        let refs: Vec<&Bool<'ctx>> = operands.iter().collect();
        Bool::or(self.ctx, &refs)
    }

    fn implies(&mut self, lhs: &Bool<'ctx>, rhs: &Bool<'ctx>) -> Bool<'ctx> {
        lhs.implies(rhs)
    }

    fn equivalence(&mut self, lhs: &Bool<'ctx>, rhs: &Bool<'ctx>) -> Bool<'ctx> {
        lhs.iff(rhs)
    }

    fn int_constant(&mut self, value: i64) -> Int<'ctx> {
        Int::from_i64(self.ctx, value)
    }

    fn int_var(&mut self, name: &str) -> Int<'ctx> {
        Int::new_const(self.ctx, name)
    }

    fn int_add(&mut self, operands: &[Int<'ctx>]) -> Int<'ctx> {
        let refs: Vec<&Int<'ctx>> = operands.iter().collect();
        Int::add(self.ctx, &refs)
    }

    fn int_multiply(&mut self, operands: &[Int<'ctx>]) -> Int<'ctx> {
        let refs: Vec<&Int<'ctx>> = operands.iter().collect();
        Int::mul(self.ctx, &refs)
    }

    fn int_compare(&mut self, kind: ComparisonKind, lhs: &Int<'ctx>, rhs: &Int<'ctx>) -> Bool<'ctx> {
        compare(kind, lhs, rhs)
    }

    fn rational_constant(&mut self, value: &BigRational) -> TranslationResult<Real<'ctx>> {
        Real::from_real_str(
            self.ctx,
            &value.numer().to_string(),
            &value.denom().to_string(),
        )
        .ok_or(TranslationError::BackendUnsupportedType(ValueType::Double))
    }

    fn rational_var(&mut self, name: &str) -> TranslationResult<Real<'ctx>> {
        Ok(Real::new_const(self.ctx, name))
    }

    fn rational_add(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<Real<'ctx>> {
        let reals = Self::reals(operands);
        let refs: Vec<&Real<'ctx>> = reals.iter().collect();
        Ok(Real::add(self.ctx, &refs))
    }

    fn rational_multiply(&mut self, operands: &[Numeral<Self>]) -> TranslationResult<Real<'ctx>> {
        let reals = Self::reals(operands);
        let refs: Vec<&Real<'ctx>> = reals.iter().collect();
        Ok(Real::mul(self.ctx, &refs))
    }

    fn rational_compare(
        &mut self,
        kind: ComparisonKind,
        lhs: &Numeral<Self>,
        rhs: &Numeral<Self>,
    ) -> TranslationResult<Bool<'ctx>> {
        Ok(compare(kind, &Self::to_real(lhs), &Self::to_real(rhs)))
    }
}

/// Create a new Z3 config with reasonable defaults
pub fn default_config() -> Config {
    let mut cfg = Config::new();
    cfg.set_timeout_msec(5000);
    cfg
}

/// Create a new Z3 context with default config
pub fn new_context() -> Context {
    Context::new(&default_config())
}
