// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Variable Registry - one backend object per variable
//!
//! Entries are created lazily the first time a variable is translated and then
//! reused for every later reference, so the caller can map a model of the backend
//! back onto the formula's variables.

use crate::backend::{Numeral, SolverBackend, Sort};
use crate::data::variables::Variable;
use crate::error::{TranslationError, TranslationResult};
use std::collections::HashMap;
use std::fmt;

/// Backend object created for a variable
pub enum BackendVariable<B: SolverBackend> {
    Bool(B::Bool),
    Integer(B::Int),
    Rational(B::Rational),
}

impl<B: SolverBackend> BackendVariable<B> {
    pub fn sort(&self) -> Sort {
        match self {
            BackendVariable::Bool(_) => Sort::Bool,
            BackendVariable::Integer(_) => Sort::Integer,
            BackendVariable::Rational(_) => Sort::Rational,
        }
    }

    pub fn as_bool(&self) -> Option<&B::Bool> {
        match self {
            BackendVariable::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Numeral view of integer and rational variables
    pub fn to_numeral(&self) -> Option<Numeral<B>> {
        match self {
            BackendVariable::Bool(_) => None,
            BackendVariable::Integer(i) => Some(Numeral::Integer(i.clone())),
            BackendVariable::Rational(r) => Some(Numeral::Rational(r.clone())),
        }
    }
}

impl<B: SolverBackend> Clone for BackendVariable<B> {
    fn clone(&self) -> Self {
        match self {
            BackendVariable::Bool(b) => BackendVariable::Bool(b.clone()),
            BackendVariable::Integer(i) => BackendVariable::Integer(i.clone()),
            BackendVariable::Rational(r) => BackendVariable::Rational(r.clone()),
        }
    }
}

impl<B: SolverBackend> fmt::Debug for BackendVariable<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendVariable::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            BackendVariable::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            BackendVariable::Rational(r) => f.debug_tuple("Rational").field(r).finish(),
        }
    }
}

/// Registry of translated variables, in creation order
pub struct VariableRegistry<B: SolverBackend> {
    /// Maps a variable to its position in `entries`
    index: HashMap<Variable, usize>,
    entries: Vec<(Variable, BackendVariable<B>)>,
}

impl<B: SolverBackend> Default for VariableRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: SolverBackend> Clone for VariableRegistry<B> {
    fn clone(&self) -> Self {
        Self {
            index: self.index.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<B: SolverBackend> fmt::Debug for VariableRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(v, o)| (v, o)))
            .finish()
    }
}

impl<B: SolverBackend> VariableRegistry<B> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, variable: &Variable) -> Option<&BackendVariable<B>> {
        self.index.get(variable).map(|&i| &self.entries[i].1)
    }

    /// Snapshot of all registered variables
    pub fn variables(&self) -> Vec<Variable> {
        self.entries.iter().map(|(v, _)| v.clone()).collect()
    }

    /// Snapshot of all backend objects created so far
    pub fn objects(&self) -> Vec<BackendVariable<B>> {
        self.entries.iter().map(|(_, o)| o.clone()).collect()
    }

    /// Look up `variable` under `sort`, creating it through `create` when absent.
    ///
    /// Creation only happens when `allow_creation` is set; otherwise an unseen variable
    /// fails with [`TranslationError::VariableNotPreregistered`] and `create` is not
    /// called.
    pub fn resolve<F>(
        &mut self,
        variable: &Variable,
        sort: Sort,
        allow_creation: bool,
        create: F,
    ) -> TranslationResult<BackendVariable<B>>
    where
        F: FnOnce(&str) -> TranslationResult<BackendVariable<B>>,
    {
        if let Some(existing) = self.get(variable) {
            if existing.sort() != sort {
                return Err(TranslationError::SortMismatch {
                    variable: variable.name().to_string(),
                    expected: sort,
                    found: existing.sort(),
                });
            }
            return Ok(existing.clone());
        }

        if !allow_creation {
            return Err(TranslationError::VariableNotPreregistered(
                variable.name().to_string(),
            ));
        }

        let created = create(variable.name())?;
        debug_assert_eq!(created.sort(), sort);
        log::debug!("created backend variable for {} as {}", variable, sort);
        self.index.insert(variable.clone(), self.entries.len());
        self.entries.push((variable.clone(), created.clone()));
        Ok(created)
    }
}
