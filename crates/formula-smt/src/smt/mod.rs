// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Translation of formulas into backend expressions
//!
//! - Dispatch of expression and term nodes onto backend factory operations
//! - Registry keeping one backend object per variable
//! - Capability guard for backends without rational arithmetic

mod capabilities;
mod registry;
mod translate;

pub use crate::backend::Sort;
pub use capabilities::Capabilities;
pub use registry::{BackendVariable, VariableRegistry};
pub use translate::Translator;
