// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

//! Formula model consumed by the translator
//!
//! Formulas are built by an external parser or builder; this module only defines the
//! closed set of node kinds the translator dispatches over.

pub mod expressions;
pub mod terms;
pub mod types;
pub mod variables;
