// Copyright (c) Asymptotic Labs
// SPDX-License-Identifier: Apache-2.0

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling a translator. Usually built in code; can also be read from a
/// toml source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TranslatorOptions {
    /// Whether variables unknown to the registry are created on first reference.
    /// When false, every variable must be declared before translation.
    pub create_variables: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            create_variables: true,
        }
    }
}

impl TranslatorOptions {
    /// Options for translating against variables declared up front
    pub fn strict() -> Self {
        Self {
            create_variables: false,
        }
    }

    pub fn from_toml_str(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading translator options from {}", path.display()))?;
        Self::from_toml_str(&source)
            .with_context(|| format!("parsing translator options in {}", path.display()))
    }
}
