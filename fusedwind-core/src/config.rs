//! Configuration of the contract checks.
//!
//! ```toml
//! # fusedwind.toml
//! strict_kinds = true
//! ```

use crate::errors::{ContractError, ContractResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Options controlling how declarations are checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContractConfig {
    /// Also require fields shared with a base to be declared with the same kind
    pub strict_kinds: bool,
}

impl ContractConfig {
    pub fn from_toml_str(content: &str) -> ContractResult<Self> {
        toml::from_str(content).map_err(|e| ContractError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> ContractResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ContractError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }
}
