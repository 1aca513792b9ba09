//! Run configuration
//!
//! Everything the interpreter needs to know besides the program itself.
//! Defaults reproduce the conventional `App.main` entry point.

use serde::{Deserialize, Serialize};

/// How method bodies are turned into statements
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatementMode {
    /// Unrecognized statements are errors and `;` is required
    #[default]
    Strict,
    /// Unrecognized tokens are skipped one at a time and `;` is optional
    Lenient,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub entry_contract: String,
    pub entry_method: String,
    pub mode: StatementMode,
    /// Maximum nesting of interpreted method calls
    pub max_call_depth: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            entry_contract: "App".to_string(),
            entry_method: "main".to_string(),
            mode: StatementMode::Strict,
            max_call_depth: 256,
        }
    }
}
