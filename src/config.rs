//! Compiler configuration

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Deepest matrix nesting accepted by the compiler and the wire codec
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Options for [`Compiler`](crate::Compiler)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    /// Matrices at this depth or deeper are rejected; the root is depth 0
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CompileOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Load options from JSON text; missing keys take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
