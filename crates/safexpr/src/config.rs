//! Evaluation limits.

use serde::{Deserialize, Serialize};

use safexpr_parser::{ValidatorConfig, DEFAULT_MAX_DEPTH};

/// Default bound on source length, in bytes.
pub const DEFAULT_MAX_SOURCE_LEN: usize = 64 * 1024;

/// Resource bounds applied to one evaluation.
///
/// Missing fields take their defaults, so an empty TOML table or JSON
/// object deserializes to [`EvalConfig::default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Deepest allowed parenthesis nesting. Values above
    /// [`MAX_DEPTH_CEILING`](crate::MAX_DEPTH_CEILING) are enforced as the
    /// ceiling.
    pub max_depth: usize,
    /// Longest accepted source text, in bytes, before normalization.
    pub max_source_len: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

impl EvalConfig {
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig {
            max_depth: self.max_depth,
        }
    }
}
