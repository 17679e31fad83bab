//! Evaluation limits from a TOML file.
//!
//! ```toml
//! max_depth = 64
//! max_source_len = 4096
//! ```
//!
//! Missing keys keep their defaults; unknown keys are rejected.

use std::fs;
use std::path::Path;

use safexpr::EvalConfig;

use crate::error::{CliError, CliResult};

pub fn load_config(path: &Path) -> CliResult<EvalConfig> {
    let text = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| CliError::Config {
        path: path.to_path_buf(),
        source,
    })
}
