use std::io;
use std::path::PathBuf;

use safexpr::BindingsError;
use thiserror::Error;

/// Failures outside expression evaluation itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Bindings(#[from] BindingsError),
}

pub type CliResult<T> = Result<T, CliError>;
