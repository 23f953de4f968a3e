//! Framework error type.
//!
//! Sub-crates define their own error enums; `CoreError` only covers the
//! primitives in this crate.

use thiserror::Error;

/// The error type for `wd-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `wd-core`.
pub type CoreResult<T> = Result<T, CoreError>;
