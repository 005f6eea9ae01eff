//! Result type aliases for Sisyphus.

use crate::SisyphusError;

/// A specialized `Result` type for Sisyphus operations.
pub type SisyphusResult<T> = Result<T, SisyphusError>;
