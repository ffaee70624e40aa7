//! Result type alias for formula parsing operations

use crate::error::MolarError;

/// Standard Result type for formula parsing operations
pub type Result<T> = std::result::Result<T, MolarError>;
