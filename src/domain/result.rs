//! Result type alias for Argus operations

use super::errors::ArgusError;

/// Result type used throughout Argus
pub type Result<T> = std::result::Result<T, ArgusError>;
