//! Conversion limits
//!
//! Limits bound what the converter accepts: how deep a host object graph may
//! nest before the dispatcher gives up, and how long a bin name may be under
//! strict mode.
//!
//! ## Contract
//!
//! Violations are reported as [`LimitError`] and converted into the
//! conversion error taxonomy: an over-long bin name is `BinNameTooLong`, an
//! over-deep graph is `ClientError`.

use crate::error::ConversionError;
use crate::record::BIN_NAME_MAX_LEN;
use thiserror::Error;

/// Conversion limits
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth of lists and maps (default: 128)
    pub max_nesting_depth: usize,

    /// Maximum bin name length in bytes under strict mode (default: 14)
    pub bin_name_max_len: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_nesting_depth: 128,
            bin_name_max_len: BIN_NAME_MAX_LEN,
        }
    }
}

impl Limits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        Limits {
            max_nesting_depth: 4,
            bin_name_max_len: BIN_NAME_MAX_LEN,
        }
    }

    /// Validate a bin name length
    pub fn validate_bin_name(&self, name: &str) -> Result<(), LimitError> {
        if name.len() > self.bin_name_max_len {
            return Err(LimitError::BinNameTooLong {
                actual: name.len(),
                max: self.bin_name_max_len,
            });
        }
        Ok(())
    }

    /// Validate a nesting depth reached by the dispatcher
    pub fn validate_depth(&self, depth: usize) -> Result<(), LimitError> {
        if depth > self.max_nesting_depth {
            return Err(LimitError::NestingTooDeep {
                actual: depth,
                max: self.max_nesting_depth,
            });
        }
        Ok(())
    }
}

/// Limit validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LimitError {
    /// Bin name exceeds maximum length
    #[error("A bin name should not exceed {max} characters limit")]
    BinNameTooLong {
        /// Actual length in bytes
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Object graph nests deeper than allowed
    #[error("Nesting too deep: {actual} levels exceeds maximum {max}")]
    NestingTooDeep {
        /// Depth reached
        actual: usize,
        /// Maximum allowed depth
        max: usize,
    },
}

impl LimitError {
    /// Get the reason code
    pub fn reason_code(&self) -> &'static str {
        match self {
            LimitError::BinNameTooLong { .. } => "bin_name_too_long",
            LimitError::NestingTooDeep { .. } => "nesting_too_deep",
        }
    }
}

impl From<LimitError> for ConversionError {
    #[track_caller]
    fn from(err: LimitError) -> Self {
        match err {
            LimitError::BinNameTooLong { .. } => ConversionError::bin_name(err.to_string()),
            LimitError::NestingTooDeep { .. } => ConversionError::client(err.to_string()),
        }
    }
}
