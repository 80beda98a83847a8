//! Errors raised while assembling a patch from raw data.

use thiserror::Error;

/// Raw arrays handed to a patch do not match its extent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A field has the wrong number of values.
    #[error("field `{field}` has {actual} values, expected {expected}")]
    LengthMismatch {
        /// Field name
        field: &'static str,
        /// Ghost-inclusive length required by the extent
        expected: usize,
        /// Length supplied
        actual: usize,
    },
}

/// Check that `data` holds `expected` values.
pub(crate) fn check_len(field: &'static str, data: &[crate::types::Real], expected: usize) -> Result<(), GridError> {
    if data.len() == expected {
        Ok(())
    } else {
        Err(GridError::LengthMismatch {
            field,
            expected,
            actual: data.len(),
        })
    }
}
