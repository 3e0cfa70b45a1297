use thiserror::Error;

use crate::coordinate::Axis;

/// Errors produced by type operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("{axis} index {value} out of range 0..{bound}")]
    OutOfRange { axis: Axis, value: i64, bound: usize },
}
