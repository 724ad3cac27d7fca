//! Error types.

use thiserror::Error;

/// Errors returned by [VpTree](crate::vp::VpTree) construction and queries.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum VpTreeError {
    /// A tree can't be built from zero points.
    #[error("points can not be empty")]
    EmptyInput,

    /// A k-nearest-neighbor query asked for no neighbors.
    #[error("number of neighbors must be strictly positive, got {k}")]
    InvalidArgument { k: usize },
}

/// Shorthand for results with a [VpTreeError].
pub type Result<T, E = VpTreeError> = std::result::Result<T, E>;
