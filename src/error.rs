//! Defines [`GeomSerdeError`], representing all errors returned by this crate.

use std::collections::TryReserveError;
use std::fmt::Debug;

use arrow_schema::ArrowError;
use thiserror::Error;

/// Enum with all errors in this crate.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GeomSerdeError {
    /// The geometry type in a buffer header is outside the defined range.
    #[error("Unknown geometry type: {0}")]
    UnknownGeometryType(u8),

    /// The coordinate type in a buffer header is outside the defined range.
    #[error("Unknown coordinate type: {0}")]
    UnknownCoordinateType(u8),

    /// The geometry type is known but cannot be encoded or decoded.
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),

    /// The input cannot be interpreted at all, e.g. a buffer shorter than a header.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The buffer declares more data than it holds.
    #[error("Buffer to be deserialized is incomplete: need {needed} bytes, {available} available")]
    IncompleteBuffer {
        /// Bytes required by the read step that failed
        needed: usize,
        /// Bytes left in the region being read
        available: usize,
    },

    /// The buffer is large enough but its contents are inconsistent.
    #[error("Bad serialized geometry buffer: {0}")]
    BadBuffer(String),

    /// The geometry provider reported a failure.
    #[error("Geometry provider error: {0}")]
    Provider(String),

    /// A scratch or output allocation failed.
    #[error("Out of memory")]
    Alloc(#[from] TryReserveError),

    /// An internal size computation did not hold.
    #[error("Internal error: {0}")]
    Internal(String),

    /// [ArrowError]
    #[error(transparent)]
    Arrow(#[from] ArrowError),
}

/// Crate-specific result type.
pub type GeomSerdeResult<T> = std::result::Result<T, GeomSerdeError>;

impl From<GeomSerdeError> for ArrowError {
    /// Arrow kernels that accept callbacks expect an ArrowError, so this conversion keeps those
    /// call sites short.
    fn from(err: GeomSerdeError) -> Self {
        match err {
            GeomSerdeError::Arrow(err) => err,
            _ => ArrowError::ExternalError(Box::new(err)),
        }
    }
}
