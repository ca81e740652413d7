//! The one error family the library produces on its own behalf.
//! Everything here is an invalid-parameter condition caught before any
//! evaluation begins; encoding failures are plain `std::io::Error` and
//! are not wrapped.

use failure::Fail;

/// A parameter that fails validation at the grid or renderer boundary.
/// Validation happens exactly once, up front; the per-sample evaluators
/// assume valid input and let IEEE special values propagate naturally.
#[derive(Debug, Fail, PartialEq)]
pub enum ParameterError {
    /// The pixel grid has a zero dimension.
    #[fail(display = "the pixel grid must be at least 1x1, got {}x{}", _0, _1)]
    EmptyGrid(usize, usize),

    /// A corner coordinate is NaN or infinite.
    #[fail(display = "the plane corner coordinates must be finite")]
    NonFiniteCorner,

    /// The lower-left corner is not left of and below the upper-right.
    #[fail(
        display = "the left lower corner is not to the left of and below the right upper corner"
    )]
    InvertedCorners,

    /// The iteration cap would allow no work at all.
    #[fail(display = "the iteration limit must be at least 1")]
    ZeroIterationLimit,

    /// The divergence radius does not bound any orbit.
    #[fail(display = "the divergence radius must be positive, got {}", _0)]
    NonPositiveRadius(f64),
}
