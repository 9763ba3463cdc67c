//! Error type shared by every part of the library.
//!
//! All operations are pure and deterministic, so none of these errors is
//! worth retrying with the same input. They go straight back to the caller.

use thiserror::Error;

use crate::arrangement::Arrangement;

/// Everything that can go wrong while laying out or drawing a flag.
///
/// ## Rust Lesson #20: Error Handling
///
/// `thiserror` writes the `Display` and `std::error::Error` impls for us from
/// the `#[error(...)]` attributes. Callers match on the variant they care
/// about and bubble the rest up with `?`.
#[derive(Debug, Error)]
pub enum Error {
    /// The tuple breaks the zero pattern (`a == 0` iff `b == 0`, `c == 0` iff
    /// `d == 0`) or matches none of the known row interleavings.
    #[error("invalid star arrangement {0}")]
    InvalidArrangement(Arrangement),

    /// No arrangement exists for the star count and kind filter.
    #[error("no star arrangement exists for {nstars} stars with the accepted kinds")]
    EmptyDomain { nstars: u32 },

    /// A computed value is out of range or fails a geometric sanity check.
    #[error("invalid measurements: {0}")]
    ValueInvalid(String),

    /// The shape is valid but this code path does not know how to draw it.
    #[error("not supported: {0}")]
    Unsupported(String),

    #[error("invalid color {value:?}: {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("invalid length {value:?}: {reason}")]
    InvalidLength { value: String, reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
