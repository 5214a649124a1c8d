//! Pixel-accurate multi-line text truncation.
//!
//! `ellipsis-fit` splits a block of text into a *top block* that fills the
//! first `line_count - 1` lines of a box and an *overflow line* that the
//! renderer clips with an ellipsis. Widths come from a [`WidthOracle`], so
//! the split is accurate for proportional fonts.
//!
//! # Usage
//!
//! ```rust
//! use ellipsis_fit::{truncate, FixedAdvanceOracle, FontSpec, TruncationRequest};
//!
//! # fn example() -> Result<(), ellipsis_fit::TruncateError> {
//! let font = FontSpec::new(16.0, "monospace");
//! let oracle = FixedAdvanceOracle::new(10.0);
//! let request = TruncationRequest::new(
//!     "The quick brown fox jumps over the lazy dog",
//!     210.0,
//!     2,
//!     &font,
//! );
//! let result = truncate(&request, &oracle)?;
//! assert_eq!(result.top_text, "The quick brown fox");
//! assert!(result.overflow_text.starts_with("jumps"));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

extern crate alloc;

pub mod config;
pub mod error;
pub mod font;
pub mod host;
pub mod measure;
pub mod truncate;

pub use config::{EllipsisConfig, TruncateOptions};
pub use error::TruncateError;
pub use font::FontSpec;
pub use host::{EllipsisBox, RecordingSink, Reflow, RenderSink};
#[cfg(feature = "std")]
pub use measure::CachedOracle;
pub use measure::{FixedAdvanceOracle, HeuristicOracle, WidthOracle};
pub use truncate::{
    truncate, TruncateDiagnostics, TruncationRequest, TruncationResult, TruncationSpans, Truncator,
};
