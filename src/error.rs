//! Errors reported by truncation passes.

use core::fmt;

/// Invalid configuration rejected before a truncation pass starts.
///
/// Measurement problems are never reported here; oracles degrade to a
/// fallback metric instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TruncateError {
    /// Line width budget was zero, negative, or not finite.
    InvalidWidth { width_px: f32 },
    /// Requested fewer than one line.
    InvalidLineCount { line_count: u32 },
    /// Font size was zero, negative, or not finite.
    InvalidFontSize { size_px: f32 },
}

impl TruncateError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidWidth { .. } => "INVALID_WIDTH",
            Self::InvalidLineCount { .. } => "INVALID_LINE_COUNT",
            Self::InvalidFontSize { .. } => "INVALID_FONT_SIZE",
        }
    }
}

impl fmt::Display for TruncateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWidth { width_px } => {
                write!(f, "{}: max width must be positive (got {})", self.code(), width_px)
            }
            Self::InvalidLineCount { line_count } => write!(
                f,
                "{}: line count must be at least 1 (got {})",
                self.code(),
                line_count
            ),
            Self::InvalidFontSize { size_px } => {
                write!(f, "{}: font size must be positive (got {})", self.code(), size_px)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TruncateError {}
