//! Tunables for truncation passes and the resize-driven host.

/// Default pixels subtracted from the observed content width.
///
/// Without it, rendered text occasionally overflows the box by a pixel or two.
pub const DEFAULT_WIDTH_MARGIN_PX: f32 = 7.0;

/// Default overshoot past the final line after which the pass stops.
pub const DEFAULT_OVERSHOOT_MARGIN_PX: f32 = 100.0;

/// Options for a single truncation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TruncateOptions {
    /// How far the overflow text may run past `line_count * max_width_px`
    /// before the pass stops collecting characters.
    pub overshoot_margin_px: f32,
}

impl Default for TruncateOptions {
    fn default() -> Self {
        Self {
            overshoot_margin_px: DEFAULT_OVERSHOOT_MARGIN_PX,
        }
    }
}

/// Host-level configuration for an [`EllipsisBox`](crate::EllipsisBox).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EllipsisConfig {
    /// Safety margin subtracted from the observed content width.
    pub width_margin_px: f32,
    /// Overshoot margin forwarded to each truncation pass.
    pub overshoot_margin_px: f32,
}

impl EllipsisConfig {
    /// Line width budget for an observed content width.
    pub fn max_width_for(self, content_width_px: f32) -> f32 {
        content_width_px - self.width_margin_px
    }

    /// Per-pass options derived from this config.
    pub fn truncate_options(self) -> TruncateOptions {
        TruncateOptions {
            overshoot_margin_px: self.overshoot_margin_px,
        }
    }
}

impl Default for EllipsisConfig {
    fn default() -> Self {
        Self {
            width_margin_px: DEFAULT_WIDTH_MARGIN_PX,
            overshoot_margin_px: DEFAULT_OVERSHOOT_MARGIN_PX,
        }
    }
}
