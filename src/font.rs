//! Rendered font description.

use alloc::format;
use alloc::string::{String, ToString};

const DEFAULT_FAMILY: &str = "serif";

/// Font size and family used to measure text.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontSpec {
    /// Font size in pixels.
    pub size_px: f32,
    /// Single family name (never a comma-separated stack).
    pub family: String,
}

impl FontSpec {
    /// Build a font description. Only the first entry of a family stack is kept.
    pub fn new(size_px: f32, family: &str) -> Self {
        Self {
            size_px,
            family: first_family(family),
        }
    }

    /// Build a font description from computed CSS `font-size` and
    /// `font-family` values.
    ///
    /// The size keeps the integer part of values like `"16px"` or `"15.5px"`.
    /// Unparseable sizes yield `0.0`, which truncation rejects as invalid.
    pub fn from_css(font_size: &str, font_family: &str) -> Self {
        Self {
            size_px: parse_px_prefix(font_size),
            family: first_family(font_family),
        }
    }

    /// Canvas-style shorthand, e.g. `"16px Georgia"`.
    pub fn css_shorthand(&self) -> String {
        format!("{}px {}", self.size_px, self.family)
    }

    /// ASCII case-insensitive substring match on the family name.
    pub fn family_contains(&self, needle: &str) -> bool {
        let needle = needle.as_bytes();
        if needle.is_empty() {
            return true;
        }
        self.family
            .as_bytes()
            .windows(needle.len())
            .any(|window| window.eq_ignore_ascii_case(needle))
    }

    /// Whether the family names a fixed-advance font.
    pub fn is_monospace(&self) -> bool {
        self.family_contains("mono")
            || self.family_contains("fixed")
            || self.family_contains("courier")
    }

    pub(crate) fn size_is_valid(&self) -> bool {
        self.size_px.is_finite() && self.size_px > 0.0
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            size_px: 16.0,
            family: DEFAULT_FAMILY.to_string(),
        }
    }
}

fn first_family(stack: &str) -> String {
    let first = stack.split(',').next().unwrap_or_default().trim();
    let unquoted = first
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| first.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')))
        .unwrap_or(first)
        .trim();
    if unquoted.is_empty() {
        DEFAULT_FAMILY.to_string()
    } else {
        unquoted.to_string()
    }
}

fn parse_px_prefix(value: &str) -> f32 {
    let trimmed = value.trim();
    let digits_end = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(trimmed.len());
    trimmed[..digits_end].parse::<u32>().map_or(0.0, |v| v as f32)
}
