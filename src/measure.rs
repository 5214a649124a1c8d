//! Width oracles: text width in pixels for a given font.

#[cfg(feature = "std")]
use std::collections::BTreeMap;
#[cfg(feature = "std")]
use std::sync::Mutex;

use crate::font::FontSpec;

/// Measurement hook used by truncation passes.
///
/// Implementations must be pure with respect to `font` and `text`. Fonts that
/// cannot be resolved should fall back to an approximate metric rather than
/// fail.
pub trait WidthOracle: Send + Sync {
    /// Rendered width of `text` in pixels.
    fn measure_text_px(&self, font: &FontSpec, text: &str) -> f32;

    /// Rendered width of a single character.
    ///
    /// Called once per character in the truncation loop. Default encodes the
    /// character and delegates to `measure_text_px`.
    fn measure_char_px(&self, font: &FontSpec, ch: char) -> f32 {
        let mut buf = [0u8; 4];
        self.measure_text_px(font, ch.encode_utf8(&mut buf))
    }
}

impl<O: WidthOracle + ?Sized> WidthOracle for &O {
    fn measure_text_px(&self, font: &FontSpec, text: &str) -> f32 {
        (**self).measure_text_px(font, text)
    }

    fn measure_char_px(&self, font: &FontSpec, ch: char) -> f32 {
        (**self).measure_char_px(font, ch)
    }
}

/// Glyph-class width model used when no real font metrics are available.
///
/// Characters are bucketed into narrow/regular/wide/punctuation/digit classes
/// with em widths, then scaled by font size and a family modifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeuristicOracle;

impl HeuristicOracle {
    fn family_scale(font: &FontSpec) -> f32 {
        let mut scale = if font.is_monospace() {
            1.00
        } else if font.family_contains("sans") {
            0.99
        } else if font.family_contains("serif") {
            1.03
        } else {
            1.00
        };
        if font.size_px >= 24.0 {
            scale += 0.01;
        }
        scale
    }

    fn glyph_em_width(ch: char, monospace: bool) -> f32 {
        if monospace {
            return match ch {
                '\n' | '\r' => 0.0,
                ' ' => 0.52,
                _ => 0.58,
            };
        }
        // Em classes match the heuristic measurer of the mu-epub-render layout engine.
        match ch {
            '\n' | '\r' => 0.0,
            ' ' | '\u{00A0}' => 0.32,
            '\t' => 1.28,
            'i' | 'l' | 'I' | '|' | '!' => 0.24,
            '.' | ',' | ':' | ';' | '\'' | '"' | '`' => 0.23,
            '-' | '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' => 0.34,
            '(' | ')' | '[' | ']' | '{' | '}' => 0.30,
            'f' | 't' | 'j' | 'r' => 0.34,
            'm' | 'w' | 'M' | 'W' | '@' | '%' | '&' | '#' => 0.74,
            '\u{2026}' => 0.80,
            c if c.is_ascii_digit() => 0.52,
            c if c.is_ascii_uppercase() => 0.64,
            c if c.is_ascii_lowercase() => 0.52,
            c if c.is_whitespace() => 0.32,
            c if c.is_ascii_punctuation() => 0.42,
            _ => 0.56,
        }
    }
}

impl WidthOracle for HeuristicOracle {
    fn measure_text_px(&self, font: &FontSpec, text: &str) -> f32 {
        let monospace = font.is_monospace();
        let em_sum: f32 = text
            .chars()
            .map(|ch| Self::glyph_em_width(ch, monospace))
            .sum();
        em_sum * font.size_px.max(0.0) * Self::family_scale(font)
    }

    fn measure_char_px(&self, font: &FontSpec, ch: char) -> f32 {
        Self::glyph_em_width(ch, font.is_monospace())
            * font.size_px.max(0.0)
            * Self::family_scale(font)
    }
}

/// Every character advances by the same number of pixels, regardless of font.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvanceOracle {
    advance_px: f32,
}

impl FixedAdvanceOracle {
    /// Create an oracle with a fixed per-character advance.
    pub fn new(advance_px: f32) -> Self {
        Self { advance_px }
    }

    /// Per-character advance in pixels.
    pub fn advance_px(&self) -> f32 {
        self.advance_px
    }
}

impl WidthOracle for FixedAdvanceOracle {
    fn measure_text_px(&self, _font: &FontSpec, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance_px
    }

    fn measure_char_px(&self, _font: &FontSpec, _ch: char) -> f32 {
        self.advance_px
    }
}

/// Memoizes single-character widths of an inner oracle.
///
/// The cache is keyed by character and scoped to one font; measuring with a
/// different font clears it. Safe to share between threads.
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct CachedOracle<O> {
    inner: O,
    cache: Mutex<CharWidthCache>,
}

#[cfg(feature = "std")]
#[derive(Debug, Default)]
struct CharWidthCache {
    font: Option<FontSpec>,
    widths: BTreeMap<char, f32>,
    hits: u64,
    misses: u64,
}

#[cfg(feature = "std")]
impl<O: WidthOracle> CachedOracle<O> {
    /// Wrap `inner` with a per-character cache.
    pub fn new(inner: O) -> Self {
        Self {
            inner,
            cache: Mutex::new(CharWidthCache::default()),
        }
    }

    /// Borrow the wrapped oracle.
    pub fn inner(&self) -> &O {
        &self.inner
    }

    /// `(hits, misses)` observed so far.
    pub fn stats(&self) -> (u64, u64) {
        match self.cache.lock() {
            Ok(cache) => (cache.hits, cache.misses),
            Err(poisoned) => {
                let cache = poisoned.into_inner();
                (cache.hits, cache.misses)
            }
        }
    }

    /// Drop every cached width.
    pub fn clear(&self) {
        if let Ok(mut cache) = self.cache.lock() {
            *cache = CharWidthCache::default();
        }
    }
}

#[cfg(feature = "std")]
impl<O: WidthOracle> WidthOracle for CachedOracle<O> {
    fn measure_text_px(&self, font: &FontSpec, text: &str) -> f32 {
        self.inner.measure_text_px(font, text)
    }

    fn measure_char_px(&self, font: &FontSpec, ch: char) -> f32 {
        // A poisoned cache only loses memoization; measure directly.
        let Ok(mut cache) = self.cache.lock() else {
            return self.inner.measure_char_px(font, ch);
        };
        if cache.font.as_ref() != Some(font) {
            cache.font = Some(font.clone());
            cache.widths.clear();
        }
        if let Some(width) = cache.widths.get(&ch).copied() {
            cache.hits = cache.hits.saturating_add(1);
            return width;
        }
        let width = self.inner.measure_char_px(font, ch);
        cache.widths.insert(ch, width);
        cache.misses = cache.misses.saturating_add(1);
        width
    }
}
