//! embedded-graphics backend for `ellipsis-fit`.
//!
//! Provides a [`WidthOracle`] backed by embedded-graphics mono fonts and a
//! [`RenderSink`] that lays the top block and the ellipsis line out inside a
//! box and draws them on a binary display.

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

use ellipsis_fit::{
    EllipsisBox, EllipsisConfig, FontSpec, Reflow, RenderSink, TruncateError, WidthOracle,
};
use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_6X9, FONT_7X14, FONT_8X13},
        MonoFont, MonoTextStyle,
    },
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use std::borrow::Cow;

/// Why font resolution had to fall back to a default face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFallbackReason {
    UnknownFamily,
    InvalidSize,
}

/// Mono font chosen for a [`FontSpec`].
#[derive(Clone, Copy, Debug)]
pub struct FontSelection {
    pub font: &'static MonoFont<'static>,
    pub fallback_reason: Option<FontFallbackReason>,
}

impl FontSelection {
    /// Horizontal advance of one glyph, including inter-character spacing.
    pub fn advance_px(&self) -> u32 {
        self.font.character_size.width + self.font.character_spacing
    }

    /// Glyph cell height.
    pub fn line_height_px(&self) -> u32 {
        self.font.character_size.height
    }
}

/// Maps font sizes onto the built-in ASCII mono fonts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonoFontOracle;

impl MonoFontOracle {
    /// Pick the mono font bucket for `font`.
    pub fn resolve(font: &FontSpec) -> FontSelection {
        let mut fallback_reason =
            (!Self::family_supported(&font.family)).then_some(FontFallbackReason::UnknownFamily);
        let size = if font.size_px.is_finite() && font.size_px > 0.0 {
            font.size_px
        } else {
            fallback_reason = Some(FontFallbackReason::InvalidSize);
            16.0
        };
        let mono = if size >= 24.0 {
            &FONT_10X20
        } else if size >= 20.0 {
            &FONT_8X13
        } else if size >= 16.0 {
            &FONT_7X14
        } else {
            &FONT_6X9
        };
        FontSelection {
            font: mono,
            fallback_reason,
        }
    }

    fn family_supported(family: &str) -> bool {
        matches!(
            family.trim().to_ascii_lowercase().as_str(),
            "monospace" | "mono" | "fixed" | "serif" | "sans-serif"
        )
    }
}

impl WidthOracle for MonoFontOracle {
    fn measure_text_px(&self, font: &FontSpec, text: &str) -> f32 {
        let selection = Self::resolve(font);
        mono_text_width(&selection, text) as f32
    }

    fn measure_char_px(&self, font: &FontSpec, ch: char) -> f32 {
        let selection = Self::resolve(font);
        mono_glyph_count(ch) as f32 * selection.advance_px() as f32
    }
}

/// Box geometry for [`EgEllipsisRenderer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EgBoxConfig {
    /// Box content width in pixels.
    pub width_px: u32,
    /// Extra vertical gap between lines.
    pub line_gap_px: u32,
    /// Suffix drawn when the overflow line is clipped.
    pub ellipsis: &'static str,
}

impl EgBoxConfig {
    /// Convenience for a box width with default spacing.
    pub fn for_width(width_px: u32) -> Self {
        Self {
            width_px,
            ..Self::default()
        }
    }
}

impl Default for EgBoxConfig {
    fn default() -> Self {
        Self {
            width_px: 240,
            line_gap_px: 2,
            ellipsis: "...",
        }
    }
}

/// Laid-out lines ready to draw.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EllipsisLayout {
    /// Wrapped lines of the top block.
    pub top_lines: Vec<String>,
    /// Final line, clipped to the box width.
    pub overflow_line: String,
    /// Whether the overflow line was cut and suffixed with the ellipsis.
    pub clipped: bool,
}

impl EllipsisLayout {
    /// Number of lines that will be drawn.
    pub fn line_count(&self) -> usize {
        self.top_lines.len() + usize::from(!self.overflow_line.is_empty())
    }
}

/// Render sink that wraps the top block and clips the overflow line.
#[derive(Clone, Debug)]
pub struct EgEllipsisRenderer {
    cfg: EgBoxConfig,
    selection: FontSelection,
    layout: EllipsisLayout,
}

impl EgEllipsisRenderer {
    /// Create a renderer drawing with the mono font resolved from `font`.
    pub fn new(font: &FontSpec, cfg: EgBoxConfig) -> Self {
        let selection = MonoFontOracle::resolve(font);
        if let Some(reason) = selection.fallback_reason {
            log::warn!(
                "font {} mapped to fallback mono face: {:?}",
                font.css_shorthand(),
                reason
            );
        }
        Self {
            cfg,
            selection,
            layout: EllipsisLayout::default(),
        }
    }

    pub fn config(&self) -> EgBoxConfig {
        self.cfg
    }

    /// Change the box width used by the next layout.
    pub fn set_width_px(&mut self, width_px: u32) {
        self.cfg.width_px = width_px;
    }

    pub fn selection(&self) -> FontSelection {
        self.selection
    }

    /// Layout from the last render.
    pub fn layout(&self) -> &EllipsisLayout {
        &self.layout
    }

    /// Draw the last layout with its top-left corner at `origin`.
    pub fn draw<D>(&self, display: &mut D, origin: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = MonoTextStyle::new(self.selection.font, BinaryColor::On);
        let step = (self.selection.line_height_px() + self.cfg.line_gap_px) as i32;
        let mut y = origin.y;
        let overflow = (!self.layout.overflow_line.is_empty())
            .then_some(self.layout.overflow_line.as_str());
        let lines = self
            .layout
            .top_lines
            .iter()
            .map(String::as_str)
            .chain(overflow);
        for line in lines {
            let normalized = normalize_text_for_mono(line);
            Text::with_baseline(normalized.as_ref(), Point::new(origin.x, y), style, Baseline::Top)
                .draw(display)?;
            y += step;
        }
        Ok(())
    }

    fn wrap_top(&self, top_text: &str) -> Vec<String> {
        let max = self.cfg.width_px;
        let mut lines = Vec::new();
        for paragraph in top_text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
                let candidate_width = if line.is_empty() {
                    self.width_of(word)
                } else {
                    self.width_of(&line) + self.width_of(" ") + self.width_of(word)
                };
                if candidate_width <= max {
                    if !line.is_empty() {
                        line.push(' ');
                    }
                    line.push_str(word);
                    continue;
                }
                if !line.is_empty() {
                    lines.push(core::mem::take(&mut line));
                }
                if self.width_of(word) <= max {
                    line.push_str(word);
                    continue;
                }
                // Hard-break words wider than the box.
                for ch in word.chars() {
                    let mut buf = [0u8; 4];
                    if !line.is_empty()
                        && self.width_of(&line) + self.width_of(ch.encode_utf8(&mut buf)) > max
                    {
                        lines.push(core::mem::take(&mut line));
                    }
                    line.push(ch);
                }
            }
            if !line.is_empty() {
                lines.push(line);
            }
        }
        lines
    }

    fn clip_overflow(&self, overflow_text: &str) -> (String, bool) {
        let max = self.cfg.width_px;
        if self.width_of(overflow_text) <= max {
            return (overflow_text.to_string(), false);
        }
        let suffix_width = self.width_of(self.cfg.ellipsis);
        if suffix_width > max {
            // Box narrower than the ellipsis: show as much of the ellipsis as fits.
            let mut out = String::new();
            let mut used = 0u32;
            for ch in self.cfg.ellipsis.chars() {
                let advance = mono_glyph_count(ch) * self.selection.advance_px();
                if used + advance > max {
                    break;
                }
                used += advance;
                out.push(ch);
            }
            return (out, true);
        }
        let mut out = String::new();
        let mut used = 0u32;
        for ch in overflow_text.chars() {
            let advance = mono_glyph_count(ch) * self.selection.advance_px();
            if used + advance + suffix_width > max {
                break;
            }
            used += advance;
            out.push(ch);
        }
        let kept = out.trim_end().len();
        out.truncate(kept);
        out.push_str(self.cfg.ellipsis);
        (out, true)
    }

    fn width_of(&self, text: &str) -> u32 {
        mono_text_width(&self.selection, text)
    }
}

impl RenderSink for EgEllipsisRenderer {
    fn render(&mut self, top_text: &str, overflow_text: &str) {
        let top_lines = self.wrap_top(top_text);
        let (overflow_line, clipped) = self.clip_overflow(overflow_text);
        log::debug!(
            "eg ellipsis layout: top_lines={} clipped={} width={}",
            top_lines.len(),
            clipped,
            self.cfg.width_px
        );
        self.layout = EllipsisLayout {
            top_lines,
            overflow_line,
            clipped,
        };
    }
}

/// Host box wired to the mono oracle and renderer.
pub type EgEllipsisBox = EllipsisBox<MonoFontOracle, EgEllipsisRenderer>;

/// Build a host box whose renderer and oracle agree on the mono font.
pub fn eg_ellipsis_box(
    text: &str,
    line_count: u32,
    font: FontSpec,
    box_cfg: EgBoxConfig,
    config: EllipsisConfig,
) -> EgEllipsisBox {
    let renderer = EgEllipsisRenderer::new(&font, box_cfg);
    EllipsisBox::new(text, line_count, font, MonoFontOracle, renderer, config)
}

/// Resize the renderer box and notify the host of the new content width.
pub fn resize_eg_box(ebox: &mut EgEllipsisBox, width_px: u32) -> Result<Reflow, TruncateError> {
    ebox.sink_mut().set_width_px(width_px);
    ebox.on_width_changed(width_px as f32)
}

fn mono_glyph_count(ch: char) -> u32 {
    match ch {
        '\n' | '\r' => 0,
        '\u{2026}' => 3,
        _ => 1,
    }
}

fn mono_text_width(selection: &FontSelection, text: &str) -> u32 {
    let glyphs: u32 = text.chars().map(mono_glyph_count).sum();
    glyphs * selection.advance_px()
}

fn normalize_text_for_mono(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| {
        matches!(
            ch,
            '\u{00A0}' // nbsp
                | '\u{2013}' // en dash
                | '\u{2014}' // em dash
                | '\u{2018}' // left single quote
                | '\u{2019}' // right single quote
                | '\u{201C}' // left double quote
                | '\u{201D}' // right double quote
                | '\u{2026}' // ellipsis
        )
    }) {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\u{00A0}' => out.push(' '),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\u{2026}' => out.push_str("..."),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use ellipsis_fit::{truncate, TruncationRequest};
    use embedded_graphics::mock_display::MockDisplay;

    const FOX: &str = "The quick brown fox jumps over the lazy dog";

    #[derive(Default)]
    struct PixelCaptureDisplay {
        size: Size,
        on_pixels: Vec<Point>,
    }

    impl PixelCaptureDisplay {
        fn with_size(width: u32, height: u32) -> Self {
            Self {
                size: Size::new(width, height),
                on_pixels: Vec::new(),
            }
        }
    }

    impl OriginDimensions for PixelCaptureDisplay {
        fn size(&self) -> Size {
            self.size
        }
    }

    impl DrawTarget for PixelCaptureDisplay {
        type Color = BinaryColor;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(point, color) in pixels {
                if color == BinaryColor::On {
                    self.on_pixels.push(point);
                }
            }
            Ok(())
        }
    }

    fn body_font() -> FontSpec {
        FontSpec::new(16.0, "monospace")
    }

    #[test]
    fn resolve_maps_sizes_to_buckets() {
        assert_eq!(
            MonoFontOracle::resolve(&FontSpec::new(12.0, "serif")).advance_px(),
            6
        );
        assert_eq!(MonoFontOracle::resolve(&body_font()).advance_px(), 7);
        assert_eq!(
            MonoFontOracle::resolve(&FontSpec::new(20.0, "serif")).advance_px(),
            8
        );
        assert_eq!(
            MonoFontOracle::resolve(&FontSpec::new(30.0, "serif")).advance_px(),
            10
        );
    }

    #[test]
    fn resolve_reports_fallback_reasons() {
        let unknown = MonoFontOracle::resolve(&FontSpec::new(16.0, "Comic Sans"));
        assert_eq!(
            unknown.fallback_reason,
            Some(FontFallbackReason::UnknownFamily)
        );
        let bad_size = MonoFontOracle::resolve(&FontSpec::new(f32::NAN, "serif"));
        assert_eq!(
            bad_size.fallback_reason,
            Some(FontFallbackReason::InvalidSize)
        );
        assert_eq!(bad_size.advance_px(), 7);
    }

    #[test]
    fn oracle_measures_text_and_chars_consistently() {
        let font = body_font();
        let oracle = MonoFontOracle;
        assert_eq!(oracle.measure_text_px(&font, "hello"), 35.0);
        assert_eq!(oracle.measure_char_px(&font, 'h'), 7.0);
        assert_eq!(oracle.measure_char_px(&font, '\n'), 0.0);
        assert_eq!(oracle.measure_text_px(&font, "a\u{2026}"), 28.0);
    }

    #[test]
    fn truncation_with_mono_oracle_keeps_word_boundaries() {
        let font = body_font();
        // 7 px per glyph: 105 px top budget is 15 glyphs.
        let request = TruncationRequest::new(FOX, 105.0, 2, &font);
        let result = truncate(&request, &MonoFontOracle).unwrap();
        assert_eq!(result.top_text, "The quick");
        assert!(result.overflow_text.starts_with("brown"));
    }

    #[test]
    fn renderer_wraps_top_and_clips_overflow() {
        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(70));
        renderer.render("The quick brown", "fox jumps over the lazy dog");
        let layout = renderer.layout();
        assert_eq!(layout.top_lines, vec!["The quick", "brown"]);
        assert!(layout.clipped);
        assert_eq!(layout.overflow_line, "fox jum...");
        assert_eq!(layout.line_count(), 3);
    }

    #[test]
    fn renderer_shortens_ellipsis_in_boxes_narrower_than_it() {
        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(20));
        renderer.render("", "jumps over the lazy dog");
        let layout = renderer.layout();
        assert!(layout.clipped);
        assert_eq!(layout.overflow_line, "..");
        assert!(mono_text_width(&renderer.selection(), &layout.overflow_line) <= 20);

        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(5));
        renderer.render("", "jumps");
        assert_eq!(renderer.layout().overflow_line, "");
        assert!(renderer.layout().clipped);
    }

    #[test]
    fn renderer_keeps_short_overflow_unclipped() {
        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(140));
        renderer.render("", "lazy dog");
        let layout = renderer.layout();
        assert!(layout.top_lines.is_empty());
        assert!(!layout.clipped);
        assert_eq!(layout.overflow_line, "lazy dog");
    }

    #[test]
    fn renderer_hard_breaks_long_words() {
        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(35));
        renderer.render("abcdefghij", "");
        assert_eq!(renderer.layout().top_lines, vec!["abcde", "fghij"]);
        assert_eq!(renderer.layout().line_count(), 2);
    }

    #[test]
    fn draw_runs_on_mock_display() {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        let mut renderer =
            EgEllipsisRenderer::new(&FontSpec::new(10.0, "mono"), EgBoxConfig::for_width(60));
        renderer.render("ab", "cd");
        assert!(renderer.draw(&mut display, Point::zero()).is_ok());
    }

    #[test]
    fn draw_places_overflow_line_below_top_lines() {
        let mut display = PixelCaptureDisplay::with_size(200, 100);
        let mut renderer = EgEllipsisRenderer::new(&body_font(), EgBoxConfig::for_width(140));
        renderer.render("The quick", "brown fox");
        renderer.draw(&mut display, Point::new(0, 0)).unwrap();
        let line_step = 14 + 2;
        assert!(display.on_pixels.iter().any(|p| p.y < 14));
        assert!(display
            .on_pixels
            .iter()
            .any(|p| p.y >= line_step && p.y < line_step + 14));
        assert!(display.on_pixels.iter().all(|p| p.y < line_step + 14));
    }

    #[test]
    fn eg_box_reflows_on_resize() {
        let mut ebox = eg_ellipsis_box(
            FOX,
            2,
            body_font(),
            EgBoxConfig::for_width(112),
            EllipsisConfig::default(),
        );
        assert_eq!(resize_eg_box(&mut ebox, 112), Ok(Reflow::Truncated));
        assert_eq!(ebox.last_width_px(), Some(105.0));
        let layout = ebox.sink().layout();
        assert_eq!(layout.top_lines, vec!["The quick"]);
        assert!(layout.clipped);
        assert!(layout.overflow_line.starts_with("brown"));
        assert_eq!(resize_eg_box(&mut ebox, 112), Ok(Reflow::Unchanged));
        assert_eq!(resize_eg_box(&mut ebox, 200), Ok(Reflow::Truncated));
        assert_eq!(ebox.sink().config().width_px, 200);
    }
}
