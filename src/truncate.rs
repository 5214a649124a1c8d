//! Greedy multi-line truncation.
//!
//! A single left-to-right pass fills the top block until its pixel budget of
//! `(line_count - 1) * max_width_px` is reached, backs off to the last word
//! boundary, then collects the overflow line until it runs well past what the
//! final line can show.

use alloc::string::{String, ToString};
use core::ops::Range;

use crate::config::TruncateOptions;
use crate::error::TruncateError;
use crate::font::FontSpec;
use crate::measure::{HeuristicOracle, WidthOracle};

/// Input for one truncation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TruncationRequest<'a> {
    /// Source text. [`TruncationRequest::new`] trims it.
    pub text: &'a str,
    /// Width budget of a single rendered line in pixels.
    pub max_width_px: f32,
    /// Number of display lines, including the overflow line.
    pub line_count: u32,
    /// Font used to measure characters.
    pub font: &'a FontSpec,
}

impl<'a> TruncationRequest<'a> {
    /// Build a request over whitespace-trimmed `text`.
    pub fn new(text: &'a str, max_width_px: f32, line_count: u32, font: &'a FontSpec) -> Self {
        Self {
            text: text.trim(),
            max_width_px,
            line_count,
            font,
        }
    }

    /// Reject configurations the algorithm has no defined answer for.
    pub fn validate(&self) -> Result<(), TruncateError> {
        if !(self.max_width_px.is_finite() && self.max_width_px > 0.0) {
            return Err(TruncateError::InvalidWidth {
                width_px: self.max_width_px,
            });
        }
        if self.line_count < 1 {
            return Err(TruncateError::InvalidLineCount {
                line_count: self.line_count,
            });
        }
        if !self.font.size_is_valid() {
            return Err(TruncateError::InvalidFontSize {
                size_px: self.font.size_px,
            });
        }
        Ok(())
    }
}

/// The two text fragments produced by a pass, both trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TruncationResult {
    /// Text for the first `line_count - 1` lines, wrapped normally.
    pub top_text: String,
    /// Text for the final line, clipped by the renderer with an ellipsis.
    pub overflow_text: String,
}

/// Byte ranges into the request text for each fragment, already trimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TruncationSpans {
    /// Range of the top block.
    pub top: Range<usize>,
    /// Range of the overflow line.
    pub overflow: Range<usize>,
}

impl TruncationSpans {
    /// Top block slice of `text`.
    pub fn top_text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.top.clone()).unwrap_or_default()
    }

    /// Overflow line slice of `text`.
    pub fn overflow_text<'a>(&self, text: &'a str) -> &'a str {
        text.get(self.overflow.clone()).unwrap_or_default()
    }

    /// Copy both fragments out of `text`.
    pub fn to_result(&self, text: &str) -> TruncationResult {
        TruncationResult {
            top_text: self.top_text(text).to_string(),
            overflow_text: self.overflow_text(text).to_string(),
        }
    }
}

/// Counters collected during one pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TruncateDiagnostics {
    /// Characters visited.
    pub chars_visited: usize,
    /// Oracle calls issued.
    pub measure_calls: usize,
    /// Character index at which filling switched to the overflow line.
    pub transition_char_index: Option<usize>,
    /// Pass stopped on the overshoot margin before the end of the text.
    pub stopped_early: bool,
    /// Oracle answers replaced by the heuristic fallback.
    pub degraded_measurements: usize,
}

/// Stateless truncation engine.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Truncator {
    options: TruncateOptions,
}

impl Truncator {
    /// Create a truncator with explicit options.
    pub fn new(options: TruncateOptions) -> Self {
        Self { options }
    }

    /// Options used by this truncator.
    pub fn options(&self) -> TruncateOptions {
        self.options
    }

    /// Split the request text into owned top and overflow fragments.
    pub fn truncate<O>(
        &self,
        request: &TruncationRequest<'_>,
        oracle: &O,
    ) -> Result<TruncationResult, TruncateError>
    where
        O: WidthOracle + ?Sized,
    {
        self.truncate_with_diagnostics(request, oracle)
            .map(|(result, _)| result)
    }

    /// Like [`Truncator::truncate`], also returning pass counters.
    pub fn truncate_with_diagnostics<O>(
        &self,
        request: &TruncationRequest<'_>,
        oracle: &O,
    ) -> Result<(TruncationResult, TruncateDiagnostics), TruncateError>
    where
        O: WidthOracle + ?Sized,
    {
        let mut diagnostics = TruncateDiagnostics::default();
        let spans = self.run(request, oracle, &mut diagnostics)?;
        Ok((spans.to_result(request.text), diagnostics))
    }

    /// Split the request text without copying it.
    pub fn truncate_spans<O>(
        &self,
        request: &TruncationRequest<'_>,
        oracle: &O,
    ) -> Result<TruncationSpans, TruncateError>
    where
        O: WidthOracle + ?Sized,
    {
        let mut diagnostics = TruncateDiagnostics::default();
        self.run(request, oracle, &mut diagnostics)
    }

    fn run<O>(
        &self,
        request: &TruncationRequest<'_>,
        oracle: &O,
        diagnostics: &mut TruncateDiagnostics,
    ) -> Result<TruncationSpans, TruncateError>
    where
        O: WidthOracle + ?Sized,
    {
        request.validate()?;

        let text = request.text;
        let font = request.font;
        let top_budget = (request.line_count - 1) as f32 * request.max_width_px;
        let line_budget = request.line_count as f32 * request.max_width_px;
        let stop_below = -self.options.overshoot_margin_px;

        let mut running_px = 0.0f32;
        let mut reached_limit = false;
        // `text[..top_end]` is the top block; it always stays a prefix.
        let mut top_end = 0usize;
        // End of the top block as of the most recent space.
        let mut word_boundary_end = 0usize;
        let mut overflow = 0usize..0usize;

        for (char_index, (byte_index, ch)) in text.char_indices().enumerate() {
            diagnostics.chars_visited = char_index + 1;
            let next_index = byte_index + ch.len_utf8();

            if !reached_limit && running_px < top_budget {
                let previous_end = top_end;
                if ch == ' ' {
                    word_boundary_end = previous_end;
                }
                top_end = next_index;
                // Line breaks are kept but take no room in the budget.
                if ch != '\n' {
                    running_px += self.char_width(oracle, font, ch, diagnostics);
                }

                if running_px >= top_budget {
                    if ch == ' ' {
                        top_end = previous_end;
                        overflow = byte_index..next_index;
                    } else {
                        // Carry the broken word whole onto the overflow line.
                        top_end = word_boundary_end;
                        let word_start = text[..previous_end].rfind(' ').map_or(0, |i| i + 1);
                        overflow = word_start..next_index;
                    }
                    reached_limit = true;
                    diagnostics.transition_char_index = Some(char_index);
                }
                continue;
            }

            // A zero top budget never transitions; the overflow starts at the text start.
            overflow.end = next_index;
            running_px += self.char_width(oracle, font, ch, diagnostics);
            if line_budget - running_px < stop_below {
                diagnostics.stopped_early = next_index < text.len();
                break;
            }
        }

        let spans = TruncationSpans {
            top: trim_range(text, 0..top_end),
            overflow: trim_range(text, overflow),
        };

        #[cfg(feature = "std")]
        log::debug!(
            "truncate: lines={} max_width={} chars={} measure_calls={} transition={:?} stopped_early={} top_bytes={} overflow_bytes={}",
            request.line_count,
            request.max_width_px,
            diagnostics.chars_visited,
            diagnostics.measure_calls,
            diagnostics.transition_char_index,
            diagnostics.stopped_early,
            spans.top.len(),
            spans.overflow.len()
        );

        Ok(spans)
    }

    fn char_width<O>(
        &self,
        oracle: &O,
        font: &FontSpec,
        ch: char,
        diagnostics: &mut TruncateDiagnostics,
    ) -> f32
    where
        O: WidthOracle + ?Sized,
    {
        diagnostics.measure_calls += 1;
        let width = oracle.measure_char_px(font, ch);
        if width.is_finite() && width >= 0.0 {
            return width;
        }
        diagnostics.degraded_measurements += 1;
        #[cfg(feature = "std")]
        if diagnostics.degraded_measurements == 1 {
            log::warn!(
                "width oracle returned {} for {:?} in font {}; using heuristic metrics",
                width,
                ch,
                font.css_shorthand()
            );
        }
        HeuristicOracle.measure_char_px(font, ch)
    }
}

/// Truncate with default options.
pub fn truncate<O>(
    request: &TruncationRequest<'_>,
    oracle: &O,
) -> Result<TruncationResult, TruncateError>
where
    O: WidthOracle + ?Sized,
{
    Truncator::default().truncate(request, oracle)
}

fn trim_range(text: &str, range: Range<usize>) -> Range<usize> {
    let Some(slice) = text.get(range.clone()) else {
        return 0..0;
    };
    let leading = slice.len() - slice.trim_start().len();
    let start = range.start + leading;
    start..start + slice.trim().len()
}
