//! Resize-driven host that keeps a text box truncated.
//!
//! An [`EllipsisBox`] owns the source text and re-runs truncation whenever the
//! observed content width changes, handing both fragments to a [`RenderSink`].

use alloc::string::{String, ToString};

use crate::config::EllipsisConfig;
use crate::error::TruncateError;
use crate::font::FontSpec;
use crate::measure::WidthOracle;
use crate::truncate::{TruncationRequest, TruncationResult, Truncator};

/// Receives the fragments of each truncation pass.
///
/// `top_text` wraps normally across the first lines; `overflow_text` goes on a
/// single line with hidden overflow and an ellipsis.
pub trait RenderSink {
    fn render(&mut self, top_text: &str, overflow_text: &str);
}

impl<F> RenderSink for F
where
    F: FnMut(&str, &str),
{
    fn render(&mut self, top_text: &str, overflow_text: &str) {
        self(top_text, overflow_text)
    }
}

/// Sink that keeps the most recent fragments and a render count.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingSink {
    pub top_text: String,
    pub overflow_text: String,
    pub renders: usize,
}

impl RenderSink for RecordingSink {
    fn render(&mut self, top_text: &str, overflow_text: &str) {
        self.top_text.clear();
        self.top_text.push_str(top_text);
        self.overflow_text.clear();
        self.overflow_text.push_str(overflow_text);
        self.renders = self.renders.saturating_add(1);
    }
}

/// Outcome of a width notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reflow {
    /// Width budget matched the last pass; nothing was rendered.
    Unchanged,
    /// Truncation ran and the sink received new fragments.
    Truncated,
}

/// A truncated text box bound to an oracle and a render sink.
#[derive(Debug)]
pub struct EllipsisBox<O, S> {
    text: String,
    line_count: u32,
    font: FontSpec,
    oracle: O,
    sink: S,
    config: EllipsisConfig,
    last_width_px: Option<f32>,
    last_result: Option<TruncationResult>,
}

impl<O, S> EllipsisBox<O, S>
where
    O: WidthOracle,
    S: RenderSink,
{
    /// Create a box over whitespace-trimmed `text`. Nothing renders until
    /// [`EllipsisBox::attach`].
    pub fn new(
        text: &str,
        line_count: u32,
        font: FontSpec,
        oracle: O,
        sink: S,
        config: EllipsisConfig,
    ) -> Self {
        Self {
            text: text.trim().to_string(),
            line_count,
            font,
            oracle,
            sink,
            config,
            last_width_px: None,
            last_result: None,
        }
    }

    /// First layout: always truncates and renders.
    pub fn attach(&mut self, content_width_px: f32) -> Result<Reflow, TruncateError> {
        self.last_width_px = None;
        self.on_width_changed(content_width_px)
    }

    /// Re-truncate when the width budget derived from `content_width_px`
    /// differs from the one used last.
    pub fn on_width_changed(&mut self, content_width_px: f32) -> Result<Reflow, TruncateError> {
        let max_width_px = self.config.max_width_for(content_width_px);
        if self.last_width_px == Some(max_width_px) {
            return Ok(Reflow::Unchanged);
        }
        #[cfg(feature = "std")]
        log::debug!(
            "ellipsis box width {:?} -> {} (content {})",
            self.last_width_px,
            max_width_px,
            content_width_px
        );
        self.last_width_px = Some(max_width_px);
        self.reflow(max_width_px)
    }

    /// Replace the source text; the next width notification recomputes.
    pub fn set_text(&mut self, text: &str) {
        self.text = text.trim().to_string();
        self.invalidate();
    }

    /// Replace the line count; the next width notification recomputes.
    pub fn set_line_count(&mut self, line_count: u32) {
        self.line_count = line_count;
        self.invalidate();
    }

    /// Replace the font; the next width notification recomputes.
    pub fn set_font(&mut self, font: FontSpec) {
        self.font = font;
        self.invalidate();
    }

    /// Trimmed source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> u32 {
        self.line_count
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn config(&self) -> EllipsisConfig {
        self.config
    }

    /// Width budget used by the last pass, if any.
    pub fn last_width_px(&self) -> Option<f32> {
        self.last_width_px
    }

    /// Fragments from the last successful pass.
    pub fn last_result(&self) -> Option<&TruncationResult> {
        self.last_result.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Release the sink and oracle.
    pub fn into_parts(self) -> (O, S) {
        (self.oracle, self.sink)
    }

    fn invalidate(&mut self) {
        self.last_width_px = None;
        self.last_result = None;
    }

    fn reflow(&mut self, max_width_px: f32) -> Result<Reflow, TruncateError> {
        let request = TruncationRequest::new(&self.text, max_width_px, self.line_count, &self.font);
        let truncator = Truncator::new(self.config.truncate_options());
        match truncator.truncate(&request, &self.oracle) {
            Ok(result) => {
                self.sink.render(&result.top_text, &result.overflow_text);
                self.last_result = Some(result);
                Ok(Reflow::Truncated)
            }
            Err(err) => {
                #[cfg(feature = "std")]
                log::warn!("ellipsis truncation skipped, showing full text: {}", err);
                self.sink.render(&self.text, "");
                self.last_result = None;
                // Retry on the next notification even if the width is unchanged.
                self.last_width_px = None;
                Err(err)
            }
        }
    }
}
