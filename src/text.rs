//! Text measurement seam between the engine and the host toolkit.
//!
//! Tick and legend layout needs label extents before anything is drawn, but
//! glyph metrics belong to the host. Render backends implement
//! [`TextMeasurer`] against their font system; tests and headless callers
//! can use [`MonospaceMeasurer`].

/// Measured size of a run of text, in pixels.
pub type TextSize = (f32, f32);

/// Host-provided text measurement.
pub trait TextMeasurer {
    /// Measure a single-line string at the engine's label font size.
    fn measure(&self, text: &str) -> TextSize;
}

/// Deterministic measurer assuming a fixed-width font.
///
/// Useful for tests and for hosts that have not wired up real metrics yet.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceMeasurer {
    /// Advance width per character.
    pub char_width: f32,
    /// Line height.
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 13.0,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> TextSize {
        (self.char_width * text.chars().count() as f32, self.line_height)
    }
}
