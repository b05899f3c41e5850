use unicode_width::UnicodeWidthChar;

/// Running total of the leftward slide, measured in display columns.
///
/// The render layer keeps the current position visually anchored by shifting
/// the whole text left as characters are resolved; one resolved character
/// shifts by its display width (2 for wide CJK glyphs, 0 for zero-width
/// marks). Multiplying columns by the cell width of the render target gives
/// the pixel distance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlideTracker {
    columns: usize,
}

impl SlideTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Width of `c` in display columns. Control characters count as zero.
    pub fn width_of(c: char) -> usize {
        UnicodeWidthChar::width(c).unwrap_or(0)
    }

    /// Record one resolved character and return the columns it adds.
    pub fn advance(&mut self, c: char) -> usize {
        let w = Self::width_of(c);
        self.columns += w;
        w
    }

    /// Total columns slid since the session started.
    pub fn columns(&self) -> usize {
        self.columns
    }
}
