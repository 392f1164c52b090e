use crate::placeholder::PlaceholderView;
use cursive_core::align::{HAlign, VAlign};
use cursive_core::style::PaletteStyle;
use cursive_core::view::{Margins, View};
use cursive_core::{Printer, Vec2, With};
use unicode_width::UnicodeWidthStr;

/// A line of text in a [`BasicPlaceholderView`].
#[derive(Clone, Debug, PartialEq, Eq)]
struct Line {
    text: String,
    style: PaletteStyle,
}

/// Opaque placeholder showing a few lines of text, centered.
///
/// The whole area is filled with the view background, hiding the content
/// below. Loading, empty and error placeholders are built on it.
///
/// # Examples
///
/// ```rust
/// # use cursive_stateful::views::BasicPlaceholderView;
/// # use cursive_core::style::PaletteStyle;
/// let view = BasicPlaceholderView::new()
///     .line("Nothing to see here.")
///     .styled_line("Come back later", PaletteStyle::Secondary);
/// ```
pub struct BasicPlaceholderView {
    lines: Vec<Line>,
    insets: Margins,
    accepts_input: bool,
    size: Vec2,
}

new_default!(BasicPlaceholderView);

impl BasicPlaceholderView {
    /// Creates a new placeholder with no text.
    pub fn new() -> Self {
        BasicPlaceholderView {
            lines: Vec::new(),
            insets: Margins::zeroes(),
            accepts_input: true,
            size: Vec2::zero(),
        }
    }

    /// Appends a line of regular text.
    pub fn add_line<S: Into<String>>(&mut self, text: S) {
        self.add_styled_line(text, PaletteStyle::Primary);
    }

    /// Appends a line of regular text.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn line<S: Into<String>>(self, text: S) -> Self {
        self.with(|s| s.add_line(text))
    }

    /// Appends a line of text with the given style.
    pub fn add_styled_line<S: Into<String>>(&mut self, text: S, style: PaletteStyle) {
        self.lines.push(Line {
            text: text.into(),
            style,
        });
    }

    /// Appends a line of text with the given style.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn styled_line<S: Into<String>>(self, text: S, style: PaletteStyle) -> Self {
        self.with(|s| s.add_styled_line(text, style))
    }

    /// Replaces the text of line `i`, keeping its style.
    ///
    /// Does nothing if there is no such line.
    pub fn set_line<S: Into<String>>(&mut self, i: usize, text: S) {
        if let Some(line) = self.lines.get_mut(i) {
            line.text = text.into();
        }
    }

    /// Returns the text of line `i`.
    pub fn get_line(&self, i: usize) -> Option<&str> {
        self.lines.get(i).map(|line| line.text.as_str())
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if there is no text.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sets the distance to keep from each edge of the parent.
    pub fn set_insets(&mut self, insets: Margins) {
        self.insets = insets;
    }

    /// Sets the distance to keep from each edge of the parent.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn insets(self, insets: Margins) -> Self {
        self.with(|s| s.set_insets(insets))
    }

    /// Lets input through to the content below.
    pub fn set_passive(&mut self, passive: bool) {
        self.accepts_input = !passive;
    }

    /// Lets input through to the content below.
    ///
    /// Chainable variant.
    #[must_use]
    pub fn passive(self) -> Self {
        self.with(|s| s.set_passive(true))
    }

    /// Returns the size given during the last layout.
    pub fn last_size(&self) -> Vec2 {
        self.size
    }

    /// Returns the offset of line `i` within a view of the given size.
    pub(crate) fn line_offset(&self, i: usize, size: Vec2) -> Option<Vec2> {
        let line = self.lines.get(i)?;
        let top = VAlign::Center.get_offset(self.lines.len(), size.y);
        let left = HAlign::Center.get_offset(line.text.width(), size.x);

        Some(Vec2::new(left, top + i))
    }

    fn text_size(&self) -> Vec2 {
        let width = self
            .lines
            .iter()
            .map(|line| line.text.width())
            .max()
            .unwrap_or(0);

        Vec2::new(width, self.lines.len())
    }
}

impl View for BasicPlaceholderView {
    fn draw(&self, printer: &Printer) {
        printer.with_style(PaletteStyle::View, |printer| {
            for y in 0..printer.size.y {
                printer.print_hline((0, y), printer.size.x, " ");
            }
        });

        for (i, line) in self.lines.iter().enumerate() {
            if let Some(offset) = self.line_offset(i, printer.size) {
                printer.with_style(line.style, |printer| {
                    printer.print(offset, &line.text);
                });
            }
        }
    }

    fn layout(&mut self, size: Vec2) {
        self.size = size;
    }

    fn required_size(&mut self, _: Vec2) -> Vec2 {
        self.text_size()
    }
}

impl PlaceholderView for BasicPlaceholderView {
    fn placeholder_insets(&self) -> Margins {
        self.insets
    }

    fn accepts_input(&self) -> bool {
        self.accepts_input
    }
}
