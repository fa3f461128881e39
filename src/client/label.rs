//! Single text label jobs.

// ============================================================================
// Imports
// ============================================================================

use crate::model::{Align, DrawObject, FontSize, Geometry, PrintPage};

// ============================================================================
// Constants
// ============================================================================

/// Font used by [`TextLabel`] unless overridden.
pub const DEFAULT_LABEL_FONT: &str = "黑体";

/// Font size (mm) used by [`TextLabel`] unless overridden.
pub const DEFAULT_LABEL_FONT_SIZE: u32 = 4;

// ============================================================================
// TextLabel
// ============================================================================

/// One line of text on one page.
///
/// Defaults place a 15x4mm centred box at (15, 3) in 4mm 黑体.
///
/// # Example
///
/// ```
/// use supvan_printer::{Align, TextLabel};
///
/// let label = TextLabel::new("HelloWorld").with_font("黑体", 4).with_align(Align::Center);
/// let page = label.to_page();
/// assert_eq!(page.draw_objects.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    /// Text to print.
    pub text: String,
    /// Box of the text (mm).
    pub geometry: Geometry,
    /// Font family.
    pub font_name: String,
    /// Font size (mm).
    pub font_size: FontSize,
    /// Alignment inside the box.
    pub align: Align,
}

impl TextLabel {
    /// Creates a label with default geometry and font.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            geometry: Geometry::new(15.0, 3.0, 15.0, 4.0),
            font_name: DEFAULT_LABEL_FONT.to_string(),
            font_size: FontSize::from(DEFAULT_LABEL_FONT_SIZE),
            align: Align::Center,
        }
    }

    /// Sets the text box.
    #[inline]
    #[must_use]
    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Sets font family and size.
    #[inline]
    #[must_use]
    pub fn with_font(mut self, name: impl Into<String>, size: impl Into<FontSize>) -> Self {
        self.font_name = name.into();
        self.font_size = size.into();
        self
    }

    /// Sets alignment.
    #[inline]
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Builds the single-object page for this label.
    #[must_use]
    pub fn to_page(&self) -> PrintPage {
        let object = DrawObject::text(self.text.clone(), self.geometry)
            .with_font(self.font_name.clone(), self.font_size.clone())
            .with_align(self.align);

        PrintPage::with_objects(vec![object])
    }
}

// ============================================================================
// Tests
// ============================================================================
