//! Pages and draw objects sent as `PrintPages`.
//!
//! A [`PrintPage`] is an ordered stack of [`DrawObject`]s. The order of
//! `draw_objects` is the render order and is serialized as-is.

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Geometry
// ============================================================================

/// Position and size of a draw object, in millimetres.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Geometry {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Geometry {
    /// Creates a geometry from position and size.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

// ============================================================================
// DrawFormat
// ============================================================================

/// Kind of content a draw object carries (`Format` on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DrawFormat {
    /// Plain text rendered with `FontName`/`FontSize`.
    #[default]
    #[serde(rename = "TEXT")]
    Text,
    /// QR code of `Content`.
    #[serde(rename = "QRCODE")]
    QrCode,
    /// Code 128 barcode of `Content`.
    #[serde(rename = "CODE_128")]
    Code128,
    /// EAN-13 barcode of `Content`.
    #[serde(rename = "EAN_13")]
    Ean13,
    /// Pre-encoded image data in `Content`.
    #[serde(rename = "Image")]
    Image,
    /// Line from (`X`, `Y`) to (`X1`, `Y1`).
    #[serde(rename = "LINE")]
    Line,
}

impl DrawFormat {
    /// Returns the wire name of the format.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::QrCode => "QRCODE",
            Self::Code128 => "CODE_128",
            Self::Ean13 => "EAN_13",
            Self::Image => "Image",
            Self::Line => "LINE",
        }
    }
}

impl fmt::Display for DrawFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Align
// ============================================================================

/// Horizontal alignment inside the object's box (`Align` on the wire).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Align {
    /// 0
    #[default]
    Left,
    /// 1
    Center,
    /// 2
    Right,
}

impl From<Align> for u8 {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => 0,
            Align::Center => 1,
            Align::Right => 2,
        }
    }
}

impl TryFrom<u8> for Align {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Left),
            1 => Ok(Self::Center),
            2 => Ok(Self::Right),
            other => Err(format!("invalid Align value: {other}")),
        }
    }
}

// ============================================================================
// FontSize
// ============================================================================

/// Font size in millimetres.
///
/// The service requires `FontSize` as a JSON string even though it is a
/// number, so this always serializes as the decimal text of the value:
/// `FontSize::from(4)` goes out as `"4"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FontSize(String);

impl FontSize {
    /// Returns the string sent on the wire.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for FontSize {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u32> for FontSize {
    fn from(size: u32) -> Self {
        Self(size.to_string())
    }
}

impl From<i32> for FontSize {
    fn from(size: i32) -> Self {
        Self(size.to_string())
    }
}

impl From<f64> for FontSize {
    fn from(size: f64) -> Self {
        Self(size.to_string())
    }
}

impl From<&str> for FontSize {
    fn from(size: &str) -> Self {
        Self(size.to_string())
    }
}

impl From<String> for FontSize {
    fn from(size: String) -> Self {
        Self(size)
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Echoed jobs come back as strings, older services send numbers.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Number(number) => Self(number.to_string()),
        })
    }
}

// ============================================================================
// DrawObject
// ============================================================================

/// Default font name used by the service.
pub const DEFAULT_FONT_NAME: &str = "平方字体";

/// One positioned element of a page.
///
/// Geometry is in millimetres. Font fields only matter for
/// [`DrawFormat::Text`] but are always sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DrawObject {
    /// Print inverted.
    pub anti_color: bool,
    /// Horizontal alignment.
    pub align: Align,
    /// Left edge (mm).
    pub x: f64,
    /// Top edge (mm).
    pub y: f64,
    /// Width (mm).
    pub width: f64,
    /// Height (mm).
    pub height: f64,

    /// Text, barcode data or encoded image.
    pub content: String,
    /// Font family.
    pub font_name: String,
    /// Font style flags.
    pub font_style: u32,
    /// Font size (mm), sent as a string.
    pub font_size: FontSize,
    /// Wrap text inside the box.
    pub auto_return: bool,
    /// Content kind.
    pub format: DrawFormat,

    /// Data column for spreadsheet-driven pages; -1 when unused.
    pub column_index: i32,
    /// Line end X (mm).
    pub x1: i32,
    /// Line end Y (mm).
    pub y1: i32,
}

impl Default for DrawObject {
    fn default() -> Self {
        Self {
            anti_color: false,
            align: Align::Left,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            content: String::new(),
            font_name: DEFAULT_FONT_NAME.to_string(),
            font_style: 0,
            font_size: FontSize::default(),
            auto_return: false,
            format: DrawFormat::Text,
            column_index: -1,
            x1: 0,
            y1: 0,
        }
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl DrawObject {
    fn boxed(format: DrawFormat, content: impl Into<String>, geometry: Geometry) -> Self {
        Self {
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            content: content.into(),
            format,
            ..Self::default()
        }
    }

    /// Creates a text object.
    #[must_use]
    pub fn text(content: impl Into<String>, geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::Text, content, geometry)
    }

    /// Creates a QR code object.
    #[must_use]
    pub fn qrcode(data: impl Into<String>, geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::QrCode, data, geometry)
    }

    /// Creates a Code 128 barcode object.
    #[must_use]
    pub fn code128(data: impl Into<String>, geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::Code128, data, geometry)
    }

    /// Creates an EAN-13 barcode object.
    #[must_use]
    pub fn ean13(data: impl Into<String>, geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::Ean13, data, geometry)
    }

    /// Creates an image object from already-encoded content.
    #[must_use]
    pub fn image(encoded: impl Into<String>, geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::Image, encoded, geometry)
    }

    /// Creates an image object from raw image file bytes, base64-encoded.
    ///
    /// The bytes are not decoded or checked.
    #[must_use]
    pub fn image_png(bytes: &[u8], geometry: Geometry) -> Self {
        Self::boxed(DrawFormat::Image, BASE64.encode(bytes), geometry)
    }

    /// Creates a line from (`x`, `y`) to (`x1`, `y1`).
    #[must_use]
    pub fn line(x: f64, y: f64, x1: i32, y1: i32) -> Self {
        Self {
            x,
            y,
            x1,
            y1,
            format: DrawFormat::Line,
            ..Self::default()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl DrawObject {
    /// Sets font family and size.
    #[inline]
    #[must_use]
    pub fn with_font(mut self, name: impl Into<String>, size: impl Into<FontSize>) -> Self {
        self.font_name = name.into();
        self.font_size = size.into();
        self
    }

    /// Sets the font style flags.
    #[inline]
    #[must_use]
    pub fn with_font_style(mut self, style: u32) -> Self {
        self.font_style = style;
        self
    }

    /// Sets alignment.
    #[inline]
    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Enables inverted printing.
    #[inline]
    #[must_use]
    pub fn with_anti_color(mut self) -> Self {
        self.anti_color = true;
        self
    }

    /// Enables text wrapping.
    #[inline]
    #[must_use]
    pub fn with_auto_return(mut self) -> Self {
        self.auto_return = true;
        self
    }

    /// Binds the object to a spreadsheet column.
    #[inline]
    #[must_use]
    pub fn with_column_index(mut self, index: i32) -> Self {
        self.column_index = index;
        self
    }
}

// ============================================================================
// PrintPage
// ============================================================================

/// One printed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrintPage {
    /// 0 no rotation, 3 rotate 180 degrees.
    pub rotate: u32,
    /// Page width (mm); only some models read it.
    pub width: u32,
    /// Times to repeat this page.
    pub repeat: u32,
    /// Spreadsheet feeding `column_index` objects; empty when unused.
    pub excel_file_path: String,
    /// Objects in render order.
    pub draw_objects: Vec<DrawObject>,
}

impl Default for PrintPage {
    fn default() -> Self {
        Self {
            rotate: 0,
            width: 20,
            repeat: 1,
            excel_file_path: String::new(),
            draw_objects: Vec::new(),
        }
    }
}

impl PrintPage {
    /// Creates an empty page with default settings.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a page holding the given objects.
    #[must_use]
    pub fn with_objects(draw_objects: Vec<DrawObject>) -> Self {
        Self {
            draw_objects,
            ..Self::default()
        }
    }

    /// Appends an object on top of the stack.
    #[inline]
    #[must_use]
    pub fn push(mut self, object: DrawObject) -> Self {
        self.draw_objects.push(object);
        self
    }

    /// Sets the rotation flag.
    #[inline]
    #[must_use]
    pub fn with_rotate(mut self, rotate: u32) -> Self {
        self.rotate = rotate;
        self
    }

    /// Sets the repeat count.
    #[inline]
    #[must_use]
    pub fn with_repeat(mut self, repeat: u32) -> Self {
        self.repeat = repeat;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_font_size_is_string_on_wire() {
        let obj = DrawObject::text("x", Geometry::default()).with_font("黑体", 4);
        let value = serde_json::to_value(&obj).expect("serialize");
        assert_eq!(value["FontSize"], json!("4"));

        let obj = obj.with_font("黑体", 2.5);
        let value = serde_json::to_value(&obj).expect("serialize");
        assert_eq!(value["FontSize"], json!("2.5"));
    }

    #[test]
    fn test_font_size_accepts_number_on_decode() {
        let size: FontSize = serde_json::from_value(json!(6)).expect("deserialize");
        assert_eq!(size.as_str(), "6");
    }

    #[test]
    fn test_draw_object_wire_names() {
        let obj = DrawObject::text("HelloWorld", Geometry::new(15.0, 3.0, 15.0, 4.0))
            .with_align(Align::Center);
        let value = serde_json::to_value(&obj).expect("serialize");

        assert_eq!(value["Format"], "TEXT");
        assert_eq!(value["Content"], "HelloWorld");
        assert_eq!(value["Align"], 1);
        assert_eq!(value["X"], 15.0);
        assert_eq!(value["Y"], 3.0);
        assert_eq!(value["ColumnIndex"], -1);
        assert_eq!(value["FontName"], DEFAULT_FONT_NAME);
        assert_eq!(value["AntiColor"], false);
        assert_eq!(value["X1"], 0);
        assert_eq!(value.as_object().map(|o| o.len()), Some(15));
    }

    #[test]
    fn test_format_names() {
        let names: Vec<_> = [
            DrawFormat::Text,
            DrawFormat::QrCode,
            DrawFormat::Code128,
            DrawFormat::Ean13,
            DrawFormat::Image,
            DrawFormat::Line,
        ]
        .into_iter()
        .map(|f| serde_json::to_value(f).expect("serialize"))
        .collect();

        assert_eq!(
            names,
            vec![
                json!("TEXT"),
                json!("QRCODE"),
                json!("CODE_128"),
                json!("EAN_13"),
                json!("Image"),
                json!("LINE"),
            ]
        );
        assert_eq!(DrawFormat::Code128.to_string(), "CODE_128");
    }

    #[test]
    fn test_align_rejects_unknown_on_decode() {
        assert!(serde_json::from_value::<Align>(json!(2)).is_ok());
        assert!(serde_json::from_value::<Align>(json!(3)).is_err());
    }

    #[test]
    fn test_line_and_image_constructors() {
        let line = DrawObject::line(1.0, 2.0, 30, 2);
        assert_eq!(line.format, DrawFormat::Line);
        assert_eq!((line.x1, line.y1), (30, 2));

        let image = DrawObject::image_png(b"\x89PNG", Geometry::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(image.format, DrawFormat::Image);
        assert_eq!(image.content, "iVBORw==");
    }

    #[test]
    fn test_page_preserves_object_order() {
        let page = PrintPage::new()
            .push(DrawObject::text("first", Geometry::default()))
            .push(DrawObject::qrcode("second", Geometry::default()))
            .push(DrawObject::line(0.0, 0.0, 10, 0));

        let value = serde_json::to_value(&page).expect("serialize");
        let objects = value["DrawObjects"].as_array().expect("array");
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[0]["Content"], "first");
        assert_eq!(objects[1]["Format"], "QRCODE");
        assert_eq!(objects[2]["Format"], "LINE");
        assert_eq!(value["Width"], 20);
        assert_eq!(value["Repeat"], 1);
        assert_eq!(value["ExcelFilePath"], "");
    }
}
