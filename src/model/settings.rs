//! Paper and print-head settings sent as `PrintSet`.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// PrintSettings
// ============================================================================

/// Paper, material and print-head parameters for one job.
///
/// Serializes field-for-field to the `PrintSet` object. Dimensions are in
/// millimetres. Values are forwarded as given; the service is the judge of
/// what a model supports.
///
/// # Example
///
/// ```
/// use supvan_printer::PrintSettings;
///
/// let settings = PrintSettings::new()
///     .with_label_size(30, 30)
///     .with_threshold(240);
/// assert_eq!(settings.width, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PrintSettings {
    /// Feed direction: 0 up, 1 down, 2 left, 3 right.
    pub direction: u32,
    /// 0 continuous, 1 gap, 2 centre black mark, 5 black-mark card.
    pub paper_type: u32,
    /// Label height along the feed direction (mm).
    pub height: u32,
    /// Label width along the print head (mm).
    pub width: u32,
    /// Gap between labels (mm).
    pub gap: u32,

    /// Print speed.
    pub speed: u32,
    /// Print darkness, 0-9.
    pub deepness: u32,
    /// Number of copies.
    pub copy: u32,
    /// Collate copies one by one.
    pub one_by_one: bool,
    /// Print head width in dots.
    pub max_dot_value: u32,
    /// Dots per millimetre.
    #[serde(rename = "DPI")]
    pub dpi: f64,
    /// Horizontal offset.
    pub offset_h: i32,
    /// Vertical offset.
    pub offset_v: i32,

    /// 1 continuous sticker, 2 punched sticker, 3 plain tag, 4 2mm, 5 3mm.
    pub material_code: u32,
    /// Material height (mm).
    pub material_heightmm: f64,
    /// Material width (mm).
    pub material_widthmm: f64,
    /// Left margin (mm).
    pub margin_left: f64,
    /// Right margin (mm).
    pub margin_right: f64,
    /// Hole width for punched media (mm).
    pub hole_width: f64,

    /// Print height in dots.
    pub print_heightdot: u32,
    /// Interval between labels.
    pub interval: u32,
    /// 0 none, 1 score line, 2 half cut.
    pub cut_type: u32,
    /// Cut depth. Fixed at 4 by current firmware.
    pub cut_deepness: u32,
    /// 0 thermal transfer, 1 direct thermal.
    #[serde(rename = "RIBBONType")]
    pub ribbon_type: u32,
    /// Darkness threshold; higher prints darker.
    pub threshold: u8,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            direction: 0,
            paper_type: 1,
            height: 30,
            width: 50,
            gap: 3,
            speed: 60,
            deepness: 4,
            copy: 1,
            one_by_one: true,
            max_dot_value: 384,
            dpi: 8.0,
            offset_h: 0,
            offset_v: 0,
            material_code: 3,
            material_heightmm: 30.0,
            material_widthmm: 50.0,
            margin_left: 0.0,
            margin_right: 0.0,
            hole_width: 0.0,
            print_heightdot: 60,
            interval: 1,
            cut_type: 1,
            cut_deepness: 4,
            ribbon_type: 0,
            threshold: 240,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl PrintSettings {
    /// Creates settings with the service defaults (50x30mm gap labels).
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets label width and height in millimetres.
    #[inline]
    #[must_use]
    pub fn with_label_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the paper type code.
    #[inline]
    #[must_use]
    pub fn with_paper_type(mut self, paper_type: u32) -> Self {
        self.paper_type = paper_type;
        self
    }

    /// Sets the feed direction code.
    #[inline]
    #[must_use]
    pub fn with_direction(mut self, direction: u32) -> Self {
        self.direction = direction;
        self
    }

    /// Sets print speed and darkness.
    #[inline]
    #[must_use]
    pub fn with_speed_and_deepness(mut self, speed: u32, deepness: u32) -> Self {
        self.speed = speed;
        self.deepness = deepness;
        self
    }

    /// Sets the number of copies.
    #[inline]
    #[must_use]
    pub fn with_copies(mut self, copy: u32) -> Self {
        self.copy = copy;
        self
    }

    /// Sets left and right margins in millimetres.
    #[inline]
    #[must_use]
    pub fn with_margins(mut self, left: f64, right: f64) -> Self {
        self.margin_left = left;
        self.margin_right = right;
        self
    }

    /// Sets the cut type code.
    #[inline]
    #[must_use]
    pub fn with_cut_type(mut self, cut_type: u32) -> Self {
        self.cut_type = cut_type;
        self
    }

    /// Sets the darkness threshold.
    #[inline]
    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::{Value, json};

    #[test]
    fn test_defaults() {
        let settings = PrintSettings::default();
        assert_eq!(settings.paper_type, 1);
        assert_eq!((settings.width, settings.height), (50, 30));
        assert_eq!(settings.threshold, 240);
        assert!(settings.one_by_one);
    }

    #[test]
    fn test_wire_field_names() {
        let value = serde_json::to_value(PrintSettings::default()).expect("serialize");
        let obj = value.as_object().expect("object");

        for key in [
            "Direction",
            "PaperType",
            "Height",
            "Width",
            "Gap",
            "Speed",
            "Deepness",
            "Copy",
            "OneByOne",
            "MaxDotValue",
            "DPI",
            "OffsetH",
            "OffsetV",
            "MaterialCode",
            "MaterialHeightmm",
            "MaterialWidthmm",
            "MarginLeft",
            "MarginRight",
            "HoleWidth",
            "PrintHeightdot",
            "Interval",
            "CutType",
            "CutDeepness",
            "RIBBONType",
            "Threshold",
        ] {
            assert!(obj.contains_key(key), "missing {key}");
        }
        assert_eq!(obj.len(), 25);
        assert_eq!(obj["DPI"], json!(8.0));
        assert_eq!(obj["OneByOne"], Value::Bool(true));
    }

    #[test]
    fn test_builder_methods() {
        let settings = PrintSettings::new()
            .with_label_size(30, 30)
            .with_copies(2)
            .with_threshold(200);

        let value = serde_json::to_value(&settings).expect("serialize");
        assert_eq!(value["Width"], 30);
        assert_eq!(value["Height"], 30);
        assert_eq!(value["Copy"], 2);
        assert_eq!(value["Threshold"], 200);
    }

    #[test]
    fn test_partial_object_fills_defaults() {
        let settings: PrintSettings =
            serde_json::from_value(json!({"Width": 40})).expect("deserialize");
        assert_eq!(settings.width, 40);
        assert_eq!(settings.height, 30);
    }
}
