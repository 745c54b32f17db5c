/*!
 * Subtitle overlay style compilation.
 *
 * Turns font, color, position, and margin options into the `force_style`
 * parameter block consumed by ffmpeg's subtitles filter. Compilation is a
 * pure function: unknown inputs fall back to defaults instead of failing.
 */

/// Overlay style configuration for the burn step
#[derive(Debug, Clone, PartialEq)]
pub struct StyleSpec {
    /// Font size in points
    pub font_size: u32,

    /// Font family name
    pub font_name: String,

    /// Primary text color name
    pub primary_color: String,

    /// Outline color name
    pub outline_color: String,

    /// Background color name, "none" for no background box
    pub background_color: String,

    /// Subtitle position, "top center" or anything else for bottom center
    pub position: String,

    /// Left margin in pixels
    pub margin_left: u32,

    /// Right margin in pixels
    pub margin_right: u32,

    /// Vertical margin in pixels
    pub margin_vertical: u32,

    /// Outline width
    pub outline: u32,

    /// Shadow depth
    pub shadow: u32,
}

impl Default for StyleSpec {
    fn default() -> Self {
        StyleSpec {
            font_size: 24,
            font_name: "Arial".to_string(),
            primary_color: "white".to_string(),
            outline_color: "black".to_string(),
            background_color: "none".to_string(),
            position: "bottom".to_string(),
            margin_left: 50,
            margin_right: 50,
            margin_vertical: 20,
            outline: 1,
            shadow: 1,
        }
    }
}

/// Convert a color name to the BGR hexadecimal form the subtitle renderer
/// expects. Unknown names fall back to white; "none" maps to an empty string.
pub fn color_to_hex(color_name: &str) -> &'static str {
    match color_name.to_lowercase().as_str() {
        "white" => "&HFFFFFF&",
        "yellow" => "&H00FFFF&",
        "black" => "&H000000&",
        "green" => "&H00FF00&",
        "cyan" => "&HFFFF00&",
        "gray" => "&H808080&",
        "none" => "",
        _ => "&HFFFFFF&",
    }
}

/// Numeric alignment code for a position name. "top center" is 8, everything
/// else (including unrecognized values) lands at bottom center, 2.
pub fn alignment_code(position: &str) -> u8 {
    match position {
        "top center" => 8,
        _ => 2,
    }
}

/// Compile a style spec into the comma-joined `key=value` block for
/// `force_style`. Key order is fixed; a background color other than "none"
/// switches the border style from outline (1) to an opaque box (3) and adds
/// the `BackColour` key.
pub fn compile(spec: &StyleSpec) -> String {
    let mut components = vec![
        format!("FontSize={}", spec.font_size),
        format!("FontName={}", spec.font_name),
        format!("PrimaryColour={}", color_to_hex(&spec.primary_color)),
        format!("OutlineColour={}", color_to_hex(&spec.outline_color)),
        format!("MarginL={}", spec.margin_left),
        format!("MarginR={}", spec.margin_right),
        format!("MarginV={}", spec.margin_vertical),
        format!("Outline={}", spec.outline),
        format!("Shadow={}", spec.shadow),
        format!("Alignment={}", alignment_code(&spec.position)),
    ];

    if spec.background_color == "none" {
        components.push("BorderStyle=1".to_string());
        components.push("Outline=1".to_string());
    } else {
        components.push(format!(
            "BackColour={}",
            color_to_hex(&spec.background_color)
        ));
        components.push("BorderStyle=3".to_string());
        components.push("Outline=1".to_string());
    }

    components.join(",")
}
