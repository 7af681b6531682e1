//! Cell formatting types.
//!
//! These serialize directly into the wire protocol's format objects, so the
//! enum variant names follow its SCREAMING_SNAKE_CASE vocabulary.

use serde::Serialize;

/// An RGBA color with channels in `[0.0, 1.0]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    /// An opaque color from float channels
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 1.0,
        }
    }

    /// An opaque color from 8-bit channels
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red as f32 / 255.0, green as f32 / 255.0, blue as f32 / 255.0)
    }

    pub const WHITE: Color = Color {
        red: 1.0,
        green: 1.0,
        blue: 1.0,
        alpha: 1.0,
    };

    pub const BLACK: Color = Color {
        red: 0.0,
        green: 0.0,
        blue: 0.0,
        alpha: 1.0,
    };
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalAlign {
    Top,
    Middle,
    Bottom,
}

/// Which edge of a cell a border applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BorderSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl BorderSide {
    /// All four sides, for applying a uniform border
    pub const ALL: [BorderSide; 4] = [
        BorderSide::Top,
        BorderSide::Bottom,
        BorderSide::Left,
        BorderSide::Right,
    ];

    /// The key this side uses inside a `borders` object
    pub fn wire_key(self) -> &'static str {
        match self {
            BorderSide::Top => "top",
            BorderSide::Bottom => "bottom",
            BorderSide::Left => "left",
            BorderSide::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BorderStyle {
    Solid,
    SolidMedium,
    SolidThick,
    Dotted,
    Dashed,
    Double,
}

/// The style and color of one border edge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BorderFormat {
    pub style: BorderStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl BorderFormat {
    pub fn new(style: BorderStyle) -> Self {
        Self { style, color: None }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NumberFormatType {
    Text,
    Number,
    Percent,
    Currency,
    Date,
    Time,
    DateTime,
    Scientific,
}

/// A number format, as a type plus an optional display pattern
///
/// The preset constructors cover the common patterns; [`NumberFormat::custom`]
/// takes any pattern the remote renderer understands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumberFormat {
    #[serde(rename = "type")]
    pub format_type: NumberFormatType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

impl NumberFormat {
    fn preset(format_type: NumberFormatType, pattern: &str) -> Self {
        Self {
            format_type,
            pattern: Some(pattern.to_string()),
        }
    }

    pub fn custom(format_type: NumberFormatType, pattern: &str) -> Self {
        Self::preset(format_type, pattern)
    }

    /// Let the renderer pick a format from the value
    pub fn automatic() -> Self {
        Self {
            format_type: NumberFormatType::Number,
            pattern: None,
        }
    }

    /// Plain text, no numeric interpretation
    pub fn text() -> Self {
        Self {
            format_type: NumberFormatType::Text,
            pattern: None,
        }
    }

    pub fn number() -> Self {
        Self::preset(NumberFormatType::Number, "#,##0.00")
    }

    pub fn percent() -> Self {
        Self::preset(NumberFormatType::Percent, "0.00%")
    }

    pub fn scientific() -> Self {
        Self::preset(NumberFormatType::Scientific, "0.00E+00")
    }

    /// Negative amounts in parentheses
    pub fn financial() -> Self {
        Self::preset(NumberFormatType::Number, "#,##0.00;(#,##0.00)")
    }

    pub fn currency() -> Self {
        Self::preset(NumberFormatType::Currency, "\"$\"#,##0.00")
    }

    /// Currency rounded to whole units
    pub fn currency_rounded() -> Self {
        Self::preset(NumberFormatType::Currency, "\"$\"#,##0")
    }

    pub fn date() -> Self {
        Self::preset(NumberFormatType::Date, "M/d/yyyy")
    }

    pub fn time() -> Self {
        Self::preset(NumberFormatType::Time, "h:mm:ss am/pm")
    }

    pub fn datetime() -> Self {
        Self::preset(NumberFormatType::DateTime, "M/d/yyyy H:mm:ss")
    }

    /// Elapsed time, hours unbounded
    pub fn duration() -> Self {
        Self::preset(NumberFormatType::Time, "[h]:mm:ss")
    }
}
