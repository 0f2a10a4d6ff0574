//! Core types for dcmaui-native.
//!
//! These types define the foundation that everything builds on: identifiers,
//! property bags, geometry, colors and the flexbox enums the property mapper
//! produces before they are handed to taffy.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Identifiers and property bags
// =============================================================================

/// Caller-supplied opaque view identifier.
pub type ViewId = String;

/// Untyped key/value configuration describing a view's desired state.
pub type Props = Map<String, Value>;

// =============================================================================
// Geometry
// =============================================================================

/// A view's box in its superview's coordinate space, in points.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    /// Create a new frame.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// A frame with zero area carries no usable geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// The frame's bounds: same size, origin at zero.
    #[inline]
    pub fn bounds(&self) -> Self {
        Self::new(0.0, 0.0, self.width, self.height)
    }
}

/// Size of the host's root surface in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 390.0,
            height: 844.0,
        }
    }
}

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Alpha 255 = fully opaque, 0 = fully transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Transparent color.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Check if color is fully opaque.
    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    /// Parse a hex color string.
    ///
    /// Supports `#RGB`, `#RRGGBB` and `#AARRGGBB` (alpha first, the Android
    /// and UIKit bridge convention). The `#` prefix is optional.
    ///
    /// # Examples
    ///
    /// ```
    /// use dcmaui_native::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#ff0000"), Some(Rgba::rgb(255, 0, 0)));
    /// assert_eq!(Rgba::from_hex("#80ff0000"), Some(Rgba::new(255, 0, 0, 128)));
    /// assert_eq!(Rgba::from_hex("fff"), Some(Rgba::WHITE));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        fn hex_digit(c: u8) -> Option<u8> {
            match c {
                b'0'..=b'9' => Some(c - b'0'),
                b'a'..=b'f' => Some(c - b'a' + 10),
                b'A'..=b'F' => Some(c - b'A' + 10),
                _ => None,
            }
        }

        fn hex_byte(s: &[u8], i: usize) -> Option<u8> {
            let high = hex_digit(s[i])?;
            let low = hex_digit(s[i + 1])?;
            Some((high << 4) | low)
        }

        let bytes = hex.as_bytes();
        match bytes.len() {
            // #RGB -> expand to #RRGGBB
            3 => {
                let r = hex_digit(bytes[0])?;
                let g = hex_digit(bytes[1])?;
                let b = hex_digit(bytes[2])?;
                Some(Self::rgb((r << 4) | r, (g << 4) | g, (b << 4) | b))
            }
            6 => {
                let r = hex_byte(bytes, 0)?;
                let g = hex_byte(bytes, 2)?;
                let b = hex_byte(bytes, 4)?;
                Some(Self::rgb(r, g, b))
            }
            // #AARRGGBB
            8 => {
                let a = hex_byte(bytes, 0)?;
                let r = hex_byte(bytes, 2)?;
                let g = hex_byte(bytes, 4)?;
                let b = hex_byte(bytes, 6)?;
                Some(Self::new(r, g, b, a))
            }
            _ => None,
        }
    }

    /// Parse any supported color format: hex or the `transparent` keyword.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if input.eq_ignore_ascii_case("transparent") {
            return Some(Self::TRANSPARENT);
        }
        Self::from_hex(input)
    }
}

// =============================================================================
// Dimension
// =============================================================================

/// A `{value, unit}` dimensional value from a property bag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    /// Let the flex engine decide.
    #[default]
    Auto,
    /// Absolute size in points.
    Point(f32),
    /// Percentage of the parent (0-100).
    Percent(f32),
}

// =============================================================================
// Flex Enums
// =============================================================================

/// Flex direction for container layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
    ColumnReverse,
    RowReverse,
}

impl FlexDirection {
    /// Map a CSS keyword; unrecognised values fall back to column.
    pub fn from_css(value: &str) -> Self {
        match value {
            "row" => Self::Row,
            "row-reverse" => Self::RowReverse,
            "column-reverse" => Self::ColumnReverse,
            _ => Self::Column,
        }
    }
}

/// Flex wrap behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlexWrap {
    #[default]
    NoWrap,
    Wrap,
    WrapReverse,
}

impl FlexWrap {
    pub fn from_css(value: &str) -> Self {
        match value {
            "wrap" => Self::Wrap,
            "wrap-reverse" => Self::WrapReverse,
            _ => Self::NoWrap,
        }
    }
}

/// Justify content (main axis alignment).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JustifyContent {
    #[default]
    FlexStart,
    Center,
    FlexEnd,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
}

impl JustifyContent {
    /// Map a CSS keyword; unrecognised values fall back to flex-start.
    pub fn from_css(value: &str) -> Self {
        match value {
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            "space-evenly" => Self::SpaceEvenly,
            _ => Self::FlexStart,
        }
    }
}

/// Cross axis alignment shared by `alignItems`, `alignSelf` and `alignContent`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Auto,
    FlexStart,
    Center,
    FlexEnd,
    #[default]
    Stretch,
    Baseline,
    SpaceBetween,
    SpaceAround,
}

impl Align {
    /// Map a CSS keyword; unrecognised values fall back to `fallback`.
    pub fn from_css(value: &str, fallback: Self) -> Self {
        match value {
            "auto" => Self::Auto,
            "flex-start" => Self::FlexStart,
            "center" => Self::Center,
            "flex-end" => Self::FlexEnd,
            "stretch" => Self::Stretch,
            "baseline" => Self::Baseline,
            "space-between" => Self::SpaceBetween,
            "space-around" => Self::SpaceAround,
            _ => fallback,
        }
    }
}

/// Display mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Flex,
    None,
}

impl Display {
    pub fn from_css(value: &str) -> Self {
        match value {
            "none" => Self::None,
            _ => Self::Flex,
        }
    }
}

/// Overflow behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}

impl Overflow {
    pub fn from_css(value: &str) -> Self {
        match value {
            "hidden" => Self::Hidden,
            "scroll" => Self::Scroll,
            _ => Self::Visible,
        }
    }
}

/// Position type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

impl Position {
    pub fn from_css(value: &str) -> Self {
        match value {
            "absolute" => Self::Absolute,
            _ => Self::Relative,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
