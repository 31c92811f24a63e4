//! Core types for gridframe.
//!
//! These are the plain values everything else is built from: colors, text
//! attributes, styles, cells and the geometry used to address a [`Buffer`].
//! They are all `Copy` and compared by value.
//!
//! [`Buffer`]: crate::renderer::Buffer

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::char_width;

// =============================================================================
// Color
// =============================================================================

/// A terminal color reference.
///
/// `Default` means "inherit whatever the terminal uses" and is what a blank
/// cell carries. Colors serialize to and from the strings accepted by
/// [`Color::parse`], which is how themes spell them in TOML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// Terminal default (SGR 39 / 49).
    #[default]
    Default,
    /// ANSI palette index (0-255).
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-231: 6x6x6 RGB cube
    /// - 232-255: Grayscale
    Indexed(u8),
    /// 24-bit true color.
    Rgb(u8, u8, u8),
}

/// Names of the 16 base ANSI colors, indexed by palette slot.
const ANSI_NAMES: [&str; 16] = [
    "black",
    "red",
    "green",
    "yellow",
    "blue",
    "magenta",
    "cyan",
    "white",
    "bright-black",
    "bright-red",
    "bright-green",
    "bright-yellow",
    "bright-blue",
    "bright-magenta",
    "bright-cyan",
    "bright-white",
];

impl Color {
    pub const BLACK: Self = Self::Indexed(0);
    pub const RED: Self = Self::Indexed(1);
    pub const GREEN: Self = Self::Indexed(2);
    pub const YELLOW: Self = Self::Indexed(3);
    pub const BLUE: Self = Self::Indexed(4);
    pub const MAGENTA: Self = Self::Indexed(5);
    pub const CYAN: Self = Self::Indexed(6);
    pub const WHITE: Self = Self::Indexed(7);
    pub const GRAY: Self = Self::Indexed(8);

    /// Create a true color from its channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Create from 0xRRGGBB integer format.
    pub const fn from_rgb_int(value: u32) -> Self {
        Self::Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    /// Check if this is the terminal default color.
    #[inline]
    pub const fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }

    /// Parse a `#rgb` or `#rrggbb` hex string.
    pub fn from_hex(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                let expand = |nibble: u32| ((nibble & 0xf) * 0x11) as u8;
                Ok(Self::Rgb(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 => {
                let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
                Ok(Self::from_rgb_int(value))
            }
            _ => Err(invalid()),
        }
    }

    /// Parse any supported color spelling.
    ///
    /// Accepts `"default"` (or an empty string), hex (`#rgb`, `#rrggbb`),
    /// palette indices (`"ansi:196"` or `"196"`) and the 16 ANSI names
    /// (`"red"`, `"bright-blue"`, ...).
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if lower.is_empty() || lower == "default" {
            return Ok(Self::Default);
        }
        if lower.starts_with('#') {
            return Self::from_hex(&lower);
        }

        let index = lower.strip_prefix("ansi:").unwrap_or(&lower);
        if let Ok(n) = index.parse::<u8>() {
            return Ok(Self::Indexed(n));
        }

        ANSI_NAMES
            .iter()
            .position(|name| *name == lower)
            .map(|i| Self::Indexed(i as u8))
            .ok_or_else(|| Error::InvalidColor(trimmed.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Indexed(i) => write!(f, "ansi:{i}"),
            Self::Rgb(r, g, b) => write!(f, "#{r:02x}{g:02x}{b:02x}"),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Attr: u8 {
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Style
// =============================================================================

/// The attribute set applied to a cell.
///
/// Styles are values: two styles with equal fields are interchangeable, which
/// is what lets the serializer cache escape prefixes per style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub attrs: Attr,
}

impl Style {
    /// The plain style: default colors, no attributes.
    pub const fn new() -> Self {
        Self {
            fg: Color::Default,
            bg: Color::Default,
            attrs: Attr::empty(),
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    pub const fn attrs(mut self, attrs: Attr) -> Self {
        self.attrs = self.attrs.union(attrs);
        self
    }

    pub const fn bold(self) -> Self {
        self.attrs(Attr::BOLD)
    }

    pub const fn italic(self) -> Self {
        self.attrs(Attr::ITALIC)
    }

    pub const fn underline(self) -> Self {
        self.attrs(Attr::UNDERLINE)
    }

    /// True when this style renders exactly like the terminal defaults.
    #[inline]
    pub fn is_plain(&self) -> bool {
        *self == Self::new()
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// Glyph stored in the cell trailing a 2-wide glyph.
pub const CONTINUATION: char = '\0';

/// A single grid position: one glyph, its display width and its style.
///
/// A 2-wide glyph at column `x` is always followed by a continuation cell
/// (glyph [`CONTINUATION`], width 0) at `x + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub width: u8,
    pub style: Style,
}

impl Cell {
    /// A blank cell: space, width 1, plain style.
    pub const fn blank() -> Self {
        Self {
            glyph: ' ',
            width: 1,
            style: Style::new(),
        }
    }

    /// A space carrying `style`.
    pub const fn space(style: Style) -> Self {
        Self {
            glyph: ' ',
            width: 1,
            style,
        }
    }

    /// Create a cell for a printable glyph.
    ///
    /// Zero-width glyphs (control characters, combining marks) cannot occupy
    /// a cell on their own and are stored as a space.
    pub fn new(glyph: char, style: Style) -> Self {
        match char_width(glyph) {
            0 => Self::space(style),
            w => Self {
                glyph,
                width: w as u8,
                style,
            },
        }
    }

    /// The cell trailing a wide glyph.
    pub const fn continuation(style: Style) -> Self {
        Self {
            glyph: CONTINUATION,
            width: 0,
            style,
        }
    }

    #[inline]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    #[inline]
    pub const fn is_wide(&self) -> bool {
        self.width == 2
    }

    /// Space glyph with the plain style.
    #[inline]
    pub fn is_blank(&self) -> bool {
        *self == Self::blank()
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank()
    }
}

// =============================================================================
// Geometry
// =============================================================================

/// A single cell coordinate. Signed so that callers can address positions
/// left of or above a buffer; those simply clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

/// Width and height in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// A rectangular region in some buffer's coordinate space.
///
/// A rect with a non-positive width or height is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A zero-origin rect covering `size`.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width as i32, size.height as i32)
    }

    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rect, negative extents clamped to zero.
    pub fn size(&self) -> Size {
        let clamp = |v: i32| v.clamp(0, i32::from(u16::MAX)) as u16;
        Size::new(clamp(self.width), clamp(self.height))
    }

    /// One past the last column.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// One past the last row.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());

        if x2 > x1 && y2 > y1 {
            Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Shrink by `n` cells on every side.
    pub fn inset(&self, n: i32) -> Rect {
        Rect::new(
            self.x.saturating_add(n),
            self.y.saturating_add(n),
            (self.width - 2 * n).max(0),
            (self.height - 2 * n).max(0),
        )
    }
}

// =============================================================================
// Text & Border Enums
// =============================================================================

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Box-drawing style for [`Buffer::draw_border`].
///
/// [`Buffer::draw_border`]: crate::renderer::Buffer::draw_border
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
    /// ─ │ ┌ ┐ └ ┘
    #[default]
    Single,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold,
    /// - | + + + +
    Ascii,
}

/// The six glyphs a border is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub horizontal: char,
    pub vertical: char,
    pub top_left: char,
    pub top_right: char,
    pub bottom_right: char,
    pub bottom_left: char,
}

impl BorderStyle {
    pub const fn glyphs(&self) -> BorderGlyphs {
        let (horizontal, vertical, top_left, top_right, bottom_right, bottom_left) = match self {
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
        };
        BorderGlyphs {
            horizontal,
            vertical,
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }
}
