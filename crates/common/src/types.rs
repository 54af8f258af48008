use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color as handed to drawing surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Same color with a fractional alpha in `[0, 1]` (clamped).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }
}

/// Entity color, kept in the notation it was authored in.
///
/// Parses and prints the CSS forms `#rgb`, `#rrggbb` and `hsl(h, s%, l%)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Color {
    /// Hue in degrees, saturation and lightness as fractions in `[0, 1]`.
    Hsl { h: f64, s: f64, l: f64 },
    Rgb { r: u8, g: u8, b: u8 },
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub const fn hsl(h: f64, s: f64, l: f64) -> Self {
        Self::Hsl { h, s, l }
    }

    /// Resolve to an opaque 8-bit color.
    pub fn to_rgba(self) -> Rgba {
        match self {
            Self::Rgb { r, g, b } => Rgba::opaque(r, g, b),
            Self::Hsl { h, s, l } => {
                let s = s.clamp(0.0, 1.0);
                let l = l.clamp(0.0, 1.0);
                let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
                let h = h.rem_euclid(360.0) / 60.0;
                let x = c * (1.0 - (h % 2.0 - 1.0).abs());
                let (r1, g1, b1) = match h as u32 {
                    0 => (c, x, 0.0),
                    1 => (x, c, 0.0),
                    2 => (0.0, c, x),
                    3 => (0.0, x, c),
                    4 => (x, 0.0, c),
                    _ => (c, 0.0, x),
                };
                let m = l - c / 2.0;
                let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
                Rgba::opaque(channel(r1), channel(g1), channel(b1))
            }
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rgb { r, g, b } => write!(f, "#{r:02x}{g:02x}{b:02x}"),
            Self::Hsl { h, s, l } => write!(f, "hsl({h}, {}%, {}%)", s * 100.0, l * 100.0),
        }
    }
}

/// Errors from parsing a color string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ColorParseError {
    #[error("invalid hex color {0:?}")]
    InvalidHex(String),
    #[error("invalid hsl color {0:?}")]
    InvalidHsl(String),
    #[error("unrecognized color notation {0:?}")]
    Unrecognized(String),
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ColorParseError::InvalidHex(s.to_string()));
        }
        if let Some(body) = trimmed
            .strip_prefix("hsl(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_hsl(body).ok_or_else(|| ColorParseError::InvalidHsl(s.to_string()));
        }
        Err(ColorParseError::Unrecognized(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|d| d * 17);
            Some(Color::rgb(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::rgb(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

fn parse_hsl(body: &str) -> Option<Color> {
    let mut parts = body.split(',').map(str::trim);
    let h: f64 = parts.next()?.parse().ok()?;
    let s: f64 = parts.next()?.strip_suffix('%')?.trim().parse().ok()?;
    let l: f64 = parts.next()?.strip_suffix('%')?.trim().parse().ok()?;
    if parts.next().is_some() || !(h.is_finite() && s.is_finite() && l.is_finite()) {
        return None;
    }
    Some(Color::hsl(h, s / 100.0, l / 100.0))
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Pixel dimensions of the drawing surface the projector targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fit a host window size into the canvas bounds, never below one pixel.
    pub fn clamped(width: u32, height: u32, max_width: u32, max_height: u32) -> Self {
        Self {
            width: width.min(max_width).max(1),
            height: height.min(max_height).max(1),
        }
    }

    pub fn half_width(&self) -> f64 {
        self.width as f64 / 2.0
    }

    pub fn half_height(&self) -> f64 {
        self.height as f64 / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1440, 900)
    }
}
