//! Color values for palettes and theme lookups.
//!
//! Supports the hex notations found in theme files:
//!
//! - `#rgb` (each digit doubled)
//! - `#rrggbb`
//! - `#aarrggbb` (alpha first, matching the output of the `opacity()` template modifier)
//!
//! # Example
//!
//! ```rust
//! use tinct::Color;
//!
//! let color = Color::parse("#ffd740").unwrap();
//! assert_eq!(color, Color::rgb(0xff, 0xd7, 0x40));
//! assert_eq!(color.to_hex(), "#ffd740");
//!
//! let translucent = Color::parse("#80ffd740").unwrap();
//! assert_eq!(translucent.a, 0x80);
//! ```

use std::fmt;

/// An 8-bit-per-channel RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha channel.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a hex color string.
    ///
    /// Leading and trailing whitespace is ignored. Returns an error message
    /// describing the problem for anything that is not `#rgb`, `#rrggbb` or
    /// `#aarrggbb`.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| format!("Invalid color '{}': expected a leading '#'", s))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("Invalid hex color: #{}", hex));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("Invalid hex: {}", hex))
        };

        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| format!("Invalid hex: {}", hex))
                };
                Ok(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Color::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => Err(format!(
                "Invalid hex color: #{} (must be 3, 6 or 8 digits)",
                hex
            )),
        }
    }

    /// Formats as `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Formats as `#aarrggbb`.
    pub fn to_hex_argb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.a, self.r, self.g, self.b)
    }

    /// Returns the HSV value component (0-255).
    pub fn value(&self) -> u8 {
        self.r.max(self.g).max(self.b)
    }

    /// Returns a lighter color.
    ///
    /// `factor` is a percentage: 150 returns a color with 50% more
    /// brightness. Once the value channel saturates, the remaining increase
    /// is taken out of the saturation so the color still moves towards white.
    pub fn lighter(&self, factor: u32) -> Self {
        if factor == 0 {
            return *self;
        }
        if factor < 100 {
            return self.darker(10_000 / factor);
        }

        let (h, s, v) = self.to_hsv();
        let mut s = s as f64;
        let mut v = v as f64 * factor as f64 / 100.0;
        if v > 255.0 {
            s -= v - 255.0;
            if s < 0.0 {
                s = 0.0;
            }
            v = 255.0;
        }
        Self::from_hsv(h, s.round() as u8, v.round() as u8, self.a)
    }

    /// Returns a darker color.
    ///
    /// `factor` is a percentage: 200 returns a color with half the brightness.
    pub fn darker(&self, factor: u32) -> Self {
        if factor == 0 {
            return *self;
        }
        if factor < 100 {
            return self.lighter(10_000 / factor);
        }

        let (h, s, v) = self.to_hsv();
        let v = (v as f64 * 100.0 / factor as f64).round() as u8;
        Self::from_hsv(h, s, v, self.a)
    }

    /// Converts to HSV. Hue is in degrees (0-359, or `None` for achromatic
    /// colors), saturation and value in 0-255.
    fn to_hsv(self) -> (Option<f64>, u8, u8) {
        let r = self.r as f64;
        let g = self.g as f64;
        let b = self.b as f64;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let v = max as u8;
        if delta == 0.0 {
            return (None, 0, v);
        }
        let s = (255.0 * delta / max).round() as u8;

        let h = if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let h = if h < 0.0 { h + 360.0 } else { h };
        (Some(h), s, v)
    }

    fn from_hsv(h: Option<f64>, s: u8, v: u8, a: u8) -> Self {
        let Some(h) = h else {
            return Color::rgba(v, v, v, a);
        };

        let s = s as f64 / 255.0;
        let v = v as f64 / 255.0;
        let c = v * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Color::rgba(channel(r), channel(g), channel(b), a)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "{}", self.to_hex())
        } else {
            write!(f, "{}", self.to_hex_argb())
        }
    }
}
