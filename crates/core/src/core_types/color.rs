//! Hex colors, linear RGB blending, and the fire color ramp
//!
//! Every particle kind maps its lifecycle progress to a color through the
//! helpers here. Colors travel as 24-bit `#rrggbb` strings at the edges
//! (configuration, FFI, logs) and as [`Rgb`] inside the engine.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Errors produced when building colors or ramps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// The string is not a 6-digit hex color (`#rrggbb` or `rrggbb`)
    InvalidHex(String),
    /// A ramp needs at least two stops to interpolate between
    TooFewStops(usize),
}

impl fmt::Display for ColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorError::InvalidHex(s) => write!(f, "invalid hex color '{s}'"),
            ColorError::TooFewStops(n) => {
                write!(f, "color ramp needs at least 2 stops, got {n}")
            }
        }
    }
}

impl std::error::Error for ColorError {}

/// 24-bit RGB color.
///
/// Serializes as a lowercase `#rrggbb` string so configuration files stay
/// readable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value. Bits above 24 are ignored.
    #[must_use]
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as u8,
            g: ((packed >> 8) & 0xff) as u8,
            b: (packed & 0xff) as u8,
        }
    }

    #[must_use]
    pub const fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Linear blend toward `other`, channel by channel.
    ///
    /// Each channel is `round(a + (b - a) * t)`. `t` is not clamped, so values
    /// outside `[0, 1]` extrapolate; the result is then clamped to the byte
    /// range because a 24-bit color cannot hold anything else.
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        #[inline]
        fn channel(a: u8, b: u8, t: f32) -> u8 {
            let a = f32::from(a);
            let b = f32::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Rgb {
            r: channel(self.r, other.r, t),
            g: channel(self.g, other.g, t),
            b: channel(self.b, other.b, t),
        }
    }

    /// Normalized `[r, g, b]` in `0.0..=1.0`, the layout instance buffers use.
    #[must_use]
    pub fn to_unit(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_string()));
        }
        u32::from_str_radix(digits, 16)
            .map(Rgb::from_u32)
            .map_err(|_| ColorError::InvalidHex(s.to_string()))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Interpolate between two hex colors.
///
/// # Errors
///
/// Returns [`ColorError::InvalidHex`] if either input is not a 6-digit hex color.
///
/// # Example
///
/// ```
/// use absolution_fx_core::lerp_hex;
///
/// assert_eq!(lerp_hex("#000000", "#ffffff", 0.5).unwrap(), "#808080");
/// assert_eq!(lerp_hex("#ff9800", "#4e342e", 0.0).unwrap(), "#ff9800");
/// ```
pub fn lerp_hex(a: &str, b: &str, t: f32) -> Result<String, ColorError> {
    let a: Rgb = a.parse()?;
    let b: Rgb = b.parse()?;
    Ok(a.lerp(b, t).to_string())
}

/// Fire palette from base to tip: hottest stops first, smoke browns last.
pub const FIRE_COLORS: [Rgb; 9] = [
    Rgb::from_u32(0xfffbe6), // pale yellow
    Rgb::from_u32(0xffd700), // gold
    Rgb::from_u32(0xffb300), // orange
    Rgb::from_u32(0xff9800), // deep orange
    Rgb::from_u32(0xff5722), // red-orange
    Rgb::from_u32(0xe65100), // dark red-orange
    Rgb::from_u32(0xb71c1c), // deep red
    Rgb::from_u32(0x4e342e), // brown (smoke)
    Rgb::from_u32(0x2d1a00), // dark brown (smoke tip)
];

/// Ordered color stops sampled by lifecycle progress.
///
/// Sampling spreads `position` over `len - 2` segments, so the final stop is
/// only ever reached as the far end of the last segment. With the default
/// [`FIRE_COLORS`] this keeps flames out of the darkest smoke brown, which is
/// reserved for the smoke field's tip color.
///
/// A two-stop ramp has no `len - 2` segments to spread over; it uses a span
/// of one instead, so `position` blends straight from the first stop to the
/// second rather than dividing by zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Rgb>", into = "Vec<Rgb>")]
pub struct ColorRamp {
    stops: Vec<Rgb>,
}

impl ColorRamp {
    /// # Errors
    ///
    /// Returns [`ColorError::TooFewStops`] when fewer than two stops are given.
    pub fn new(stops: Vec<Rgb>) -> Result<Self, ColorError> {
        if stops.len() < 2 {
            return Err(ColorError::TooFewStops(stops.len()));
        }
        Ok(Self { stops })
    }

    /// The default fire palette.
    #[must_use]
    pub fn fire() -> Self {
        Self {
            stops: FIRE_COLORS.to_vec(),
        }
    }

    #[must_use]
    pub fn stops(&self) -> &[Rgb] {
        &self.stops
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Always false; a ramp holds at least two stops.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Pick the segment for `position` and blend within it.
    ///
    /// The segment index is clamped to `[0, len - 2]` and the in-segment
    /// fraction to `[0, 1]`, so any finite `position` yields a valid color.
    #[must_use]
    pub fn sample(&self, position: f32) -> Rgb {
        let last_segment = self.stops.len() - 2;
        let span = last_segment.max(1) as f32;
        let scaled = position * span;

        if scaled.is_nan() {
            return self.stops[0];
        }

        let idx = (scaled.floor().max(0.0) as usize).min(last_segment);
        let frac = (scaled - idx as f32).clamp(0.0, 1.0);

        self.stops[idx].lerp(self.stops[idx + 1], frac)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        Self::fire()
    }
}

impl TryFrom<Vec<Rgb>> for ColorRamp {
    type Error = ColorError;

    fn try_from(value: Vec<Rgb>) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorRamp> for Vec<Rgb> {
    fn from(value: ColorRamp) -> Self {
        value.stops
    }
}
