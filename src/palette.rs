//! Color helpers: pastel palette generation and hex <-> RGB conversion.
//!
//! Palettes are plain `#rrggbb` strings so they can be stored in figures,
//! serialized, and handed to external legend composition unchanged.

use crate::error::{ChartError, Result};
use plotters::style::RGBColor;

const PASTEL_SATURATION: f64 = 0.8;
const PASTEL_VALUE: f64 = 0.75;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Rgb8> for RGBColor {
    fn from(c: Rgb8) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

/// Generate `number_of_colors` colors evenly spaced in hue at fixed saturation and value.
///
/// Returns an empty palette for `number_of_colors < 1`.
pub fn generate_pastel_palette(number_of_colors: i64) -> Vec<String> {
    if number_of_colors < 1 {
        return Vec::new();
    }
    (0..number_of_colors)
        .map(|index| {
            let hue = index as f64 / number_of_colors as f64;
            rgb_to_hex(hsv_to_rgb8(hue, PASTEL_SATURATION, PASTEL_VALUE))
        })
        .collect()
}

/// HSV (all components in 0..=1) to 8-bit RGB. Channels are truncated, not rounded.
pub fn hsv_to_rgb8(h: f64, s: f64, v: f64) -> Rgb8 {
    let (r, g, b) = hsv_to_rgb(h, s, v);
    Rgb8 {
        r: (r * 255.0) as u8,
        g: (g * 255.0) as u8,
        b: (b * 255.0) as u8,
    }
}

fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

pub fn rgb_to_hex(rgb: Rgb8) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Parse `#rrggbb` (case-insensitive, leading `#` optional).
pub fn hex_to_rgb(hex: &str) -> Result<Rgb8> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ChartError::InvalidColor(hex.to_string()));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|_| ChartError::InvalidColor(hex.to_string()))
    };
    Ok(Rgb8 {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}
