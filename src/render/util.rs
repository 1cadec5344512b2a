//! Utility functions for rendering: colors, axis ranges, label area sizing.

use plotters::prelude::*;

use super::text::estimate_text_width_px;
use crate::error::Result;
use crate::format::format_tick;
use crate::graph::LinearScale;
use crate::palette::hex_to_rgb;

/// `#rrggbb` plus opacity to a plotters color.
pub fn series_color(hex: &str, opacity: f64) -> Result<RGBAColor> {
    let rgb: RGBColor = hex_to_rgb(hex)?.into();
    Ok(rgb.mix(opacity.clamp(0.0, 1.0)))
}

/// Resolve the y range to draw: fixed scale bounds win, missing bounds come from the data.
///
/// `include_zero` keeps the baseline of bars and filled areas visible. Degenerate
/// ranges (e.g. the `(0.0, 0.0)` sentinel) are widened by one unit on each side.
pub fn resolve_y_range(
    scale: LinearScale,
    extent: Option<(f64, f64)>,
    include_zero: bool,
) -> (f64, f64) {
    let (mut lo, mut hi) = extent.unwrap_or((0.0, 1.0));
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    // headroom above the tallest mark when autoscaling
    let pad = (hi - lo).abs() * 0.05;
    let mut min = scale.min.unwrap_or(if lo < 0.0 { lo - pad } else { lo });
    let mut max = scale.max.unwrap_or(hi + pad);
    if min > max {
        std::mem::swap(&mut min, &mut max);
    }
    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }
    (min, max)
}

/// Widen a degenerate x range so plotters gets a non-empty axis.
pub fn resolve_x_range(extent: Option<(f64, f64)>) -> (f64, f64) {
    match extent {
        Some((lo, hi)) if (hi - lo).abs() >= f64::EPSILON => (lo, hi),
        Some((lo, _)) => (lo - 1.0, lo + 1.0),
        None => (0.0, 1.0),
    }
}

/// Compute a tight left label area width for the Y axis (in pixels),
/// based on the formatted tick labels that will appear.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    tick_format: Option<&str>,
    decimal_sep: char,
) -> u32 {
    let mut max_px = 0u32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        let s = format_tick(v, tick_format, decimal_sep);
        max_px = max_px.max(estimate_text_width_px(&s, font_px));
    }
    // tick marks + axis description
    max_px.saturating_add(40).clamp(56, 160)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_range_keeps_baseline_and_headroom() {
        let (lo, hi) = resolve_y_range(LinearScale::auto(), Some((2.0, 10.0)), true);
        assert_eq!(lo, 0.0);
        assert!((hi - 10.5).abs() < 1e-9);
    }

    #[test]
    fn fixed_scale_wins() {
        let r = resolve_y_range(LinearScale::fixed(-1.0, 20.0), Some((2.0, 10.0)), true);
        assert_eq!(r, (-1.0, 20.0));
    }

    #[test]
    fn sentinel_range_is_widened() {
        let r = resolve_y_range(LinearScale::fixed(0.0, 0.0), None, true);
        assert_eq!(r, (-1.0, 1.0));
    }

    #[test]
    fn color_parsing_with_opacity() {
        let c = series_color("#bf2626", 0.5).unwrap();
        assert_eq!((c.0, c.1, c.2), (191, 38, 38));
        assert!((c.3 - 0.5).abs() < 1e-9);
        assert!(series_color("nope", 1.0).is_err());
    }

    #[test]
    fn label_area_is_clamped() {
        let px = compute_left_label_area_px(0.0, 1.0, 8, 13, Some("0.2f"), '.');
        assert!((56..=160).contains(&px));
    }
}
