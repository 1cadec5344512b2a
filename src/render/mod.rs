//! Render figures to **SVG** or **PNG** with plotters.
//!
//! - Grouped bars over ordinal categories
//! - Lines and filled areas over a linear x axis
//! - Locale-aware tick labels using the axis tick format (`0.2f` -> `1.50` / `1,50`)
//! - Inline legend at the figure's legend location, or a separate combined legend panel
//!
//! Text needs a registered font (see [`fonts`]); without one the marks and axis
//! lines are still drawn.

pub mod fonts;
pub mod legend;
pub mod text;
pub mod util;

pub use fonts::{ensure_fonts_registered, fonts_available, registered_font};
pub use legend::{LegendLayout, draw_legend_panel, legend_panel_height_px};

use log::{debug, warn};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::{AreaSeries, LineSeries};
use plotters::style::{FontFamily, TRANSPARENT};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::{Path, PathBuf};

use crate::error::{ChartError, Result, render_err};
use crate::format::{format_tick, map_locale};
use crate::graph::{
    Bars, Figure, Fill, LegendElements, LegendLocation, Lines, Mark, Orientation,
};
use text::truncate_to_width;
use util::{compute_left_label_area_px, resolve_x_range, resolve_y_range, series_color};

type Chart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

const MARGIN: u32 = 16;
const TITLE_FONT_PX: u32 = 22;
const LABEL_FONT_PX: u32 = 13;
const DESC_FONT_PX: u32 = 15;
const Y_LABEL_COUNT: usize = 8;

/// Rendering settings that are not part of the figure itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Locale tag for decimal separators (`"en"`, `"de"`, `"fr"`, ...).
    pub locale: String,
    /// TrueType font to register before drawing text.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            font_path: None,
        }
    }
}

/// Render `figure` to `out_path`: SVG for `.svg`, PNG otherwise.
pub fn render_figure<P: AsRef<Path>>(
    figure: &Figure,
    out_path: P,
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> Result<()> {
    validate(figure)?;
    let text = ensure_fonts_registered(options.font_path.as_deref());
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();

    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_figure(root, figure, options, text)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_figure(root, figure, options, text)?;
    }
    debug!("rendered `{}` to {}", figure.title, out_path.display());
    Ok(())
}

/// Render `figure` as an SVG document held in memory.
pub fn render_figure_svg_string(
    figure: &Figure,
    width: u32,
    height: u32,
    options: &RenderOptions,
) -> Result<String> {
    validate(figure)?;
    let text = ensure_fonts_registered(options.font_path.as_deref());
    let mut buf = String::new();
    {
        let root = SVGBackend::with_string(&mut buf, (width, height)).into_drawing_area();
        draw_figure(root, figure, options, text)?;
    }
    Ok(buf)
}

/// Render a combined legend (e.g. merged from several graphs) to `out_path`.
///
/// The image height follows from the items and `layout`. Fails with
/// [`ChartError::FontUnavailable`] when no font can be registered.
pub fn render_legend_panel<P: AsRef<Path>>(
    elements: &LegendElements,
    out_path: P,
    width: u32,
    layout: LegendLayout,
    title: &str,
    options: &RenderOptions,
) -> Result<()> {
    if !ensure_fonts_registered(options.font_path.as_deref()) {
        return Err(ChartError::FontUnavailable);
    }
    let height = legend_panel_height_px(elements, layout, width, title);
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    if out_path.extension().and_then(|s| s.to_str()) == Some("svg") {
        let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_legend_panel(&root, elements, title, layout)?;
        root.present().map_err(render_err)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
        draw_legend_panel(&root, elements, title, layout)?;
        root.present().map_err(render_err)?;
    }
    Ok(())
}

/// Check that every mark's series line up with its x values and styling.
pub fn validate(figure: &Figure) -> Result<()> {
    for mark in &figure.marks {
        let (kind, x_len, y, colors, labels) = match mark {
            Mark::Bars(b) => ("bars", b.x.len(), &b.y, &b.colors, &b.labels),
            Mark::Lines(l) => ("lines", l.x.len(), &l.y, &l.colors, &l.labels),
        };
        for (i, series) in y.iter().enumerate() {
            if series.len() != x_len {
                return Err(ChartError::LengthMismatch {
                    what: format!("{kind} series {i}"),
                    expected: x_len,
                    actual: series.len(),
                });
            }
        }
        if colors.len() < y.len() {
            return Err(ChartError::Palette {
                required: y.len(),
                actual: colors.len(),
            });
        }
        if labels.len() != colors.len() {
            return Err(ChartError::LengthMismatch {
                what: format!("{kind} labels"),
                expected: colors.len(),
                actual: labels.len(),
            });
        }
    }
    Ok(())
}

/// Opacity of series `i`, defaulting to opaque.
fn opacity_at(opacities: &[f64], i: usize) -> f64 {
    opacities.get(i).copied().unwrap_or(1.0)
}

fn legend_position(location: LegendLocation) -> SeriesLabelPosition {
    match location {
        LegendLocation::TopRight => SeriesLabelPosition::UpperRight,
        LegendLocation::TopLeft => SeriesLabelPosition::UpperLeft,
        LegendLocation::BottomRight => SeriesLabelPosition::LowerRight,
        LegendLocation::BottomLeft => SeriesLabelPosition::LowerLeft,
    }
}

/// Helper that draws to any Plotters backend.
fn draw_figure<DB>(
    root: DrawingArea<DB, Shift>,
    figure: &Figure,
    options: &RenderOptions,
    text: bool,
) -> Result<()>
where
    DB: DrawingBackend,
{
    if !text {
        warn!("drawing `{}` without text, no font registered", figure.title);
    }
    root.fill(&WHITE).map_err(render_err)?;

    // ----------------------------
    // 1) Ranges
    // ----------------------------
    let categories: Option<&[String]> = figure.bars().next().map(|b| b.x.as_slice());
    let has_baseline = figure.bars().next().is_some()
        || figure.lines().any(|l| l.fill == Fill::Bottom);
    let (y_min, y_max) = resolve_y_range(figure.y_scale(), figure.y_extent(), has_baseline);
    let (x_min, x_max) = match categories {
        Some(c) => (0.0, c.len().max(1) as f64),
        None => resolve_x_range(crate::graph::figure::min_max(
            figure.lines().flat_map(|l| l.x.iter().copied()),
        )),
    };

    let x_axis = figure.axis(Orientation::Horizontal);
    let y_axis = figure.axis(Orientation::Vertical);
    let (_, decimal_sep) = map_locale(&options.locale);
    let y_tick_format = y_axis.and_then(|a| a.tick_format.as_deref());
    let x_tick_format = x_axis.and_then(|a| a.tick_format.as_deref());

    // ----------------------------
    // 2) Chart scaffold
    // ----------------------------
    let mut builder = ChartBuilder::on(&root);
    builder.margin(MARGIN);
    if text {
        if !figure.title.trim().is_empty() {
            builder.caption(&figure.title, (FontFamily::SansSerif, TITLE_FONT_PX));
        }
        let left = compute_left_label_area_px(
            y_min,
            y_max,
            Y_LABEL_COUNT,
            LABEL_FONT_PX,
            y_tick_format,
            decimal_sep,
        );
        let bottom = x_axis.map(|a| a.label_offset_px).unwrap_or(40) + 16;
        builder
            .set_label_area_size(LabelAreaPosition::Left, left)
            .set_label_area_size(LabelAreaPosition::Bottom, bottom);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(render_err)?;

    if text {
        let y_fmt = |v: &f64| format_tick(*v, y_tick_format, decimal_sep);
        let x_fmt = |v: &f64| format_tick(*v, x_tick_format, decimal_sep);
        let x_desc = x_axis.map(|a| a.label.as_str()).unwrap_or("");
        let y_desc = y_axis.map(|a| a.label.as_str()).unwrap_or("");

        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .y_labels(Y_LABEL_COUNT)
            .y_label_formatter(&y_fmt)
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style((FontFamily::SansSerif, LABEL_FONT_PX))
            .axis_desc_style((FontFamily::SansSerif, DESC_FONT_PX));
        if categories.is_some() {
            mesh.x_labels(0);
        } else {
            let span = (x_max - x_min).round().max(1.0) as usize;
            mesh.x_labels(span.min(10)).x_label_formatter(&x_fmt);
        }
        mesh.draw().map_err(render_err)?;
    } else {
        draw_bare_axes(&mut chart, (x_min, x_max), (y_min, y_max))?;
    }

    // ----------------------------
    // 3) Marks
    // ----------------------------
    let mut labelled = false;
    for mark in &figure.marks {
        labelled |= match mark {
            Mark::Bars(bars) => draw_bars(&mut chart, bars, text)?,
            Mark::Lines(lines) => draw_lines(&mut chart, lines, text)?,
        };
    }

    if let Some(categories) = categories
        && text
    {
        draw_category_labels(&root, &chart, categories, y_min)?;
    }

    // ----------------------------
    // 4) Inline legend
    // ----------------------------
    if labelled {
        chart
            .configure_series_labels()
            .position(legend_position(figure.legend_location))
            .border_style(TRANSPARENT)
            .background_style(WHITE.mix(0.85))
            .label_font((FontFamily::SansSerif, LABEL_FONT_PX))
            .draw()
            .map_err(render_err)?;
    }

    root.present().map_err(render_err)?;
    Ok(())
}

/// Bar rectangles of series `s` in data coordinates.
fn bar_rects(bars: &Bars, s: usize) -> Vec<((f64, f64), (f64, f64))> {
    let n_series = bars.y.len().max(1);
    let padding = bars.padding.clamp(0.0, 0.9);
    let bar_w = (1.0 - padding) / n_series as f64;
    let series = &bars.y[s];
    series
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let slot_x = i as f64 + padding / 2.0;
            let x0 = slot_x + s as f64 * bar_w;
            ((x0, v.min(0.0)), (x0 + bar_w, v.max(0.0)))
        })
        .collect()
}

/// Returns whether a legend entry was registered.
fn draw_bars<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    bars: &Bars,
    text: bool,
) -> Result<bool> {
    let mut labelled = false;
    for s in 0..bars.y.len() {
        let color = series_color(&bars.colors[s], opacity_at(&bars.opacities, s))?;
        let rects = bar_rects(bars, s)
            .into_iter()
            .filter(|(a, b)| a.0.is_finite() && a.1.is_finite() && b.1.is_finite())
            .map(|(a, b)| Rectangle::new([a, b], color.filled()));
        let anno = chart.draw_series(rects).map_err(render_err)?;
        if text && bars.display_legend {
            anno.label(bars.labels[s].clone()).legend(move |(x, y)| {
                Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
            });
            labelled = true;
        }
    }
    Ok(labelled)
}

/// Returns whether a legend entry was registered.
fn draw_lines<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    lines: &Lines,
    text: bool,
) -> Result<bool> {
    let mut labelled = false;
    for (s, series) in lines.y.iter().enumerate() {
        let opacity = opacity_at(&lines.opacities, s);
        let color = series_color(&lines.colors[s], opacity)?;
        let solid = series_color(&lines.colors[s], 1.0)?;
        let points: Vec<(f64, f64)> = lines
            .x
            .iter()
            .copied()
            .zip(series.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite())
            .collect();

        let anno = match lines.fill {
            Fill::Bottom => chart
                .draw_series(
                    AreaSeries::new(points, 0.0, color.filled())
                        .border_style(solid.stroke_width(lines.stroke_width)),
                )
                .map_err(render_err)?,
            Fill::None => chart
                .draw_series(LineSeries::new(points, color.stroke_width(lines.stroke_width)))
                .map_err(render_err)?,
        };
        if text && lines.display_legend {
            let anno = anno.label(lines.labels[s].clone());
            match lines.fill {
                Fill::Bottom => {
                    anno.legend(move |(x, y)| {
                        Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled())
                    });
                }
                Fill::None => {
                    anno.legend(move |(x, y)| {
                        PathElement::new(vec![(x, y), (x + 16, y)], solid.stroke_width(2))
                    });
                }
            }
            labelled = true;
        }
    }
    Ok(labelled)
}

/// Axis lines only, for charts drawn without a font.
fn draw_bare_axes<DB: DrawingBackend>(
    chart: &mut Chart<'_, DB>,
    (x_min, x_max): (f64, f64),
    (y_min, y_max): (f64, f64),
) -> Result<()> {
    let baseline = 0.0f64.clamp(y_min, y_max);
    chart
        .draw_series([
            PathElement::new(vec![(x_min, baseline), (x_max, baseline)], BLACK.stroke_width(1)),
            PathElement::new(vec![(x_min, y_min), (x_min, y_max)], BLACK.stroke_width(1)),
        ])
        .map_err(render_err)?;
    Ok(())
}

/// Category names centered under each bar group, truncated to the slot width.
fn draw_category_labels<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart<'_, DB>,
    categories: &[String],
    y_min: f64,
) -> Result<()> {
    let style = TextStyle::from((FontFamily::SansSerif, LABEL_FONT_PX))
        .pos(Pos::new(HPos::Center, VPos::Top));
    let slot_px = {
        let (a, _) = chart.backend_coord(&(0.0, y_min));
        let (b, _) = chart.backend_coord(&(1.0, y_min));
        (b - a).max(1) as u32
    };
    for (i, name) in categories.iter().enumerate() {
        let (x, y) = chart.backend_coord(&(i as f64 + 0.5, y_min));
        let label = truncate_to_width(name, LABEL_FONT_PX, slot_px);
        root.draw(&Text::new(label, (x, y + 6), style.clone()))
            .map_err(render_err)?;
    }
    Ok(())
}
