//! Combined legend panel for dashboards showing several charts side by side.
//!
//! Charts expose their legend through [`crate::graph::Graph::legend_elements`];
//! the panel lays the merged items out as a single column or as wrapped rows.

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::text::{estimate_text_width_px, truncate_to_width, wrap_text_to_width};
use super::util::series_color;
use crate::error::{Result, render_err};
use crate::graph::LegendElements;

/// Legend panel arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendLayout {
    /// One item per row, long labels wrapped (side panel).
    Column,
    /// Items flow left to right and wrap onto new rows (band above or below charts).
    Rows,
}

const FONT_PX: u32 = 14;
const LINE_H: i32 = FONT_PX as i32 + 2;
const ROW_GAP: i32 = 6;
const PAD: i32 = 8;
const SWATCH: i32 = 12;
const SWATCH_GAP: i32 = 8;
const TRAILING_GAP: i32 = 16;
const TITLE_FONT_PX: u32 = 16;

/// Position and wrapped text of one legend item, relative to the panel.
#[derive(Debug, Clone, PartialEq)]
struct Placed {
    x: i32,
    y: i32,
    lines: Vec<String>,
}

/// Compute item positions and the total panel height.
fn layout_items(
    labels: &[&str],
    layout: LegendLayout,
    width: i32,
    has_title: bool,
) -> (Vec<Placed>, i32) {
    let top = if has_title {
        PAD + TITLE_FONT_PX as i32 + 8
    } else {
        PAD
    };
    let text_offset = SWATCH + SWATCH_GAP;
    let mut placed = Vec::with_capacity(labels.len());

    match layout {
        LegendLayout::Column => {
            let max_text_w = (width - PAD * 2 - text_offset).max(40) as u32;
            let mut y = top;
            for label in labels {
                let mut lines = wrap_text_to_width(label, FONT_PX, max_text_w);
                if lines.is_empty() {
                    lines.push(String::new());
                }
                let block_h = lines.len() as i32 * LINE_H;
                placed.push(Placed { x: PAD, y, lines });
                y += block_h + ROW_GAP;
            }
            (placed, y - ROW_GAP + PAD)
        }
        LegendLayout::Rows => {
            let usable_w = width - PAD;
            let per_item_cap = ((usable_w - PAD) as f32 * 0.45).max(80.0) as u32;
            let (mut x, mut y) = (PAD, top);
            for label in labels {
                let text = truncate_to_width(label, FONT_PX, per_item_cap);
                let item_w =
                    text_offset + estimate_text_width_px(&text, FONT_PX) as i32 + TRAILING_GAP;
                if x + item_w > usable_w && x > PAD {
                    x = PAD;
                    y += LINE_H + ROW_GAP;
                }
                placed.push(Placed {
                    x,
                    y,
                    lines: vec![text],
                });
                x += item_w;
            }
            let bottom = if placed.is_empty() { top } else { y + LINE_H };
            (placed, bottom + PAD)
        }
    }
}

/// Height in pixels a panel of `width` needs to show every item.
pub fn legend_panel_height_px(
    elements: &LegendElements,
    layout: LegendLayout,
    width: u32,
    title: &str,
) -> u32 {
    let labels: Vec<&str> = elements.labels.iter().map(String::as_str).collect();
    let (_, h) = layout_items(&labels, layout, width as i32, !title.trim().is_empty());
    h.max(1) as u32
}

/// Draw the legend items onto `area` (title optional, pass "" to omit).
pub fn draw_legend_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    elements: &LegendElements,
    title: &str,
    layout: LegendLayout,
) -> Result<()> {
    area.fill(&WHITE).map_err(render_err)?;
    let (w, _) = area.dim_in_pixel();
    let has_title = !title.trim().is_empty();

    if has_title {
        let title_style = TextStyle::from((FontFamily::SansSerif, TITLE_FONT_PX))
            .pos(Pos::new(HPos::Left, VPos::Top));
        area.draw(&Text::new(title, (PAD, PAD), title_style))
            .map_err(render_err)?;
    }

    let label_style =
        TextStyle::from((FontFamily::SansSerif, FONT_PX)).pos(Pos::new(HPos::Left, VPos::Center));
    let labels: Vec<&str> = elements.labels.iter().map(String::as_str).collect();
    let (placed, _) = layout_items(&labels, layout, w as i32, has_title);

    for ((color, _, opacity), item) in elements.iter().zip(&placed) {
        let fill = series_color(color, opacity)?;
        let border = series_color(color, 1.0)?;
        let swatch_top = item.y + (LINE_H - SWATCH) / 2;
        let corners = [(item.x, swatch_top), (item.x + SWATCH, swatch_top + SWATCH)];
        area.draw(&Rectangle::new(corners, fill.filled()))
            .map_err(render_err)?;
        area.draw(&Rectangle::new(corners, border.stroke_width(1)))
            .map_err(render_err)?;

        let text_x = item.x + SWATCH + SWATCH_GAP;
        for (i, line) in item.lines.iter().enumerate() {
            let center_y = item.y + i as i32 * LINE_H + LINE_H / 2;
            area.draw(&Text::new(line.as_str(), (text_x, center_y), label_style.clone()))
                .map_err(render_err)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn elements(labels: &[&str]) -> LegendElements {
        LegendElements {
            colors: labels.iter().map(|_| "#26bfbf".to_string()).collect(),
            labels: labels.iter().map(|l| l.to_string()).collect(),
            opacities: labels.iter().map(|_| 0.5).collect(),
        }
    }

    #[test]
    fn column_height_grows_with_items() {
        let one = legend_panel_height_px(&elements(&["a"]), LegendLayout::Column, 200, "");
        let three =
            legend_panel_height_px(&elements(&["a", "b", "c"]), LegendLayout::Column, 200, "");
        assert_eq!(three - one, 2 * (LINE_H + ROW_GAP) as u32);
    }

    #[test]
    fn rows_wrap_when_width_runs_out() {
        let e = elements(&["Consommations", "Budgets", "Émissions de CO2", "Effets non-CO2"]);
        let wide = legend_panel_height_px(&e, LegendLayout::Rows, 2000, "");
        let narrow = legend_panel_height_px(&e, LegendLayout::Rows, 300, "");
        assert!(narrow > wide);
    }

    #[test]
    fn title_adds_height() {
        let e = elements(&["a"]);
        assert!(
            legend_panel_height_px(&e, LegendLayout::Column, 200, "Légende")
                > legend_panel_height_px(&e, LegendLayout::Column, 200, "")
        );
    }
}
