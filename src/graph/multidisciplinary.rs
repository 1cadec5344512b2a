//! Grouped bar chart comparing the budget share allocated to the sector with the
//! share it consumes, per resource category.

use log::debug;

use super::figure::{
    Axis, Bars, Figure, LegendElements, LinearScale, Mark, Orientation, Scale, min_max,
};
use super::{DrawOptions, DrawState, Graph, resolve_palette};
use crate::config::{BarsConfig, GraphConfig};
use crate::error::{ChartError, Result};
use crate::models::ProcessData;

pub const CONSUMPTION_LABEL: &str = "Consommations";
pub const BUDGET_LABEL: &str = "Budgets";
pub const X_AXIS_LABEL: &str = "Catégories";
pub const Y_AXIS_LABEL: &str = "Part du budget mondial (en %)";

const BAR_OPACITY: f64 = 0.5;
const BAR_PADDING: f64 = 0.1;

/// Budget value of every category, in category order.
pub fn get_y_budget_bars(process: &ProcessData, bars: &BarsConfig) -> Result<Vec<f64>> {
    bars.categories
        .iter()
        .map(|c| process.float_output(&c.budget_key))
        .collect()
}

/// Consumption value of every category, in category order.
pub fn get_y_consumption_bars(process: &ProcessData, bars: &BarsConfig) -> Result<Vec<f64>> {
    bars.categories
        .iter()
        .map(|c| process.float_output(&c.consumption_key))
        .collect()
}

/// Global (min, max) over the budget and consumption values of all `processes`.
///
/// Returns `(0.0, 0.0)` when there is nothing to scan. Pass the result to
/// [`LinearScale::from_range`] to give several charts the same y axis.
pub fn get_multidisciplinary_graphs_y_scales(
    processes: &[ProcessData],
    bars: &BarsConfig,
) -> Result<(f64, f64)> {
    let mut all_y = Vec::new();
    for process in processes {
        all_y.extend(get_y_budget_bars(process, bars)?);
        all_y.extend(get_y_consumption_bars(process, bars)?);
    }
    Ok(min_max(all_y).unwrap_or((0.0, 0.0)))
}

/// Budget vs. consumption bars across the configured categories.
///
/// Palette order: index 0 colors the budget bars, index 1 the consumption bars.
#[derive(Debug, Clone)]
pub struct MultidisciplinaryGraph {
    title: String,
    color_palette: Vec<String>,
    bars: BarsConfig,
    state: DrawState,
}

impl MultidisciplinaryGraph {
    pub fn new(config: GraphConfig, bars: BarsConfig) -> Result<Self> {
        let color_palette = resolve_palette(config.color_palette, 2)?;
        Ok(Self {
            title: config.title,
            color_palette,
            bars,
            state: DrawState::NotDrawn,
        })
    }

    pub fn color_palette(&self) -> &[String] {
        &self.color_palette
    }

    pub fn categories(&self) -> &BarsConfig {
        &self.bars
    }

    /// Both series, consumption first, as stored in the bars mark.
    fn y_series(&self, process: &ProcessData) -> Result<Vec<Vec<f64>>> {
        Ok(vec![
            get_y_consumption_bars(process, &self.bars)?,
            get_y_budget_bars(process, &self.bars)?,
        ])
    }

    fn build_figure(&self, process: &ProcessData, options: &DrawOptions) -> Result<Figure> {
        let y_scale = options.y_scale.unwrap_or_else(LinearScale::auto);
        let x_axis = Axis {
            scale: Scale::Ordinal,
            orientation: Orientation::Horizontal,
            label: X_AXIS_LABEL.to_string(),
            label_offset_px: 40,
            tick_format: None,
        };
        let y_axis = Axis {
            scale: Scale::Linear(y_scale),
            orientation: Orientation::Vertical,
            label: Y_AXIS_LABEL.to_string(),
            label_offset_px: 40,
            tick_format: Some("0.2f".to_string()),
        };

        let bars = Bars {
            x: self.bars.names(),
            y: self.y_series(process)?,
            colors: vec![self.color_palette[1].clone(), self.color_palette[0].clone()],
            opacities: vec![BAR_OPACITY; 2],
            labels: vec![CONSUMPTION_LABEL.to_string(), BUDGET_LABEL.to_string()],
            display_legend: options.display_default_legend,
            padding: BAR_PADDING,
        };

        Ok(Figure::new(
            self.title.clone(),
            vec![Mark::Bars(bars)],
            vec![x_axis, y_axis],
        ))
    }
}

impl Graph for MultidisciplinaryGraph {
    fn draw(&mut self, process: &ProcessData, options: DrawOptions) -> Result<&Figure> {
        if self.state.keeps_figure(options.override_existing) {
            debug!("multidisciplinary graph `{}` already drawn, keeping figure", self.title);
        } else {
            let figure = self.build_figure(process, &options)?;
            self.state = DrawState::Drawn(figure);
        }
        self.state.figure("draw")
    }

    fn update(&mut self, process: &ProcessData) -> Result<&Figure> {
        self.state.figure("update")?;
        // Extract before touching the figure so a bad payload leaves it intact.
        let y = self.y_series(process)?;

        let figure = self.state.figure_mut("update")?;
        figure.hold_sync(|marks| match marks.first_mut() {
            Some(Mark::Bars(bars)) => {
                bars.y = y;
                Ok(())
            }
            _ => Err(ChartError::Render("figure has no bars mark".to_string())),
        })?;
        debug!("multidisciplinary graph `{}` updated (revision {})", self.title, figure.revision());
        Ok(&*figure)
    }

    fn legend_elements(&self) -> Result<LegendElements> {
        Ok(self.state.figure("legend_elements")?.legend_elements())
    }

    fn state(&self) -> &DrawState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BarCategory;

    fn bars_config() -> BarsConfig {
        BarsConfig {
            categories: vec![
                BarCategory {
                    name: "Climat".into(),
                    budget_key: "climate_budget".into(),
                    consumption_key: "climate_consumption".into(),
                },
                BarCategory {
                    name: "Biomasse".into(),
                    budget_key: "biomass_budget".into(),
                    consumption_key: "biomass_consumption".into(),
                },
            ],
        }
    }

    fn process(values: [f64; 4]) -> ProcessData {
        let mut p = ProcessData::default();
        for (k, v) in [
            "climate_budget",
            "climate_consumption",
            "biomass_budget",
            "biomass_consumption",
        ]
        .iter()
        .zip(values)
        {
            p.float_outputs.insert(k.to_string(), v);
        }
        p
    }

    #[test]
    fn extraction_follows_category_order() {
        let p = process([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(get_y_budget_bars(&p, &bars_config()).unwrap(), vec![1.0, 3.0]);
        assert_eq!(get_y_consumption_bars(&p, &bars_config()).unwrap(), vec![2.0, 4.0]);
    }

    #[test]
    fn missing_key_names_the_field() {
        let mut p = process([1.0, 2.0, 3.0, 4.0]);
        p.float_outputs.remove("biomass_budget");
        match get_y_budget_bars(&p, &bars_config()) {
            Err(ChartError::MissingField { key, .. }) => assert_eq!(key, "biomass_budget"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn y_scales_of_nothing_is_zero_sentinel() {
        assert_eq!(
            get_multidisciplinary_graphs_y_scales(&[], &bars_config()).unwrap(),
            (0.0, 0.0)
        );
    }

    #[test]
    fn y_scales_span_all_processes() {
        let a = process([1.0, 2.0, 3.0, 4.0]);
        let b = process([-0.5, 2.0, 9.0, 4.0]);
        assert_eq!(
            get_multidisciplinary_graphs_y_scales(&[a, b], &bars_config()).unwrap(),
            (-0.5, 9.0)
        );
    }

    #[test]
    fn draw_builds_consumption_then_budget() {
        let mut g = MultidisciplinaryGraph::new(GraphConfig::new("Scénario"), bars_config()).unwrap();
        let fig = g.draw(&process([1.0, 2.0, 3.0, 4.0]), DrawOptions::default()).unwrap();
        let bars = fig.bars().next().unwrap();
        assert_eq!(bars.x, vec!["Climat", "Biomasse"]);
        assert_eq!(bars.y, vec![vec![2.0, 4.0], vec![1.0, 3.0]]);
        assert_eq!(bars.labels, vec![CONSUMPTION_LABEL, BUDGET_LABEL]);
        assert_eq!(bars.opacities, vec![0.5, 0.5]);
        assert_eq!(fig.title, "Scénario");
    }

    #[test]
    fn update_without_bars_mark_keeps_revision() {
        let mut g = MultidisciplinaryGraph::new(GraphConfig::new("t"), bars_config()).unwrap();
        g.state = DrawState::Drawn(Figure::new("t", vec![], vec![]));
        assert!(matches!(
            g.update(&process([1.0, 2.0, 3.0, 4.0])),
            Err(ChartError::Render(_))
        ));
        assert_eq!(g.figure().unwrap().revision(), 0);
    }

    #[test]
    fn palette_is_swapped_in_the_mark() {
        let palette = vec!["#112233".to_string(), "#445566".to_string()];
        let mut g = MultidisciplinaryGraph::new(
            GraphConfig::new("t").with_palette(palette),
            bars_config(),
        )
        .unwrap();
        g.draw(&process([1.0, 2.0, 3.0, 4.0]), DrawOptions::default()).unwrap();
        let legend = g.legend_elements().unwrap();
        assert_eq!(legend.colors, vec!["#445566", "#112233"]);
    }
}
