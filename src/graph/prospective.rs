//! Prospective-scenario chart: yearly aspect series drawn as filled areas and lines.

use log::debug;

use super::figure::{
    Axis, Figure, Fill, LegendElements, LinearScale, Lines, Mark, Orientation, Scale, min_max,
};
use super::{DrawOptions, DrawState, Graph, resolve_palette};
use crate::config::{AspectsConfig, GraphConfig};
use crate::error::{ChartError, Result};
use crate::models::ProcessData;

pub const X_AXIS_LABEL: &str = "Années";
pub const DEFAULT_Y_AXIS_LABEL: &str = "Valeur";

const AREA_OPACITY: f64 = 0.3;
const LINE_OPACITY: f64 = 1.0;

/// Yearly values of every configured aspect, each checked against `process.years`.
pub fn get_y_aspects(process: &ProcessData, aspects: &AspectsConfig) -> Result<Vec<Vec<f64>>> {
    aspects
        .series
        .iter()
        .map(|a| {
            let values = process.vector_output(&a.key)?;
            if values.len() != process.years.len() {
                return Err(ChartError::LengthMismatch {
                    what: format!("vector output `{}`", a.key),
                    expected: process.years.len(),
                    actual: values.len(),
                });
            }
            Ok(values.to_vec())
        })
        .collect()
}

fn x_years(process: &ProcessData) -> Vec<f64> {
    process.years.iter().map(|y| *y as f64).collect()
}

/// Global (min, max) over the area and line values of all `processes`; `(0.0, 0.0)` when empty.
pub fn get_prospective_scenario_graphs_y_scales(
    processes: &[ProcessData],
    areas: &AspectsConfig,
    lines: &AspectsConfig,
) -> Result<(f64, f64)> {
    let mut all_y = Vec::new();
    for process in processes {
        for series in get_y_aspects(process, areas)?
            .into_iter()
            .chain(get_y_aspects(process, lines)?)
        {
            all_y.extend(series);
        }
    }
    Ok(min_max(all_y).unwrap_or((0.0, 0.0)))
}

/// Areas and lines over the scenario years.
///
/// Palette order: one color per area, then one per line.
#[derive(Debug, Clone)]
pub struct ProspectiveScenarioGraph {
    title: String,
    y_label: String,
    color_palette: Vec<String>,
    areas: AspectsConfig,
    lines: AspectsConfig,
    state: DrawState,
}

impl ProspectiveScenarioGraph {
    pub fn new(config: GraphConfig, areas: AspectsConfig, lines: AspectsConfig) -> Result<Self> {
        let color_palette = resolve_palette(config.color_palette, areas.len() + lines.len())?;
        Ok(Self {
            title: config.title,
            y_label: DEFAULT_Y_AXIS_LABEL.to_string(),
            color_palette,
            areas,
            lines,
            state: DrawState::NotDrawn,
        })
    }

    pub fn with_y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = label.into();
        self
    }

    fn mark(
        &self,
        aspects: &AspectsConfig,
        palette_offset: usize,
        fill: Fill,
        display_legend: bool,
        process: &ProcessData,
    ) -> Result<Lines> {
        let (opacity, stroke_width) = match fill {
            Fill::Bottom => (AREA_OPACITY, 1),
            Fill::None => (LINE_OPACITY, 2),
        };
        Ok(Lines {
            x: x_years(process),
            y: get_y_aspects(process, aspects)?,
            colors: self.color_palette[palette_offset..palette_offset + aspects.len()].to_vec(),
            opacities: vec![opacity; aspects.len()],
            labels: aspects.series.iter().map(|a| a.name.clone()).collect(),
            fill,
            stroke_width,
            display_legend,
        })
    }

    fn build_figure(&self, process: &ProcessData, options: &DrawOptions) -> Result<Figure> {
        let legend = options.display_default_legend;
        let areas = self.mark(&self.areas, 0, Fill::Bottom, legend, process)?;
        let lines = self.mark(&self.lines, self.areas.len(), Fill::None, legend, process)?;

        let axes = vec![
            Axis {
                scale: Scale::Linear(LinearScale::auto()),
                orientation: Orientation::Horizontal,
                label: X_AXIS_LABEL.to_string(),
                label_offset_px: 40,
                tick_format: Some("0.0f".to_string()),
            },
            Axis {
                scale: Scale::Linear(options.y_scale.unwrap_or_else(LinearScale::auto)),
                orientation: Orientation::Vertical,
                label: self.y_label.clone(),
                label_offset_px: 50,
                tick_format: Some("0.0f".to_string()),
            },
        ];

        Ok(Figure::new(
            self.title.clone(),
            vec![Mark::Lines(areas), Mark::Lines(lines)],
            axes,
        ))
    }
}

impl Graph for ProspectiveScenarioGraph {
    fn draw(&mut self, process: &ProcessData, options: DrawOptions) -> Result<&Figure> {
        if self.state.keeps_figure(options.override_existing) {
            debug!("prospective scenario graph `{}` already drawn, keeping figure", self.title);
        } else {
            let figure = self.build_figure(process, &options)?;
            self.state = DrawState::Drawn(figure);
        }
        self.state.figure("draw")
    }

    fn update(&mut self, process: &ProcessData) -> Result<&Figure> {
        self.state.figure("update")?;
        let x = x_years(process);
        let area_y = get_y_aspects(process, &self.areas)?;
        let line_y = get_y_aspects(process, &self.lines)?;

        let figure = self.state.figure_mut("update")?;
        figure.hold_sync(|marks| {
            for (mark, y) in marks.iter_mut().zip([area_y, line_y]) {
                if let Mark::Lines(lines) = mark {
                    lines.x = x.clone();
                    lines.y = y;
                }
            }
            Ok(())
        })?;
        debug!("prospective scenario graph `{}` updated (revision {})", self.title, figure.revision());
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
    use crate::config::AspectSeries;

    fn aspects(keys: &[&str]) -> AspectsConfig {
        AspectsConfig {
            series: keys
                .iter()
                .map(|k| AspectSeries {
                    name: k.to_uppercase(),
                    key: k.to_string(),
                })
                .collect(),
        }
    }

    fn process() -> ProcessData {
        let mut p = ProcessData {
            years: vec![2020, 2030, 2040],
            ..Default::default()
        };
        p.vector_outputs.insert("co2".into(), vec![10.0, 8.0, 5.0]);
        p.vector_outputs.insert("target".into(), vec![10.0, 6.0, 2.0]);
        p
    }

    #[test]
    fn draw_builds_area_then_line_marks() {
        let mut g =
            ProspectiveScenarioGraph::new(GraphConfig::new("t"), aspects(&["co2"]), aspects(&["target"]))
                .unwrap();
        let fig = g.draw(&process(), DrawOptions::default()).unwrap();
        let marks: Vec<&Lines> = fig.lines().collect();
        assert_eq!(marks.len(), 2);
        assert_eq!(marks[0].fill, Fill::Bottom);
        assert_eq!(marks[0].x, vec![2020.0, 2030.0, 2040.0]);
        assert_eq!(marks[1].y, vec![vec![10.0, 6.0, 2.0]]);

        let legend = g.legend_elements().unwrap();
        assert_eq!(legend.labels, vec!["CO2", "TARGET"]);
        assert_eq!(legend.opacities, vec![0.3, 1.0]);
    }

    #[test]
    fn misaligned_series_is_rejected() {
        let mut p = process();
        p.vector_outputs.insert("co2".into(), vec![1.0]);
        assert!(matches!(
            get_y_aspects(&p, &aspects(&["co2"])),
            Err(ChartError::LengthMismatch { expected: 3, actual: 1, .. })
        ));
    }

    #[test]
    fn y_scales_cover_areas_and_lines() {
        let r = get_prospective_scenario_graphs_y_scales(
            &[process()],
            &aspects(&["co2"]),
            &aspects(&["target"]),
        )
        .unwrap();
        assert_eq!(r, (2.0, 10.0));
        assert_eq!(
            get_prospective_scenario_graphs_y_scales(&[], &aspects(&["co2"]), &aspects(&[]))
                .unwrap(),
            (0.0, 0.0)
        );
    }

    #[test]
    fn update_requires_draw() {
        let mut g =
            ProspectiveScenarioGraph::new(GraphConfig::new("t"), aspects(&["co2"]), aspects(&[]))
                .unwrap();
        assert!(matches!(g.update(&process()), Err(ChartError::NotDrawn { .. })));
        g.draw(&process(), DrawOptions::default()).unwrap();
        let fig = g.update(&process()).unwrap();
        assert_eq!(fig.revision(), 1);
    }
}
