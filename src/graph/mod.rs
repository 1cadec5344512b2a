//! Chart lifecycle: a graph is drawn once from process data, then updated in place.
//!
//! - [`Graph::draw`] builds the figure (scales, axes, marks); a second call is a no-op
//!   unless `override_existing` is set
//! - [`Graph::update`] swaps the marks' data as a single refresh
//! - [`Graph::legend_elements`] exposes colors, labels and opacities for a combined legend
//!
//! `update` and `legend_elements` fail with [`ChartError::NotDrawn`] before the first `draw`.

pub mod figure;
pub mod multidisciplinary;
pub mod prospective;

pub use figure::{
    Axis, Bars, Fill, Figure, LegendElements, LegendLocation, LinearScale, Lines, Mark,
    Orientation, Scale,
};
pub use multidisciplinary::{MultidisciplinaryGraph, get_multidisciplinary_graphs_y_scales};
pub use prospective::{ProspectiveScenarioGraph, get_prospective_scenario_graphs_y_scales};

use crate::error::{ChartError, Result};
use crate::models::ProcessData;

/// Options of a single [`Graph::draw`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawOptions {
    /// Y scale to use, e.g. one shared with other charts. Autoscaled when `None`.
    pub y_scale: Option<LinearScale>,
    /// Rebuild the figure even if it is already drawn.
    pub override_existing: bool,
    /// Show the legend inside the figure.
    pub display_default_legend: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            y_scale: None,
            override_existing: false,
            display_default_legend: true,
        }
    }
}

impl DrawOptions {
    pub fn with_y_scale(mut self, scale: LinearScale) -> Self {
        self.y_scale = Some(scale);
        self
    }

    pub fn overriding(mut self) -> Self {
        self.override_existing = true;
        self
    }

    pub fn without_legend(mut self) -> Self {
        self.display_default_legend = false;
        self
    }
}

/// Whether a graph owns a figure yet. There is no transition back to `NotDrawn`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DrawState {
    #[default]
    NotDrawn,
    Drawn(Figure),
}

impl DrawState {
    pub fn is_drawn(&self) -> bool {
        matches!(self, DrawState::Drawn(_))
    }

    /// True when `draw` must keep the current figure.
    pub fn keeps_figure(&self, override_existing: bool) -> bool {
        self.is_drawn() && !override_existing
    }

    pub fn figure(&self, operation: &'static str) -> Result<&Figure> {
        match self {
            DrawState::Drawn(f) => Ok(f),
            DrawState::NotDrawn => Err(ChartError::NotDrawn { operation }),
        }
    }

    pub fn figure_mut(&mut self, operation: &'static str) -> Result<&mut Figure> {
        match self {
            DrawState::Drawn(f) => Ok(f),
            DrawState::NotDrawn => Err(ChartError::NotDrawn { operation }),
        }
    }
}

pub trait Graph {
    /// Create the figure from `process`, or return the current one when already drawn.
    fn draw(&mut self, process: &ProcessData, options: DrawOptions) -> Result<&Figure>;

    /// Replace the marks' data with values from `process`.
    fn update(&mut self, process: &ProcessData) -> Result<&Figure>;

    fn legend_elements(&self) -> Result<LegendElements>;

    fn state(&self) -> &DrawState;

    fn is_drawn(&self) -> bool {
        self.state().is_drawn()
    }

    fn figure(&self) -> Option<&Figure> {
        match self.state() {
            DrawState::Drawn(f) => Some(f),
            DrawState::NotDrawn => None,
        }
    }
}

/// Use the caller palette if it has at least `required` colors, otherwise generate one.
pub(crate) fn resolve_palette(palette: Option<Vec<String>>, required: usize) -> Result<Vec<String>> {
    match palette {
        Some(p) if p.len() < required => Err(ChartError::Palette {
            required,
            actual: p.len(),
        }),
        Some(p) => {
            for c in &p {
                crate::palette::hex_to_rgb(c)?;
            }
            Ok(p)
        }
        None => Ok(crate::palette::generate_pastel_palette(required as i64)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_drawn_accessors_fail() {
        let mut s = DrawState::NotDrawn;
        assert!(matches!(
            s.figure("update"),
            Err(ChartError::NotDrawn { operation: "update" })
        ));
        assert!(s.figure_mut("legend_elements").is_err());
        assert!(!s.keeps_figure(false));
    }

    #[test]
    fn drawn_state_keeps_figure_unless_overridden() {
        let s = DrawState::Drawn(Figure::new("t", vec![], vec![]));
        assert!(s.keeps_figure(false));
        assert!(!s.keeps_figure(true));
    }

    #[test]
    fn palette_resolution() {
        assert_eq!(resolve_palette(None, 3).unwrap().len(), 3);
        assert!(matches!(
            resolve_palette(Some(vec!["#000000".into()]), 2),
            Err(ChartError::Palette { required: 2, actual: 1 })
        ));
        assert!(matches!(
            resolve_palette(Some(vec!["#000000".into(), "blue".into()]), 2),
            Err(ChartError::InvalidColor(_))
        ));
    }
}
