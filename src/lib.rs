//! sustain_charts
//!
//! Charts for a sustainability-assessment dashboard. Pairs with the `sustain-charts` CLI.
//!
//! ### Features
//! - Multidisciplinary grouped bar chart: budget vs. consumption per resource category
//! - Prospective-scenario chart: yearly aspects as filled areas and lines
//! - Draw once, update in place, export legend elements for a combined dashboard legend
//! - Shared y scales across several charts
//! - Render to SVG/PNG with plotters
//!
//! ### Example
//! ```no_run
//! use sustain_charts::config::{BarsConfig, GraphConfig};
//! use sustain_charts::graph::{DrawOptions, Graph, MultidisciplinaryGraph};
//! use sustain_charts::models::ProcessData;
//! use sustain_charts::paths::DataPaths;
//! use sustain_charts::render::{self, RenderOptions};
//!
//! let bars = BarsConfig::load_default(&DataPaths::default())?;
//! let process = ProcessData::from_json_file("scenario.json")?;
//! let mut graph = MultidisciplinaryGraph::new(GraphConfig::new("Scénario de référence"), bars)?;
//! let figure = graph.draw(&process, DrawOptions::default())?;
//! render::render_figure(figure, "bars.svg", 900, 540, &RenderOptions::default())?;
//! # Ok::<(), sustain_charts::ChartError>(())
//! ```

pub mod cards;
pub mod config;
pub mod error;
pub mod format;
pub mod graph;
pub mod models;
pub mod palette;
pub mod paths;
pub mod render;

pub use error::{ChartError, Result};
pub use format::float_to_int_string;
pub use graph::{
    DrawOptions, Graph, MultidisciplinaryGraph, ProspectiveScenarioGraph,
    get_multidisciplinary_graphs_y_scales,
};
pub use models::ProcessData;
pub use palette::generate_pastel_palette;
