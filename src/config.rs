//! Typed definitions loaded from the dashboard's JSON files, and construction-time graph settings.

use crate::error::Result;
use crate::paths::DataPaths;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read and deserialize a JSON file.
pub fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let s = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&s)?)
}

/// One category of the multidisciplinary bar chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarCategory {
    /// Displayed category name (x tick label).
    pub name: String,
    /// `float_outputs` key of the budget share.
    pub budget_key: String,
    /// `float_outputs` key of the consumed share.
    pub consumption_key: String,
}

/// Ordered bar categories (`multidisciplinary_bars.json`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarsConfig {
    pub categories: Vec<BarCategory>,
}

impl BarsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    pub fn load_default(paths: &DataPaths) -> Result<Self> {
        Self::load(paths.multidisciplinary_bars())
    }

    pub fn names(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// One series of the prospective-scenario graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSeries {
    /// Legend label.
    pub name: String,
    /// `vector_outputs` key of the yearly values.
    pub key: String,
}

/// Ordered aspect series (`prospective_scenario_aspects_{areas,lines}.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AspectsConfig {
    pub series: Vec<AspectSeries>,
}

impl AspectsConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_json(path)
    }

    /// Load `(areas, lines)` from the default locations.
    pub fn load_default(paths: &DataPaths) -> Result<(Self, Self)> {
        Ok((
            Self::load(paths.prospective_scenario_aspects_areas())?,
            Self::load(paths.prospective_scenario_aspects_lines())?,
        ))
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// One dashboard card showing a scalar output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub title: String,
    /// `float_outputs` key of the displayed value.
    pub key: String,
    #[serde(default)]
    pub unit: String,
}

pub fn load_cards<P: AsRef<Path>>(path: P) -> Result<Vec<Card>> {
    load_json(path)
}

/// Settings fixed when a graph is constructed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    /// Explicit `#rrggbb` colors; a pastel palette is generated when absent.
    #[serde(default)]
    pub color_palette: Option<Vec<String>>,
}

impl GraphConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color_palette: None,
        }
    }

    pub fn with_palette(mut self, palette: Vec<String>) -> Self {
        self.color_palette = Some(palette);
        self
    }
}
