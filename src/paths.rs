//! Repository-relative locations of the dashboard's JSON definition files.

use std::path::{Path, PathBuf};

/// Dashboard cards (`[{ id, title, key, unit }]`).
pub const CARDS_JSON: &str = "data/cards/cards.json";

/// Filled areas of the prospective-scenario graph.
pub const PROSPECTIVE_SCENARIO_ASPECTS_AREAS_JSON: &str =
    "data/prospective_scenario_graph/prospective_scenario_aspects_areas.json";

/// Lines of the prospective-scenario graph.
pub const PROSPECTIVE_SCENARIO_ASPECTS_LINES_JSON: &str =
    "data/prospective_scenario_graph/prospective_scenario_aspects_lines.json";

/// Bar categories of the multidisciplinary graph.
pub const MULTIDISCIPLINARY_BARS_JSON: &str =
    "data/multidisciplinary_graph/multidisciplinary_bars.json";

/// Root of the repository (the directory holding `Cargo.toml` and `data/`).
pub fn root_directory() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

/// Resolved data-file locations below a given root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    root: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(root_directory())
    }
}

impl DataPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn cards(&self) -> PathBuf {
        self.root.join(CARDS_JSON)
    }

    pub fn prospective_scenario_aspects_areas(&self) -> PathBuf {
        self.root.join(PROSPECTIVE_SCENARIO_ASPECTS_AREAS_JSON)
    }

    pub fn prospective_scenario_aspects_lines(&self) -> PathBuf {
        self.root.join(PROSPECTIVE_SCENARIO_ASPECTS_LINES_JSON)
    }

    pub fn multidisciplinary_bars(&self) -> PathBuf {
        self.root.join(MULTIDISCIPLINARY_BARS_JSON)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_below_root() {
        let paths = DataPaths::new("/srv/dashboard");
        assert_eq!(
            paths.multidisciplinary_bars(),
            PathBuf::from("/srv/dashboard/data/multidisciplinary_graph/multidisciplinary_bars.json")
        );
        assert!(paths.cards().ends_with("cards/cards.json"));
    }

    #[test]
    fn default_root_ships_data_files() {
        let paths = DataPaths::default();
        assert!(paths.multidisciplinary_bars().exists());
        assert!(paths.prospective_scenario_aspects_areas().exists());
        assert!(paths.prospective_scenario_aspects_lines().exists());
        assert!(paths.cards().exists());
    }
}
