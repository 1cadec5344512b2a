use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One scenario's assessment results, as supplied by the upstream engine.
///
/// Only the parts consumed by the charts are typed; unknown top-level keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessData {
    /// Years covered by the prospective scenario (x values of the scenario graph).
    #[serde(default)]
    pub years: Vec<i32>,
    /// Scalar outputs keyed by variable name.
    #[serde(default)]
    pub float_outputs: BTreeMap<String, f64>,
    /// Yearly outputs keyed by variable name, aligned with `years`.
    #[serde(default)]
    pub vector_outputs: BTreeMap<String, Vec<f64>>,
}

impl ProcessData {
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json_str(&s)
    }

    /// Look up a scalar output, failing with the missing key.
    pub fn float_output(&self, key: &str) -> Result<f64> {
        self.float_outputs
            .get(key)
            .copied()
            .ok_or_else(|| ChartError::MissingField {
                kind: "float",
                key: key.to_string(),
            })
    }

    /// Look up a yearly output, failing with the missing key.
    pub fn vector_output(&self, key: &str) -> Result<&[f64]> {
        self.vector_outputs
            .get(key)
            .map(Vec::as_slice)
            .ok_or_else(|| ChartError::MissingField {
                kind: "vector",
                key: key.to_string(),
            })
    }
}
