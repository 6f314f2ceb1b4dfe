//! Engine-independent simulation results.

use crate::geometry::Point;
use crate::ids::DetectorId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregate result of one simulation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationResult {
    /// Per-file problems, keyed by result file name.
    pub errors: BTreeMap<String, String>,
    #[serde(rename = "result_metadata")]
    pub metadata: BTreeMap<String, String>,
    pub detectors: Vec<DetectorResult>,
}

impl SimulationResult {
    pub fn detector(&self, id: DetectorId) -> Option<&DetectorResult> {
        self.detectors.iter().find(|d| d.detector_id == id)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty() || self.detectors.iter().any(|d| !d.errors.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorResult {
    pub detector_id: DetectorId,
    pub errors: BTreeMap<String, String>,
    pub metadata: BTreeMap<String, String>,
    /// Scored values indexed `[x][y][z]`.
    pub scored: Vec<Vec<Vec<f64>>>,
    pub dimensions: Dimensions,
}

/// Binning of a detector's scoring grid.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dimensions {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub start: Point,
    pub stop: Point,
}

impl Dimensions {
    pub fn cell_count(&self) -> usize {
        self.nx * self.ny * self.nz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_uses_legacy_field_names() {
        let mut result = SimulationResult::default();
        result.detectors.push(DetectorResult {
            detector_id: DetectorId(7),
            ..Default::default()
        });
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("result_metadata").is_some());
        assert_eq!(json["detectors"][0]["detectorId"], serde_json::json!(7));
        assert!(result.detector(DetectorId(7)).is_some());
        assert!(!result.has_errors());
    }

    #[test]
    fn cell_count_multiplies_bins() {
        let dims = Dimensions {
            nx: 2,
            ny: 3,
            nz: 4,
            ..Default::default()
        };
        assert_eq!(dims.cell_count(), 24);
    }
}
