//! Reverse identifier maps kept between compilation and result parsing.

use serde::{Deserialize, Serialize};
use sim_setup::{BodyId, DetectorId, MaterialId, ZoneId};
use std::collections::BTreeMap;

/// Engine id → original id maps produced by one compilation.
///
/// Results may be parsed in another process long after compilation, so the
/// context round-trips through JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializationContext {
    pub materials: BTreeMap<u32, MaterialId>,
    pub bodies: BTreeMap<u32, BodyId>,
    /// Flat zone id → original zone. The synthetic boundary zone is absent.
    pub zones: BTreeMap<u32, ZoneId>,
    pub detector_files: BTreeMap<String, DetectorId>,
}

impl SerializationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a material assignment. The first original id registered for an
    /// engine id is kept.
    pub fn register_material(&mut self, engine: u32, original: MaterialId) {
        self.materials.entry(engine).or_insert(original);
    }

    pub fn register_body(&mut self, engine: u32, original: BodyId) {
        self.bodies.insert(engine, original);
    }

    pub fn register_zone(&mut self, flat: u32, original: ZoneId) {
        self.zones.insert(flat, original);
    }

    pub fn register_detector_file(&mut self, filename: impl Into<String>, detector: DetectorId) {
        self.detector_files.insert(filename.into(), detector);
    }

    pub fn material(&self, engine: u32) -> Option<MaterialId> {
        self.materials.get(&engine).copied()
    }

    pub fn body(&self, engine: u32) -> Option<BodyId> {
        self.bodies.get(&engine).copied()
    }

    pub fn zone(&self, flat: u32) -> Option<ZoneId> {
        self.zones.get(&flat).copied()
    }

    pub fn detector_for_file(&self, filename: &str) -> Option<DetectorId> {
        self.detector_files.get(filename).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
