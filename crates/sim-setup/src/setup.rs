//! The root input document.

use crate::beam::{Beam, SimulationOptions};
use crate::body::Body;
use crate::detector::Detector;
use crate::error::{Result, SetupError};
use crate::ids::{BodyId, DetectorId, MaterialId, ZoneId};
use crate::material::Material;
use crate::zone::Zone;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A complete, engine-independent simulation setup.
///
/// Collections are keyed by the caller's ids. Iteration order of the maps
/// carries no meaning; every backend orders entities explicitly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Setup {
    pub materials: BTreeMap<MaterialId, Material>,
    pub bodies: BTreeMap<BodyId, Body>,
    pub zones: BTreeMap<ZoneId, Zone>,
    pub detectors: BTreeMap<DetectorId, Detector>,
    pub beam: Beam,
    pub options: SimulationOptions,
}

impl Setup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load a setup file, picking the format from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SetupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Err(SetupError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.insert(material.id, material);
        self
    }

    pub fn with_body(mut self, body: Body) -> Self {
        self.bodies.insert(body.id, body);
        self
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.insert(zone.id, zone);
        self
    }

    pub fn with_detector(mut self, detector: Detector) -> Self {
        self.detectors.insert(detector.id, detector);
        self
    }

    pub fn with_beam(mut self, beam: Beam) -> Self {
        self.beam = beam;
        self
    }

    pub fn with_options(mut self, options: SimulationOptions) -> Self {
        self.options = options;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::BodyGeometry;
    use crate::geometry::Point;

    #[test]
    fn integer_keys_survive_json() {
        let setup = Setup::new()
            .with_material(Material::predefined(4, "water_liquid"))
            .with_body(Body::new(
                2,
                BodyGeometry::Sphere {
                    center: Point::origin(),
                    radius: 1.0,
                },
            ))
            .with_zone(Zone::new(1, 2, 4));
        let json = setup.to_json_pretty().unwrap();
        assert!(json.contains("\"4\""));
        let back = Setup::from_json_str(&json).unwrap();
        assert_eq!(back, setup);
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let setup = Setup::from_json_str("{}").unwrap();
        assert!(setup.materials.is_empty());
        assert!(setup.detectors.is_empty());
        assert_eq!(setup.options, SimulationOptions::default());
    }

    #[test]
    fn yaml_setup_loads() {
        let yaml = r#"
materials:
  1:
    id: 1
    specs: {type: predefined, predefinedId: vacuum}
bodies:
  1:
    id: 1
    geometry: {type: cuboid, center: {x: 0, y: 0, z: 0}, size: {x: 1, y: 1, z: 1}}
"#;
        let setup = Setup::from_yaml_str(yaml).unwrap();
        assert_eq!(setup.materials.len(), 1);
        assert_eq!(setup.bodies[&BodyId(1)].geometry.kind(), "cuboid");
    }
}
