//! Scoring detectors: where to score, which particles, and which quantity.

use crate::geometry::{CylindricalSlices, Point, Range, Vec3, Vec3Int};
use crate::ids::{DetectorId, MaterialId, ZoneId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detector {
    pub id: DetectorId,
    pub name: String,
    pub detector_geometry: DetectorGeometry,
    pub particle: Particle,
    pub scoring: Scoring,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DetectorGeometry {
    Geomap {
        center: Point,
        size: Vec3,
        slices: Vec3Int,
    },
    Zone {
        zones: Vec<ZoneId>,
    },
    #[serde(rename_all = "camelCase")]
    Cylinder {
        radius: Range,
        angle: Range,
        z_value: Range,
        slices: CylindricalSlices,
    },
    Mesh {
        center: Point,
        size: Vec3,
        slices: Vec3Int,
    },
    Plane {
        point: Point,
        normal: Vec3,
    },
}

impl DetectorGeometry {
    pub fn kind(&self) -> &'static str {
        match self {
            DetectorGeometry::Geomap { .. } => "geomap",
            DetectorGeometry::Zone { .. } => "zone",
            DetectorGeometry::Cylinder { .. } => "cylinder",
            DetectorGeometry::Mesh { .. } => "mesh",
            DetectorGeometry::Plane { .. } => "plane",
        }
    }
}

/// Heavy ion projectile or scored particle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeavyIon {
    pub charge: i64,
    pub nucleons_count: i64,
}

/// Particle selection.
///
/// Encoded on the wire as `{"type": "<name>"}`, with `charge` and
/// `nucleonsCount` present for `heavy_ion`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "ParticleRepr", into = "ParticleRepr")]
pub enum Particle {
    All,
    /// A named particle, resolved through the engine's particle table.
    Predefined(String),
    HeavyIon(HeavyIon),
}

impl Particle {
    pub fn named(name: impl Into<String>) -> Self {
        Particle::Predefined(name.into())
    }
}

impl Default for Particle {
    fn default() -> Self {
        Particle::named("proton")
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ParticleRepr {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charge: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nucleons_count: Option<i64>,
}

impl TryFrom<ParticleRepr> for Particle {
    type Error = String;

    fn try_from(repr: ParticleRepr) -> Result<Self, Self::Error> {
        match repr.kind.as_str() {
            "all" => Ok(Particle::All),
            "heavy_ion" => match (repr.charge, repr.nucleons_count) {
                (Some(charge), Some(nucleons_count)) => Ok(Particle::HeavyIon(HeavyIon {
                    charge,
                    nucleons_count,
                })),
                _ => Err("heavy_ion particle requires charge and nucleonsCount".to_string()),
            },
            "" => Err("particle type must not be empty".to_string()),
            _ => Ok(Particle::Predefined(repr.kind)),
        }
    }
}

impl From<Particle> for ParticleRepr {
    fn from(particle: Particle) -> Self {
        match particle {
            Particle::All => ParticleRepr {
                kind: "all".to_string(),
                charge: None,
                nucleons_count: None,
            },
            Particle::Predefined(kind) => ParticleRepr {
                kind,
                charge: None,
                nucleons_count: None,
            },
            Particle::HeavyIon(ion) => ParticleRepr {
                kind: "heavy_ion".to_string(),
                charge: Some(ion.charge),
                nucleons_count: Some(ion.nucleons_count),
            },
        }
    }
}

/// Scored quantity.
///
/// LET-type quantities name the material whose stopping power is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "ScoringRepr", into = "ScoringRepr")]
pub enum Scoring {
    Predefined(String),
    Let { kind: String, material: MaterialId },
}

impl Scoring {
    pub fn named(name: impl Into<String>) -> Self {
        Scoring::Predefined(name.into())
    }

    pub fn kind(&self) -> &str {
        match self {
            Scoring::Predefined(kind) | Scoring::Let { kind, .. } => kind,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct ScoringRepr {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    material: Option<MaterialId>,
}

impl From<ScoringRepr> for Scoring {
    fn from(repr: ScoringRepr) -> Self {
        match repr.material {
            Some(material) => Scoring::Let {
                kind: repr.kind,
                material,
            },
            None => Scoring::Predefined(repr.kind),
        }
    }
}

impl From<Scoring> for ScoringRepr {
    fn from(scoring: Scoring) -> Self {
        match scoring {
            Scoring::Predefined(kind) => ScoringRepr { kind, material: None },
            Scoring::Let { kind, material } => ScoringRepr {
                kind,
                material: Some(material),
            },
        }
    }
}
