//! Geometric primitives used as CSG building blocks.

use crate::geometry::{Point, Vec3};
use crate::ids::BodyId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: BodyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub geometry: BodyGeometry,
}

impl Body {
    pub fn new(id: impl Into<BodyId>, geometry: BodyGeometry) -> Self {
        Self {
            id: id.into(),
            name: None,
            geometry,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BodyGeometry {
    Sphere {
        center: Point,
        radius: f64,
    },
    /// Axis-aligned box.
    Cuboid {
        center: Point,
        size: Vec3,
    },
    /// Right circular cylinder whose axis points along +Y from `base_center`.
    Cylinder {
        #[serde(rename = "baseCenter")]
        base_center: Point,
        height: f64,
        radius: f64,
    },
}

impl BodyGeometry {
    pub fn kind(&self) -> &'static str {
        match self {
            BodyGeometry::Sphere { .. } => "sphere",
            BodyGeometry::Cuboid { .. } => "cuboid",
            BodyGeometry::Cylinder { .. } => "cylinder",
        }
    }
}
