//! Small geometric value types shared by bodies, detectors and the beam.

use serde::{Deserialize, Serialize};

/// A point in 3-D space (cm).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Point {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::default()
    }
}

/// A 3-D vector (sizes, normals).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Integer triple, used for bin counts along x/y/z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vec3Int {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Vec3Int {
    pub fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }
}

/// Bin counts of a cylindrical scoring grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CylindricalSlices {
    pub radius: i64,
    pub angle: i64,
    pub z: i64,
}

/// Closed interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Convert a center coordinate and an extent into `(min, max)` bounds.
pub fn center_and_size_to_min_max(center: f64, size: f64) -> (f64, f64) {
    let half = size / 2.0;
    (center - half, center + half)
}
