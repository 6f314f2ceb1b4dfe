//! Zones: material-filled regions built from bodies by CSG operations.

use crate::ids::{BodyId, MaterialId, ZoneId, ROOT_ZONE};
use serde::{Deserialize, Serialize};

/// A region of the setup.
///
/// The region is `base` combined left to right with every entry of
/// `construction`. Zones with `parent_id == 0` are roots; a nested zone is
/// carved out of its parent's final region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    #[serde(default)]
    pub parent_id: ZoneId,
    #[serde(default)]
    pub name: String,
    pub base_id: BodyId,
    pub material_id: MaterialId,
    #[serde(default)]
    pub construction: Vec<ZoneOperation>,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, base_id: impl Into<BodyId>, material_id: impl Into<MaterialId>) -> Self {
        Self {
            id: id.into(),
            parent_id: ROOT_ZONE,
            name: String::new(),
            base_id: base_id.into(),
            material_id: material_id.into(),
            construction: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<ZoneId>) -> Self {
        self.parent_id = parent.into();
        self
    }

    pub fn with_operation(mut self, operation: OperationKind, body: impl Into<BodyId>) -> Self {
        self.construction.push(ZoneOperation {
            body_id: body.into(),
            operation,
        });
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_root()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOperation {
    pub body_id: BodyId,
    #[serde(rename = "type")]
    pub operation: OperationKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Intersect,
    Subtract,
    Union,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_from_json() {
        let json = r#"{"id": 4, "parentId": 1, "name": "inner", "baseId": 2, "materialId": 3,
            "construction": [{"bodyId": 5, "type": "subtract"}, {"bodyId": 6, "type": "union"}]}"#;
        let zone: Zone = serde_json::from_str(json).unwrap();
        assert_eq!(zone.parent_id, ZoneId(1));
        assert!(!zone.is_root());
        assert_eq!(
            zone.construction,
            vec![
                ZoneOperation { body_id: BodyId(5), operation: OperationKind::Subtract },
                ZoneOperation { body_id: BodyId(6), operation: OperationKind::Union },
            ]
        );
    }

    #[test]
    fn missing_parent_means_root() {
        let zone: Zone =
            serde_json::from_str(r#"{"id": 1, "baseId": 1, "materialId": 1}"#).unwrap();
        assert!(zone.is_root());
        assert!(zone.construction.is_empty());
    }
}
