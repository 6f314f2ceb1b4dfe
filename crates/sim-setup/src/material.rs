//! Material catalog entries.

use crate::ids::MaterialId;
use serde::{Deserialize, Serialize};

/// A material of the setup's catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub specs: MaterialSpecs,
}

impl Material {
    pub fn predefined(id: impl Into<MaterialId>, predefined_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            specs: MaterialSpecs::Predefined(PredefinedMaterial::new(predefined_id)),
        }
    }

    pub fn compound(id: impl Into<MaterialId>, compound: CompoundMaterial) -> Self {
        Self {
            id: id.into(),
            specs: MaterialSpecs::Compound(compound),
        }
    }
}

/// How a material is defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialSpecs {
    /// Picked by name from the engine's material catalog.
    Predefined(PredefinedMaterial),
    /// Built from elements.
    Compound(CompoundMaterial),
    /// Voxelised CT phantom.
    Voxel(VoxelMaterial),
}

impl MaterialSpecs {
    pub fn kind(&self) -> &'static str {
        match self {
            MaterialSpecs::Predefined(_) => "predefined",
            MaterialSpecs::Compound(_) => "compound",
            MaterialSpecs::Voxel(_) => "voxel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateOfMatter {
    #[default]
    NonDefined,
    Solid,
    Liquid,
    Gas,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredefinedMaterial {
    pub predefined_id: String,
    /// Density in g/cm³.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default)]
    pub state_of_matter: StateOfMatter,
    #[serde(default)]
    pub load_external_stopping_power: bool,
}

impl PredefinedMaterial {
    pub fn new(predefined_id: impl Into<String>) -> Self {
        Self {
            predefined_id: predefined_id.into(),
            density: None,
            state_of_matter: StateOfMatter::NonDefined,
            load_external_stopping_power: false,
        }
    }

    pub fn is_vacuum(&self) -> bool {
        self.predefined_id == "vacuum"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundMaterial {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<f64>,
    #[serde(default)]
    pub state_of_matter: StateOfMatter,
    pub elements: Vec<Element>,
    /// Predefined material whose stopping power table this compound borrows.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_stopping_power_from_predefined: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Isotope name such as `h-*` (natural mix) or `u-235`.
    pub isotope: String,
    pub relative_stoichiometric_fraction: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atomic_mass: Option<f64>,
    /// Mean ionization potential (eV).
    #[serde(default, rename = "iValue", skip_serializing_if = "Option::is_none")]
    pub i_value: Option<f64>,
}

impl Element {
    pub fn new(isotope: impl Into<String>, fraction: i64) -> Self {
        Self {
            isotope: isotope.into(),
            relative_stoichiometric_fraction: fraction,
            atomic_mass: None,
            i_value: None,
        }
    }
}

/// Recognised but never compilable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VoxelMaterial {}
