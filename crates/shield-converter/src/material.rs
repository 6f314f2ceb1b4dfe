//! Material compilation and `mat.dat` rendering.

use crate::context::SerializationContext;
use crate::error::{ConverterError, EntityRef, MappingTable, Result};
use crate::mapping::{self, VACUUM_ICRU};
use crate::{MAT_FILE, MAX_COMPOUND_ELEMENTS, MAX_MATERIALS};
use sim_setup::{CompoundMaterial, Material, MaterialId, MaterialSpecs, PredefinedMaterial};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::debug;

/// Original material id → engine material id.
pub type MaterialMap = BTreeMap<MaterialId, i64>;

#[derive(Debug, Clone, PartialEq)]
pub struct PredefinedEntry {
    pub engine_id: i64,
    pub icru: i64,
    pub state: Option<i64>,
    pub density: Option<f64>,
    pub load_external_stopping_power: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundElement {
    pub nuclid: i64,
    pub fraction: i64,
    pub atomic_mass: Option<f64>,
    pub i_value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundEntry {
    pub engine_id: i64,
    pub state: i64,
    pub density: f64,
    pub elements: Vec<CompoundElement>,
    /// ICRU number of the material whose stopping power is borrowed.
    pub external_stopping_power: Option<i64>,
}

/// Compiled material catalog, each list in engine id order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledMaterials {
    pub predefined: Vec<PredefinedEntry>,
    pub compound: Vec<CompoundEntry>,
}

impl CompiledMaterials {
    pub fn is_empty(&self) -> bool {
        self.predefined.is_empty() && self.compound.is_empty()
    }
}

/// Number materials and resolve them against the engine tables.
///
/// Predefined materials come first, then compounds, each group ordered by
/// original id. Vacuum takes no slot and maps to [`VACUUM_ICRU`].
pub fn compile_materials(
    materials: &BTreeMap<MaterialId, Material>,
    ctx: &mut SerializationContext,
) -> Result<(CompiledMaterials, MaterialMap)> {
    if materials.len() > MAX_MATERIALS {
        return Err(ConverterError::LimitExceeded {
            owner: None,
            file: MAT_FILE,
            what: "distinct materials",
            limit: MAX_MATERIALS,
            actual: materials.len(),
        });
    }

    let mut map = MaterialMap::new();
    let mut predefined: Vec<(MaterialId, &PredefinedMaterial)> = Vec::new();
    let mut compound: Vec<(MaterialId, &CompoundMaterial)> = Vec::new();

    // BTreeMap iteration is ascending by id
    for (&id, material) in materials {
        match &material.specs {
            MaterialSpecs::Predefined(p) if p.is_vacuum() => {
                map.insert(id, VACUUM_ICRU);
                ctx.register_material(VACUUM_ICRU as u32, id);
            }
            MaterialSpecs::Predefined(p) => predefined.push((id, p)),
            MaterialSpecs::Compound(c) => compound.push((id, c)),
            MaterialSpecs::Voxel(_) => {
                return Err(ConverterError::NotImplemented {
                    owner: EntityRef::material(id),
                    file: MAT_FILE,
                    feature: "Voxel material serialization",
                });
            }
        }
    }

    let ordered = predefined
        .iter()
        .map(|(id, _)| *id)
        .chain(compound.iter().map(|(id, _)| *id));
    for (engine, id) in (1u32..).zip(ordered) {
        map.insert(id, i64::from(engine));
        ctx.register_material(engine, id);
    }

    let mut compiled = CompiledMaterials::default();
    for (id, p) in predefined {
        compiled
            .predefined
            .push(compile_predefined(id, p, engine_id(&map, id))?);
    }
    for (id, c) in compound {
        compiled
            .compound
            .push(compile_compound(id, c, engine_id(&map, id))?);
    }

    debug!(
        predefined = compiled.predefined.len(),
        compound = compiled.compound.len(),
        mapped = map.len(),
        "materials compiled"
    );
    Ok((compiled, map))
}

fn engine_id(map: &MaterialMap, id: MaterialId) -> i64 {
    map.get(&id).copied().unwrap_or_default()
}

fn compile_predefined(id: MaterialId, p: &PredefinedMaterial, engine_id: i64) -> Result<PredefinedEntry> {
    let icru = mapping::predefined_material_icru(&p.predefined_id).ok_or_else(|| {
        ConverterError::UnmappedName {
            owner: EntityRef::material(id),
            file: MAT_FILE,
            table: MappingTable::Material,
            name: p.predefined_id.clone(),
        }
    })?;
    Ok(PredefinedEntry {
        engine_id,
        icru,
        state: mapping::state_code(p.state_of_matter),
        density: p.density.filter(|d| *d > 0.0),
        load_external_stopping_power: p.load_external_stopping_power,
    })
}

fn compile_compound(id: MaterialId, c: &CompoundMaterial, engine_id: i64) -> Result<CompoundEntry> {
    let owner = EntityRef::material(id);
    let state = mapping::state_code(c.state_of_matter).ok_or(ConverterError::MissingProperty {
        owner,
        file: MAT_FILE,
        message: "StateOfMatter must be defined for Compound material",
    })?;
    let density = c
        .density
        .filter(|d| *d > 0.0)
        .ok_or(ConverterError::MissingProperty {
            owner,
            file: MAT_FILE,
            message: "Density must be specified for Compound material",
        })?;
    if c.elements.is_empty() {
        return Err(ConverterError::MissingProperty {
            owner,
            file: MAT_FILE,
            message: "Elements must be specified for Compound material",
        });
    }
    if c.elements.len() > MAX_COMPOUND_ELEMENTS {
        return Err(ConverterError::LimitExceeded {
            owner: Some(owner),
            file: MAT_FILE,
            what: "elements for Compound",
            limit: MAX_COMPOUND_ELEMENTS,
            actual: c.elements.len(),
        });
    }

    let elements = c
        .elements
        .iter()
        .map(|element| {
            let nuclid = mapping::isotope_nuclid(&element.isotope).ok_or_else(|| {
                ConverterError::UnmappedName {
                    owner,
                    file: MAT_FILE,
                    table: MappingTable::Isotope,
                    name: element.isotope.clone(),
                }
            })?;
            Ok(CompoundElement {
                nuclid,
                fraction: element.relative_stoichiometric_fraction,
                atomic_mass: element.atomic_mass.filter(|m| *m > 0.0),
                i_value: element.i_value.filter(|v| *v > 0.0),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let external_stopping_power = match c.external_stopping_power_from_predefined.as_deref() {
        None | Some("") => None,
        Some(name) => Some(mapping::predefined_material_icru(name).ok_or_else(|| {
            ConverterError::UnmappedName {
                owner,
                file: MAT_FILE,
                table: MappingTable::Material,
                name: name.to_string(),
            }
        })?),
    };

    Ok(CompoundEntry {
        engine_id,
        state,
        density,
        elements,
        external_stopping_power,
    })
}

/// Render `mat.dat`.
pub fn render_mat(materials: &CompiledMaterials) -> String {
    let mut out = String::new();
    for p in &materials.predefined {
        let _ = writeln!(out, "MEDIUM {}", p.engine_id);
        if let Some(state) = p.state {
            let _ = writeln!(out, "STATE {}", state);
        }
        if let Some(density) = p.density {
            let _ = writeln!(out, "RHO {:.6}", density);
        }
        let _ = writeln!(out, "ICRU {}", p.icru);
        if p.load_external_stopping_power {
            out.push_str("LOADDEDX\n");
        }
        out.push_str("END\n");
    }
    for c in &materials.compound {
        let _ = writeln!(out, "MEDIUM {}", c.engine_id);
        let _ = writeln!(out, "STATE {}", c.state);
        let _ = writeln!(out, "RHO {:.6}", c.density);
        for element in &c.elements {
            let _ = writeln!(out, "NUCLID {} {}", element.nuclid, element.fraction);
            if let Some(mass) = element.atomic_mass {
                let _ = writeln!(out, "AMASS {:.6}", mass);
            }
            if let Some(i_value) = element.i_value {
                let _ = writeln!(out, "IVALUE {:.6}", i_value);
            }
        }
        if let Some(icru) = c.external_stopping_power {
            let _ = writeln!(out, "LOADDEDX {}", icru);
        }
        out.push_str("END\n");
    }
    out
}
