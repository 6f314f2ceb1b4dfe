//! Zone forest reconstruction and flattening into engine zones.

use super::body::BodyMap;
use super::oet::{Oet, Sign, SignedBody};
use crate::context::SerializationContext;
use crate::error::{ConverterError, EntityRef, Result};
use crate::material::MaterialMap;
use crate::{BLACKHOLE_MATERIAL, GEO_FILE};
use sim_setup::{OperationKind, Zone, ZoneId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// A zone with every reference resolved to engine ids.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneTree {
    /// `None` for the synthetic boundary zone.
    pub original: Option<ZoneId>,
    pub base: u32,
    pub steps: Vec<(OperationKind, u32)>,
    pub material: i64,
    pub children: Vec<ZoneTree>,
}

impl ZoneTree {
    fn raw_region(&self) -> Oet {
        Oet::from_construction(self.base, &self.steps)
    }

    /// Raw region minus the union of the children's raw regions.
    pub fn final_region(&self) -> Oet {
        match Oet::union_all(self.children.iter().map(ZoneTree::raw_region)) {
            Some(children) => Oet::subtract(self.raw_region(), children),
            None => self.raw_region(),
        }
    }
}

/// Whether a construction token joins its term (`"  "`) or starts a new one (`"OR"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneOp {
    Intersection,
    Union,
}

impl ZoneOp {
    pub fn symbol(self) -> &'static str {
        match self {
            ZoneOp::Intersection => "  ",
            ZoneOp::Union => "OR",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Construction {
    pub op: ZoneOp,
    pub sign: Sign,
    pub body: u32,
}

/// One zone line of `geo.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatZone {
    pub id: u32,
    pub constructions: Vec<Construction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneMaterial {
    pub zone: u32,
    pub material: i64,
}

/// Rebuild the parent/child forest. Roots and siblings are ordered by id.
pub fn build_forest(
    zones: &BTreeMap<ZoneId, Zone>,
    bodies: &BodyMap,
    materials: &MaterialMap,
) -> Result<Vec<ZoneTree>> {
    if let Some(zone) = zones.values().find(|z| z.id.is_root()) {
        return Err(ConverterError::ReservedZoneId {
            owner: EntityRef::zone(zone.id),
        });
    }

    let mut children: BTreeMap<ZoneId, Vec<&Zone>> = BTreeMap::new();
    for zone in zones.values() {
        children.entry(zone.parent_id).or_default().push(zone);
    }

    let builder = ForestBuilder {
        children: &children,
        bodies,
        materials,
    };
    let mut visited = BTreeSet::new();
    let forest = children
        .get(&sim_setup::ROOT_ZONE)
        .map(|roots| {
            roots
                .iter()
                .map(|zone| builder.tree(zone, &mut visited))
                .collect::<Result<Vec<_>>>()
        })
        .transpose()?
        .unwrap_or_default();

    if let Some(zone) = zones.values().find(|z| !visited.contains(&z.id)) {
        return Err(ConverterError::UnreachableZone {
            owner: EntityRef::zone(zone.id),
            parent: zone.parent_id.value(),
        });
    }
    Ok(forest)
}

struct ForestBuilder<'a> {
    children: &'a BTreeMap<ZoneId, Vec<&'a Zone>>,
    bodies: &'a BodyMap,
    materials: &'a MaterialMap,
}

impl ForestBuilder<'_> {
    fn body(&self, zone: &Zone, body: sim_setup::BodyId) -> Result<u32> {
        self.bodies
            .get(&body)
            .copied()
            .ok_or(ConverterError::MissingReference {
                owner: EntityRef::zone(zone.id),
                file: GEO_FILE,
                reference: EntityRef::body(body),
            })
    }

    fn tree(&self, zone: &Zone, visited: &mut BTreeSet<ZoneId>) -> Result<ZoneTree> {
        if !visited.insert(zone.id) {
            return Err(ConverterError::UnreachableZone {
                owner: EntityRef::zone(zone.id),
                parent: zone.parent_id.value(),
            });
        }
        let base = self.body(zone, zone.base_id)?;
        let steps = zone
            .construction
            .iter()
            .map(|op| Ok((op.operation, self.body(zone, op.body_id)?)))
            .collect::<Result<Vec<_>>>()?;
        let material = self
            .materials
            .get(&zone.material_id)
            .copied()
            .ok_or(ConverterError::MissingReference {
                owner: EntityRef::zone(zone.id),
                file: GEO_FILE,
                reference: EntityRef::material(zone.material_id),
            })?;
        let children = self
            .children
            .get(&zone.id)
            .map(|kids| {
                kids.iter()
                    .map(|kid| self.tree(kid, visited))
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?
            .unwrap_or_default();

        Ok(ZoneTree {
            original: Some(zone.id),
            base,
            steps,
            material,
            children,
        })
    }
}

/// Wrap the forest in the boundary zone that claims everything unclaimed.
pub fn wrap_in_blackhole(forest: Vec<ZoneTree>, blackhole: u32) -> ZoneTree {
    ZoneTree {
        original: None,
        base: blackhole,
        steps: Vec::new(),
        material: BLACKHOLE_MATERIAL,
        children: forest,
    }
}

/// Number zones in post-order (children first) and flatten their regions.
pub fn flatten(root: &ZoneTree, ctx: &mut SerializationContext) -> (Vec<FlatZone>, Vec<ZoneMaterial>) {
    let mut zones = Vec::new();
    let mut pairs = Vec::new();
    visit(root, ctx, &mut zones, &mut pairs);
    debug!(zones = zones.len(), "zones flattened");
    (zones, pairs)
}

fn visit(
    node: &ZoneTree,
    ctx: &mut SerializationContext,
    zones: &mut Vec<FlatZone>,
    pairs: &mut Vec<ZoneMaterial>,
) {
    for child in &node.children {
        visit(child, ctx, zones, pairs);
    }
    let id = zones.len() as u32 + 1;
    if let Some(original) = node.original {
        ctx.register_zone(id, original);
    }
    zones.push(FlatZone {
        id,
        constructions: constructions(&node.final_region()),
    });
    pairs.push(ZoneMaterial {
        zone: id,
        material: node.material,
    });
}

/// Tokens of a normalised tree: each union term after the first opens with `OR`.
pub fn constructions(tree: &Oet) -> Vec<Construction> {
    let mut out = Vec::new();
    for (term_no, term) in tree.terms().into_iter().enumerate() {
        for (leaf_no, SignedBody { body, sign }) in term.into_iter().enumerate() {
            let op = if term_no > 0 && leaf_no == 0 {
                ZoneOp::Union
            } else {
                ZoneOp::Intersection
            };
            out.push(Construction { op, sign, body });
        }
    }
    out
}

/// Three-letter zone name: base-26 digits of `id - 1`, least significant first.
pub fn zone_name(id: u32) -> String {
    let mut n = id.saturating_sub(1);
    let mut name = String::with_capacity(3);
    for _ in 0..3 {
        name.push(char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }
    name
}
