//! Geometry compilation: bodies, zones and `geo.dat`.

pub mod body;
pub mod oet;
pub mod zone;

pub use body::{compile_bodies, BodyCard, BodyMap, CompiledBodies};
pub use oet::{Oet, Sign, SignedBody};
pub use zone::{zone_name, Construction, FlatZone, ZoneMaterial, ZoneOp, ZoneTree};

use crate::context::SerializationContext;
use crate::error::Result;
use crate::format::{wrap_args, CardArg};
use crate::material::MaterialMap;
use sim_setup::{Body, BodyId, Zone, ZoneId};
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::debug;

const BODY_ARGS_PER_LINE: usize = 6;
const BODY_ARG_WIDTH: usize = 10;
const ZONE_TOKENS_PER_LINE: usize = 9;
const IDS_PER_LINE: usize = 14;

/// Everything `geo.dat` is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledGeometry {
    pub bodies: Vec<BodyCard>,
    pub zones: Vec<FlatZone>,
    pub zone_materials: Vec<ZoneMaterial>,
}

pub fn compile_geometry(
    bodies: &BTreeMap<BodyId, Body>,
    zones: &BTreeMap<ZoneId, Zone>,
    materials: &MaterialMap,
    blackhole_half_extent: f64,
    ctx: &mut SerializationContext,
) -> Result<CompiledGeometry> {
    let compiled = compile_bodies(bodies, blackhole_half_extent, ctx)?;
    debug!(bodies = compiled.cards.len(), blackhole = compiled.blackhole, "bodies compiled");

    let forest = zone::build_forest(zones, &compiled.map, materials)?;
    let root = zone::wrap_in_blackhole(forest, compiled.blackhole);
    let (flat, zone_materials) = zone::flatten(&root, ctx);

    Ok(CompiledGeometry {
        bodies: compiled.cards,
        zones: flat,
        zone_materials,
    })
}

/// Render `geo.dat`.
pub fn render_geo(geometry: &CompiledGeometry, title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:>5}{:>5}{:10}{}", 0, 0, "", title);

    let indent = " ".repeat(10);
    for body in &geometry.bodies {
        let head = format!("  {:>3}{:>5}", body.tag, body.engine_id);
        let args: Vec<CardArg> = body.args.iter().copied().map(CardArg::Float).collect();
        out.push_str(&wrap_args(&head, &indent, &args, BODY_ARG_WIDTH, BODY_ARGS_PER_LINE));
    }
    out.push_str("  END\n");

    for zone in &geometry.zones {
        let tokens: Vec<String> = zone
            .constructions
            .iter()
            .map(|c| {
                let signed = format!("{}{}", c.sign.symbol(), c.body);
                format!("{}{:>5}", c.op.symbol(), signed)
            })
            .collect();
        for (line_no, chunk) in tokens.chunks(ZONE_TOKENS_PER_LINE).enumerate() {
            let name = if line_no == 0 { zone_name(zone.id) } else { "   ".to_string() };
            let _ = write!(out, "  {}{:>5}", name, zone.id);
            out.push_str(&chunk.concat());
            out.push('\n');
        }
    }
    out.push_str("  END\n");

    let zone_ids: Vec<i64> = geometry.zone_materials.iter().map(|p| i64::from(p.zone)).collect();
    let material_ids: Vec<i64> = geometry.zone_materials.iter().map(|p| p.material).collect();
    write_id_block(&mut out, &zone_ids);
    write_id_block(&mut out, &material_ids);
    out
}

fn write_id_block(out: &mut String, ids: &[i64]) {
    for chunk in ids.chunks(IDS_PER_LINE) {
        for id in chunk {
            let _ = write!(out, "{:>5}", id);
        }
        out.push('\n');
    }
}
