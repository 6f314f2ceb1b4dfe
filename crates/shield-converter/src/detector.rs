//! Detector compilation and `detect.dat` rendering.

use crate::context::SerializationContext;
use crate::error::{ConverterError, EntityRef, MappingTable, Result};
use crate::format::{wrap_args, CardArg};
use crate::mapping;
use crate::material::MaterialMap;
use crate::DETECT_FILE;
use sim_setup::geometry::center_and_size_to_min_max;
use sim_setup::{Detector, DetectorGeometry, DetectorId, Particle, Scoring};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

const ARGS_PER_LINE: usize = 6;
const ARG_WIDTH: usize = 10;

/// One scoring card of `detect.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectorCard {
    pub detector: DetectorId,
    /// `CYL`, `MSH` or `PLANE`.
    pub tag: &'static str,
    pub filename: String,
    pub args: Vec<CardArg>,
}

/// Compile detectors in ascending id order, registering each output file.
pub fn compile_detectors(
    detectors: &BTreeMap<DetectorId, Detector>,
    materials: &MaterialMap,
    ctx: &mut SerializationContext,
) -> Result<Vec<DetectorCard>> {
    reject_duplicate_names(detectors)?;

    let mut cards = Vec::with_capacity(detectors.len());
    for (index, detector) in detectors.values().enumerate() {
        let filename = detector_filename(&detector.name, index);
        let card = compile_detector(detector, filename, materials)?;
        ctx.register_detector_file(card.filename.clone(), detector.id);
        cards.push(card);
    }
    debug!(detectors = cards.len(), "detectors compiled");
    Ok(cards)
}

fn reject_duplicate_names(detectors: &BTreeMap<DetectorId, Detector>) -> Result<()> {
    let mut seen: HashMap<&str, DetectorId> = HashMap::with_capacity(detectors.len());
    for detector in detectors.values() {
        if let Some(first) = seen.insert(&detector.name, detector.id) {
            return Err(ConverterError::DuplicateDetectorName {
                name: detector.name.clone(),
                first: first.value(),
                second: detector.id.value(),
            });
        }
    }
    Ok(())
}

/// Output file stem: ASCII digits kept, ASCII letters lower-cased, anything
/// else `_`, then the processing index.
pub fn detector_filename(name: &str, index: usize) -> String {
    let mut out: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                c
            } else if c.is_ascii_alphabetic() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    out.push_str(&index.to_string());
    out
}

fn compile_detector(detector: &Detector, filename: String, materials: &MaterialMap) -> Result<DetectorCard> {
    let owner = EntityRef::detector(detector.id);
    let (tag, mut args): (&'static str, Vec<CardArg>) = match &detector.detector_geometry {
        DetectorGeometry::Geomap { .. } => {
            return Err(ConverterError::NotImplemented {
                owner,
                file: DETECT_FILE,
                feature: "Geomap detector serialization",
            })
        }
        DetectorGeometry::Zone { .. } => {
            return Err(ConverterError::NotImplemented {
                owner,
                file: DETECT_FILE,
                feature: "Zone detector serialization",
            })
        }
        DetectorGeometry::Cylinder {
            radius,
            angle,
            z_value,
            slices,
        } => (
            "CYL",
            vec![
                radius.min.into(),
                angle.min.into(),
                z_value.min.into(),
                radius.max.into(),
                angle.max.into(),
                z_value.max.into(),
                slices.radius.into(),
                slices.angle.into(),
                slices.z.into(),
            ],
        ),
        DetectorGeometry::Mesh { center, size, slices } => {
            let (x_min, x_max) = center_and_size_to_min_max(center.x, size.x);
            let (y_min, y_max) = center_and_size_to_min_max(center.y, size.y);
            let (z_min, z_max) = center_and_size_to_min_max(center.z, size.z);
            (
                "MSH",
                vec![
                    x_min.into(),
                    y_min.into(),
                    z_min.into(),
                    x_max.into(),
                    y_max.into(),
                    z_max.into(),
                    slices.x.into(),
                    slices.y.into(),
                    slices.z.into(),
                ],
            )
        }
        DetectorGeometry::Plane { point, normal } => (
            "PLANE",
            vec![
                point.x.into(),
                point.y.into(),
                point.z.into(),
                normal.x.into(),
                normal.y.into(),
                normal.z.into(),
                CardArg::Empty,
                CardArg::Empty,
                CardArg::Empty,
            ],
        ),
    };

    let particle = mapping::particle_code(&detector.particle).ok_or_else(|| ConverterError::UnmappedName {
        owner,
        file: DETECT_FILE,
        table: MappingTable::Particle,
        name: mapping::particle_name(&detector.particle),
    })?;
    let quantity = mapping::scoring_card(detector.scoring.kind()).ok_or_else(|| ConverterError::UnmappedName {
        owner,
        file: DETECT_FILE,
        table: MappingTable::Scoring,
        name: detector.scoring.kind().to_string(),
    })?;
    args.push(particle.into());
    args.push(quantity.into());
    args.push(filename.as_str().into());

    if let Particle::HeavyIon(ion) = &detector.particle {
        args.push(ion.nucleons_count.into());
        args.push(ion.charge.into());
        match &detector.scoring {
            Scoring::Let { kind, material } if mapping::is_let_scoring(kind) => {
                let engine = materials.get(material).copied().ok_or(ConverterError::MissingReference {
                    owner,
                    file: DETECT_FILE,
                    reference: EntityRef::material(*material),
                })?;
                args.push(engine.into());
            }
            _ => args.push(CardArg::Empty),
        }
        args.extend([CardArg::Empty, CardArg::Empty, CardArg::Empty]);
    }

    Ok(DetectorCard {
        detector: detector.id,
        tag,
        filename,
        args,
    })
}

/// Render `detect.dat`.
pub fn render_detect(cards: &[DetectorCard]) -> String {
    let indent = " ".repeat(ARG_WIDTH);
    cards
        .iter()
        .map(|card| {
            let head = format!("{:<width$}", card.tag, width = ARG_WIDTH);
            wrap_args(&head, &indent, &card.args, ARG_WIDTH, ARGS_PER_LINE)
        })
        .collect()
}
