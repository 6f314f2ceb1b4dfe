use pretty_assertions::assert_eq;
use proptest::prelude::*;
use shield_converter::{
    ConverterConfig, ConverterError, SerializationContext, ShieldBackend, ShieldCompiler, SimulationBackend,
};
use sim_setup::*;
use std::collections::BTreeMap;

const SETUP_JSON: &str = r#"{
  "materials": {
    "1": {"id": 1, "specs": {"type": "predefined", "predefinedId": "water_liquid"}},
    "2": {"id": 2, "specs": {"type": "predefined", "predefinedId": "vacuum"}}
  },
  "bodies": {
    "1": {"id": 1, "geometry": {"type": "cuboid", "center": {"x": 0, "y": 0, "z": 0},
          "size": {"x": 10, "y": 10, "z": 10}}},
    "2": {"id": 2, "geometry": {"type": "sphere", "center": {"x": 0, "y": 0, "z": 0},
          "radius": 2}}
  },
  "zones": {
    "1": {"id": 1, "parentId": 0, "name": "box", "baseId": 1, "materialId": 1,
          "construction": []},
    "2": {"id": 2, "parentId": 1, "name": "cavity", "baseId": 2, "materialId": 2,
          "construction": []}
  },
  "detectors": {
    "1": {"id": 1, "name": "depth dose",
          "detectorGeometry": {"type": "mesh", "center": {"x": 0, "y": 0, "z": 0},
                               "size": {"x": 1, "y": 1, "z": 10},
                               "slices": {"x": 1, "y": 1, "z": 100}},
          "particle": {"type": "all"},
          "scoring": {"type": "dose"}}
  }
}"#;

fn setup() -> Setup {
    Setup::from_json_str(SETUP_JSON).unwrap()
}

#[test]
fn water_box_with_vacuum_cavity() {
    let (files, ctx) = ShieldCompiler::default().compile(&setup()).unwrap();

    assert_eq!(files.mat, "MEDIUM 1\nICRU 276\nEND\n");

    let expected_geo = format!(
        "    0    0          {}\n{}{}{}",
        ConverterConfig::default().geometry_title,
        "  RPP    1       -5.        5.       -5.        5.       -5.        5.\n",
        "  SPH    2        0.        0.        0.        2.                    \n",
        "  RPP    3     -250.      250.     -250.      250.     -250.      250.\n",
    ) + "\
  END
  AAA    1     +2
  BAA    2     +1     -2
  CAA    3     +3     -1
  END
    1    2    3
 1000    1    0
";
    assert_eq!(files.geo, expected_geo);

    let expected_detect = "\
MSH             -0.5      -0.5       -5.       0.5       0.5        5.
                   1         1       100        -1      DOSE depth_dose0
";
    assert_eq!(files.detect, expected_detect);
    assert!(files.beam.starts_with("APCORR                 0\n"));

    assert_eq!(ctx.material(1), Some(MaterialId(1)));
    assert_eq!(ctx.material(1000), Some(MaterialId(2)));
    assert_eq!(ctx.zone(1), Some(ZoneId(2)));
    assert_eq!(ctx.zone(2), Some(ZoneId(1)));
    assert_eq!(ctx.zone(3), None);
    assert_eq!(ctx.body(3), None);
    assert_eq!(ctx.detector_for_file("depth_dose0"), Some(DetectorId(1)));
}

#[test]
fn missing_reference_names_owner() {
    let mut setup = setup();
    setup.zones.insert(ZoneId(3), Zone::new(3, 42, 1));
    let err = ShieldCompiler::default().compile(&setup).unwrap_err();
    assert_eq!(err.to_string(), "[serializer] Zone{Id: 3} -> geo.dat: Cannot find body: 42");
    assert!(err.is_user_error());
}

#[test]
fn too_many_materials() {
    let mut setup = setup();
    for id in 3..=101 {
        setup.materials.insert(MaterialId(id), Material::predefined(id, "water_liquid"));
    }
    let err = ShieldCompiler::default().compile(&setup).unwrap_err();
    assert!(matches!(
        err,
        ConverterError::LimitExceeded { limit: 100, actual: 101, .. }
    ));
}

#[test]
fn custom_config_changes_title_and_boundary() {
    let config = ConverterConfig::from_yaml_str("geometry_title: phantom\nblackhole_half_extent: 1000\n").unwrap();
    let (files, _) = ShieldCompiler::new(config).compile(&setup()).unwrap();
    assert!(files.geo.starts_with("    0    0          phantom\n"));
    assert!(files.geo.contains("  RPP    3    -1000.     1000."));
}

/// Minimal little-endian result file: bins, data, quantity.
fn result_file(values: &[f64]) -> Vec<u8> {
    fn header(out: &mut Vec<u8>, tag: u32, dtype: &[u8], n: usize) {
        out.extend_from_slice(&tag.to_le_bytes());
        let mut dt = dtype.to_vec();
        dt.resize(8, 0);
        out.extend_from_slice(&dt);
        out.extend_from_slice(&(n as u64).to_le_bytes());
    }
    let mut out = b"xSH12AII".to_vec();
    out.extend_from_slice(&[0u8; 16]);
    header(&mut out, 0xCC01, b"S1", 4);
    out.extend_from_slice(b"DOSE");
    header(&mut out, 0xCC03, b"i4", 3);
    for n in [1i32, 1, values.len() as i32] {
        out.extend_from_slice(&n.to_le_bytes());
    }
    header(&mut out, 0xEE00, b"f8", values.len());
    for v in values {
        out.extend_from_slice(&v.to_le_bytes());
    }
    out
}

#[test]
fn results_flow_through_persisted_context() {
    let backend = ShieldBackend::default();
    let (_, ctx) = backend.compile(&setup()).unwrap();

    // results may be parsed by another process
    let restored = SerializationContext::from_json(&ctx.to_json().unwrap()).unwrap();
    assert_eq!(restored, ctx);

    let files: BTreeMap<String, Vec<u8>> = [
        ("depth_dose0.bdo".to_string(), result_file(&[0.5, 1.5, 2.5])),
        ("unknown0.bdo".to_string(), result_file(&[1.0])),
    ]
    .into_iter()
    .collect();
    let result = backend.parse_results(&files, &restored);

    let dose = result.detector(DetectorId(1)).unwrap();
    assert_eq!(dose.scored, vec![vec![vec![0.5, 1.5, 2.5]]]);
    assert_eq!(dose.dimensions.nz, 3);
    assert_eq!(dose.metadata["quantity"], "DOSE");
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors.contains_key("unknown0.bdo"));
}

fn material_strategy() -> impl Strategy<Value = Material> {
    (1i64..500, 0u8..3).prop_map(|(id, kind)| match kind {
        0 => Material::predefined(id, "water_liquid"),
        1 => Material::predefined(id, "vacuum"),
        _ => Material::compound(
            id,
            CompoundMaterial {
                name: format!("mix{id}"),
                density: Some(1.2),
                state_of_matter: StateOfMatter::Solid,
                elements: vec![Element::new("h-*", 2), Element::new("o-*", 1)],
                external_stopping_power_from_predefined: None,
            },
        ),
    })
}

proptest! {
    #[test]
    fn compile_is_deterministic(materials in prop::collection::vec(material_strategy(), 1..40)) {
        let mut base = setup();
        base.materials.clear();
        for material in materials {
            base.materials.insert(material.id, material);
        }
        let first_material = *base.materials.keys().next().unwrap();
        for zone in base.zones.values_mut() {
            zone.material_id = first_material;
        }

        let compiler = ShieldCompiler::default();
        let (files_a, ctx_a) = compiler.compile(&base).unwrap();
        let (files_b, ctx_b) = compiler.compile(&base.clone()).unwrap();
        prop_assert_eq!(&files_a, &files_b);
        prop_assert_eq!(&ctx_a, &ctx_b);

        let is_predefined = |id: &MaterialId| {
            matches!(base.materials[id].specs, MaterialSpecs::Predefined(_))
        };
        let numbered: Vec<(u32, MaterialId)> = ctx_a
            .materials
            .iter()
            .filter(|(engine, _)| **engine != 1000)
            .map(|(engine, id)| (*engine, *id))
            .collect();
        // dense numbering from 1, predefined before compound
        for (expected, (engine, _)) in (1u32..).zip(&numbered) {
            prop_assert_eq!(*engine, expected);
        }
        let kinds: Vec<bool> = numbered.iter().map(|(_, id)| is_predefined(id)).collect();
        prop_assert!(kinds.windows(2).all(|w| w[0] || !w[1]));
    }
}
