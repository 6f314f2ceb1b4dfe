//! `beam.dat`: the beam and transport options as a fixed sequence of cards.

use crate::error::{ConverterError, Result};
use crate::format::CardArg;
use crate::mapping;
use sim_setup::validate::{validate_beam, validate_options};
use sim_setup::{Beam, EnergyStraggling, Particle, ScatteringType, SimulationOptions};
use std::fmt::Write;
use tracing::debug;

const NAME_WIDTH: usize = 16;
const ARG_WIDTH: usize = 8;

/// Inputs every card is computed from.
struct CardInput<'a> {
    beam: &'a Beam,
    options: &'a SimulationOptions,
    particle: i64,
}

type CardFn = fn(&CardInput<'_>) -> Vec<CardArg>;

fn switch(on: bool) -> Vec<CardArg> {
    vec![CardArg::Int(i64::from(on))]
}

fn none(_: &CardInput<'_>) -> Vec<CardArg> {
    Vec::new()
}

/// Legacy card order. Cards computing no arguments are left out of the file.
const CARDS: &[(&str, CardFn)] = &[
    ("APCORR", |i| switch(i.options.antiparticle_correction_on)),
    ("BEAMDIR", |i| {
        vec![i.beam.direction.theta.into(), i.beam.direction.phi.into()]
    }),
    ("BEAMDIV", none),
    ("BEAMPOS", |i| {
        let p = i.beam.direction.position;
        vec![p.x.into(), p.y.into(), p.z.into()]
    }),
    ("BEAMSIGMA", |i| {
        vec![i.beam.divergence.sigma_x.into(), i.beam.divergence.sigma_y.into()]
    }),
    ("BMODMC", none),
    ("BMODTRANS", none),
    ("DELTAE", |i| vec![(i.options.mean_energy_loss / 100.0).into()]),
    ("DEMIN", |i| vec![i.options.min_energy_loss.into()]),
    ("EMTRANS", none),
    ("EXTSPEC", none),
    ("HIPROJ", |i| match &i.beam.particle {
        Particle::HeavyIon(ion) => vec![ion.nucleons_count.into(), ion.charge.into()],
        _ => Vec::new(),
    }),
    ("JPART0", |i| vec![i.particle.into()]),
    ("MAKELN", none),
    ("MSCAT", |i| {
        let code = match i.options.scattering_type {
            ScatteringType::Moliere => 2,
            ScatteringType::Gaussian => 1,
        };
        vec![CardArg::Int(code)]
    }),
    ("NEUTRFAST", |i| switch(i.options.fast_neutron_transport_on)),
    ("NEUTRLCUT", |i| vec![i.options.low_energy_neutron_cut_off.into()]),
    ("NSTAT", |i| {
        let count = i64::try_from(i.options.number_of_generated_particles).unwrap_or(i64::MAX);
        vec![count.into(), CardArg::Int(-1)]
    }),
    ("NUCRE", |i| switch(i.options.nuclear_reactions_on)),
    ("RNDSEED", none),
    ("STRAGG", |i| {
        let code = match i.options.energy_straggling {
            EnergyStraggling::Vavilov => 2,
            EnergyStraggling::Gaussian => 1,
        };
        vec![CardArg::Int(code)]
    }),
    ("TMAX0", |i| {
        vec![i.beam.initial_base_energy.into(), i.beam.initial_energy_sigma.into()]
    }),
    ("USEBMOD", none),
    ("USECBEAM", none),
    ("USEPARLEV", none),
];

/// One emitted line of `beam.dat`.
#[derive(Debug, Clone, PartialEq)]
pub struct BeamCard {
    pub name: &'static str,
    pub args: Vec<CardArg>,
}

/// Check the beam and options, then compute every non-empty card in order.
pub fn compile_beam(beam: &Beam, options: &SimulationOptions) -> Result<Vec<BeamCard>> {
    let mut findings: Vec<String> = validate_beam(beam)
        .into_iter()
        .chain(validate_options(options))
        .map(|finding| finding.to_string())
        .collect();
    let particle = mapping::particle_code(&beam.particle);
    if particle.is_none() {
        findings.push(format!(
            "\"{}\" particle mapping to shield format not found",
            mapping::particle_name(&beam.particle)
        ));
    }
    let particle = match particle {
        Some(code) if findings.is_empty() => code,
        _ => return Err(ConverterError::InvalidBeam { findings }),
    };

    let input = CardInput {
        beam,
        options,
        particle,
    };
    let cards: Vec<BeamCard> = CARDS
        .iter()
        .filter_map(|&(name, card)| {
            let args = card(&input);
            (!args.is_empty()).then_some(BeamCard { name, args })
        })
        .collect();
    debug!(cards = cards.len(), particle, "beam cards compiled");
    Ok(cards)
}

/// Render `beam.dat`.
pub fn render_beam(cards: &[BeamCard]) -> String {
    let mut out = String::new();
    for card in cards {
        let _ = write!(out, "{:<width$}", card.name, width = NAME_WIDTH);
        for arg in &card.args {
            out.push_str(&arg.render(ARG_WIDTH));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sim_setup::{BeamDirection, BeamDivergence, HeavyIon, Point};

    fn serialize(beam: &Beam, options: &SimulationOptions) -> String {
        render_beam(&compile_beam(beam, options).unwrap())
    }

    #[test]
    fn defaults() {
        let expected = "\
APCORR                 0
BEAMDIR               0.      0.
BEAMPOS               0.      0.      0.
BEAMSIGMA             0.      0.
DELTAE              0.01
DEMIN              0.025
JPART0                 2
MSCAT                  2
NEUTRFAST              1
NEUTRLCUT             0.
NSTAT               1000      -1
NUCRE                  1
STRAGG                 2
TMAX0               100.      0.
";
        assert_eq!(serialize(&Beam::default(), &SimulationOptions::default()), expected);
    }

    #[test]
    fn heavy_ion_beam() {
        let beam = Beam {
            direction: BeamDirection {
                phi: 1.0,
                theta: 1.0,
                position: Point::new(110.0, 1.222, 0.001),
            },
            divergence: BeamDivergence {
                sigma_x: 1.0,
                sigma_y: 1.0,
                ..BeamDivergence::default()
            },
            particle: Particle::HeavyIon(HeavyIon {
                charge: 10,
                nucleons_count: 111,
            }),
            ..Beam::default()
        };
        let options = SimulationOptions {
            antiparticle_correction_on: true,
            nuclear_reactions_on: false,
            mean_energy_loss: 90.0,
            min_energy_loss: 0.112,
            fast_neutron_transport_on: false,
            low_energy_neutron_cut_off: 11.11,
            number_of_generated_particles: 0,
            ..SimulationOptions::default()
        };
        let expected = "\
APCORR                 1
BEAMDIR               1.      1.
BEAMPOS             110.   1.222   0.001
BEAMSIGMA             1.      1.
DELTAE               0.9
DEMIN              0.112
HIPROJ               111      10
JPART0                25
MSCAT                  2
NEUTRFAST              0
NEUTRLCUT          11.11
NSTAT                  0      -1
NUCRE                  0
STRAGG                 2
TMAX0               100.      0.
";
        assert_eq!(serialize(&beam, &options), expected);
    }

    #[test]
    fn empty_cards_are_omitted() {
        let cards = compile_beam(&Beam::default(), &SimulationOptions::default()).unwrap();
        let names: Vec<&str> = cards.iter().map(|c| c.name).collect();
        for absent in ["BEAMDIV", "BMODMC", "BMODTRANS", "HIPROJ", "RNDSEED", "USEPARLEV"] {
            assert!(!names.contains(&absent), "{absent} should be omitted");
        }
        assert!(names.contains(&"BEAMDIR"));
        assert!(names.contains(&"BEAMPOS"));
        assert!(names.contains(&"TMAX0"));
    }

    #[test]
    fn gaussian_switches() {
        let options = SimulationOptions {
            scattering_type: ScatteringType::Gaussian,
            energy_straggling: EnergyStraggling::Gaussian,
            ..SimulationOptions::default()
        };
        let text = serialize(&Beam::default(), &options);
        assert!(text.contains("MSCAT                  1\n"));
        assert!(text.contains("STRAGG                 1\n"));
    }

    #[test]
    fn invalid_beam_collects_every_finding() {
        let beam = Beam {
            direction: BeamDirection {
                phi: -1.0,
                ..BeamDirection::default()
            },
            particle: Particle::named("graviton"),
            ..Beam::default()
        };
        let options = SimulationOptions {
            min_energy_loss: -1.0,
            ..SimulationOptions::default()
        };
        let err = compile_beam(&beam, &options).unwrap_err();
        match &err {
            ConverterError::InvalidBeam { findings } => assert_eq!(findings.len(), 3),
            other => panic!("unexpected error {other:?}"),
        }
        let text = err.to_string();
        assert!(text.starts_with("[serializer] beam.dat: "));
        assert!(text.contains("\"graviton\" particle mapping to shield format not found"));
    }
}
