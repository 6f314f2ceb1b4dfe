//! Beam source description and global transport options.

use crate::detector::Particle;
use crate::geometry::Point;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Beam {
    pub direction: BeamDirection,
    pub divergence: BeamDivergence,
    #[serde(rename = "particleType")]
    pub particle: Particle,
    /// Initial kinetic energy (MeV/nucleon).
    pub initial_base_energy: f64,
    pub initial_energy_sigma: f64,
}

impl Default for Beam {
    fn default() -> Self {
        Self {
            direction: BeamDirection::default(),
            divergence: BeamDivergence::default(),
            particle: Particle::default(),
            initial_base_energy: 100.0,
            initial_energy_sigma: 0.0,
        }
    }
}

/// Beam direction in spherical angles plus the source position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BeamDirection {
    /// Azimuth, radians in `[0, 2π]`.
    pub phi: f64,
    /// Polar angle, radians in `[0, π]`.
    pub theta: f64,
    pub position: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BeamDivergence {
    pub sigma_x: f64,
    pub sigma_y: f64,
    pub distribution: Distribution,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    #[default]
    Gaussian,
    Flat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScatteringType {
    Gaussian,
    #[default]
    Moliere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyStraggling {
    Gaussian,
    #[default]
    Vavilov,
}

/// Physics switches and run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationOptions {
    #[serde(rename = "antyparticleCorrectionOn")]
    pub antiparticle_correction_on: bool,
    pub nuclear_reactions_on: bool,
    /// Mean energy loss per step, in percent.
    pub mean_energy_loss: f64,
    /// Minimum energy loss (MeV).
    pub min_energy_loss: f64,
    pub scattering_type: ScatteringType,
    pub energy_straggling: EnergyStraggling,
    pub fast_neutron_transport_on: bool,
    /// Low-energy neutron cut-off (MeV).
    pub low_energy_neutron_cut_off: f64,
    pub number_of_generated_particles: u64,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        Self {
            antiparticle_correction_on: false,
            nuclear_reactions_on: true,
            mean_energy_loss: 1.0,
            min_energy_loss: 0.025,
            scattering_type: ScatteringType::Moliere,
            energy_straggling: EnergyStraggling::Vavilov,
            fast_neutron_transport_on: true,
            low_energy_neutron_cut_off: 0.0,
            number_of_generated_particles: 1000,
        }
    }
}
