//! Model-level checks that do not depend on any engine.
//!
//! Unlike compilation, validation collects every finding.

use crate::beam::{Beam, SimulationOptions};
use crate::setup::Setup;
use std::f64::consts::PI;

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Dotted path of the offending field, e.g. `beam.direction.phi`.
    pub rule: String,
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Validate a whole setup. Returns all errors found.
pub fn validate_setup(setup: &Setup) -> Vec<ValidationError> {
    let mut errors = validate_beam(&setup.beam);
    errors.extend(validate_options(&setup.options));

    // Map keys must agree with the entity's own id
    for (key, material) in &setup.materials {
        if *key != material.id {
            errors.push(ValidationError::new(
                "materials.id",
                format!("Material keyed {} carries id {}", key, material.id),
            ));
        }
    }
    for (key, body) in &setup.bodies {
        if *key != body.id {
            errors.push(ValidationError::new(
                "bodies.id",
                format!("Body keyed {} carries id {}", key, body.id),
            ));
        }
    }
    for (key, zone) in &setup.zones {
        if *key != zone.id {
            errors.push(ValidationError::new(
                "zones.id",
                format!("Zone keyed {} carries id {}", key, zone.id),
            ));
        }
    }
    for (key, detector) in &setup.detectors {
        if *key != detector.id {
            errors.push(ValidationError::new(
                "detectors.id",
                format!("Detector keyed {} carries id {}", key, detector.id),
            ));
        }
    }

    for zone in setup.zones.values() {
        if zone.id.is_root() {
            errors.push(ValidationError::new(
                "zones.id",
                format!("Zone id {} is reserved for the root", zone.id),
            ));
        }
        if !zone.is_root() && !setup.zones.contains_key(&zone.parent_id) {
            errors.push(ValidationError::new(
                "zones.parentId",
                format!("Zone {} has unknown parent {}", zone.id, zone.parent_id),
            ));
        }
    }

    errors
}

pub fn validate_beam(beam: &Beam) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let phi = beam.direction.phi;
    if !(0.0..=2.0 * PI).contains(&phi) {
        errors.push(ValidationError::new(
            "beam.direction.phi",
            format!("phi must be within [0, 2π], got {}", phi),
        ));
    }
    let theta = beam.direction.theta;
    if !(0.0..=PI).contains(&theta) {
        errors.push(ValidationError::new(
            "beam.direction.theta",
            format!("theta must be within [0, π], got {}", theta),
        ));
    }
    if !(beam.initial_base_energy >= 0.0) {
        errors.push(ValidationError::new(
            "beam.initialBaseEnergy",
            format!("initial base energy must be >= 0, got {}", beam.initial_base_energy),
        ));
    }
    if !(beam.initial_energy_sigma >= 0.0) {
        errors.push(ValidationError::new(
            "beam.initialEnergySigma",
            format!("initial energy sigma must be >= 0, got {}", beam.initial_energy_sigma),
        ));
    }
    errors
}

pub fn validate_options(options: &SimulationOptions) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if !(options.mean_energy_loss >= 0.0) {
        errors.push(ValidationError::new(
            "options.meanEnergyLoss",
            format!("mean energy loss must be >= 0, got {}", options.mean_energy_loss),
        ));
    }
    if !(options.min_energy_loss >= 0.0) {
        errors.push(ValidationError::new(
            "options.minEnergyLoss",
            format!("min energy loss must be >= 0, got {}", options.min_energy_loss),
        ));
    }
    if !(options.low_energy_neutron_cut_off >= 0.0) {
        errors.push(ValidationError::new(
            "options.lowEnergyNeutronCutOff",
            format!(
                "low energy neutron cut-off must be >= 0, got {}",
                options.low_energy_neutron_cut_off
            ),
        ));
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::zone::Zone;

    #[test]
    fn default_setup_is_valid() {
        assert!(validate_setup(&Setup::default()).is_empty());
    }

    #[test]
    fn collects_every_beam_problem() {
        let mut beam = Beam::default();
        beam.direction.phi = 7.0;
        beam.direction.theta = -0.1;
        beam.initial_base_energy = -1.0;
        beam.initial_energy_sigma = f64::NAN;
        let errors = validate_beam(&beam);
        let rules: Vec<&str> = errors.iter().map(|e| e.rule.as_str()).collect();
        assert_eq!(
            rules,
            vec![
                "beam.direction.phi",
                "beam.direction.theta",
                "beam.initialBaseEnergy",
                "beam.initialEnergySigma"
            ]
        );
    }

    #[test]
    fn angle_bounds_are_inclusive() {
        let mut beam = Beam::default();
        beam.direction.phi = 2.0 * PI;
        beam.direction.theta = PI;
        assert!(validate_beam(&beam).is_empty());
    }

    #[test]
    fn negative_option_values_flagged() {
        let options = SimulationOptions {
            min_energy_loss: -0.5,
            low_energy_neutron_cut_off: -1.0,
            ..Default::default()
        };
        assert_eq!(validate_options(&options).len(), 2);
    }

    #[test]
    fn dangling_parent_and_key_mismatch() {
        let mut setup = Setup::new().with_zone(Zone::new(2, 1, 1).with_parent(9));
        setup.materials.insert(5.into(), Material::predefined(6, "vacuum"));
        let errors = validate_setup(&setup);
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().any(|e| e.rule == "materials.id"));
        assert!(errors
            .iter()
            .any(|e| e.to_string() == "[zones.parentId] Zone 2 has unknown parent 9"));
    }

    #[test]
    fn root_zone_id_is_reserved() {
        let setup = Setup::new().with_zone(Zone::new(0, 1, 1));
        let errors = validate_setup(&setup);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[zones.id] Zone id 0 is reserved for the root");
    }
}
