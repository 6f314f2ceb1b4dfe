//! Turning engine output back into an engine-independent result.

pub mod bdo;

pub use bdo::{parse_bdo, read_bdo, BdoFile, Payload, Record};

use crate::config::ConverterConfig;
use crate::context::SerializationContext;
use crate::error::BdoError;
use rayon::prelude::*;
use sim_setup::{DetectorResult, SimulationResult};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Parse every result file in `files` (name → content).
///
/// Files without the configured result extension are ignored. A file that
/// cannot be decoded or mapped to a detector is recorded under its name in
/// [`SimulationResult::errors`]; the others are still parsed. Detector
/// results are ordered by detector id.
pub fn parse_results(
    files: &BTreeMap<String, Vec<u8>>,
    ctx: &SerializationContext,
    config: &ConverterConfig,
) -> SimulationResult {
    let extension = config.result_extension.as_str();
    let candidates: Vec<(&String, &Vec<u8>)> = files
        .iter()
        .filter(|(name, _)| name.ends_with(extension))
        .collect();
    info!(files = files.len(), results = candidates.len(), "parsing simulation results");

    let parsed: Vec<(&String, Result<DetectorResult, BdoError>)> = candidates
        .into_par_iter()
        .map(|(name, content)| (name, parse_file(name, content, extension, ctx)))
        .collect();

    let mut result = SimulationResult::default();
    for (name, outcome) in parsed {
        match outcome {
            Ok(detector) => {
                debug!(file = %name, detector = %detector.detector_id, "result file parsed");
                result.detectors.push(detector);
            }
            Err(err) => {
                warn!(file = %name, error = %err, "result file skipped");
                result.errors.insert(name.clone(), err.to_string());
            }
        }
    }
    result.detectors.sort_by_key(|d| d.detector_id);
    info!(
        detectors = result.detectors.len(),
        errors = result.errors.len(),
        "simulation results parsed"
    );
    result
}

fn parse_file(
    name: &str,
    content: &[u8],
    extension: &str,
    ctx: &SerializationContext,
) -> Result<DetectorResult, BdoError> {
    let stem = name.strip_suffix(extension).unwrap_or(name);
    let detector_id = ctx
        .detector_for_file(stem)
        .ok_or_else(|| BdoError::UnknownFile(name.to_string()))?;
    let mut detector = parse_bdo(content)?;
    detector.detector_id = detector_id;
    Ok(detector)
}
