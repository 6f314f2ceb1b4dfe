//! Compilation pipeline and the backend seam.

use crate::beam::{compile_beam, render_beam};
use crate::config::ConverterConfig;
use crate::context::SerializationContext;
use crate::detector::{compile_detectors, render_detect};
use crate::error::{ConverterError, Result};
use crate::geometry::{compile_geometry, render_geo};
use crate::material::{compile_materials, render_mat};
use crate::results::parse_results;
use crate::{BEAM_FILE, DETECT_FILE, ENGINE_BINARY, GEO_FILE, MAT_FILE};
use sim_setup::{Setup, SimulationResult};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info, info_span};

/// A simulation engine reachable through the engine-independent model.
pub trait SimulationBackend {
    /// Engine input produced for one setup.
    type Files;
    /// State that must survive until the run's output is parsed.
    type Context;

    fn compile(&self, setup: &Setup) -> Result<(Self::Files, Self::Context)>;

    /// Decode output files (name → bytes). Never fails as a whole; problems
    /// are recorded per file inside the result.
    fn parse_results(&self, files: &BTreeMap<String, Vec<u8>>, ctx: &Self::Context) -> SimulationResult;
}

/// The four input files of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFiles {
    pub mat: String,
    pub geo: String,
    pub detect: String,
    pub beam: String,
}

impl CompiledFiles {
    /// `(file name, content)` pairs.
    pub fn files(&self) -> [(&'static str, &str); 4] {
        [
            (BEAM_FILE, &self.beam),
            (GEO_FILE, &self.geo),
            (MAT_FILE, &self.mat),
            (DETECT_FILE, &self.detect),
        ]
    }

    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.files()
            .into_iter()
            .map(|(name, content)| (name.to_string(), content.to_string()))
            .collect()
    }

    /// Write every file into `dir`, which must exist.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        for (name, content) in self.files() {
            let path = dir.join(name);
            std::fs::write(&path, content).map_err(|source| ConverterError::Io { path, source })?;
        }
        info!(dir = %dir.display(), "input files written");
        Ok(())
    }

    /// Engine invocation for a working directory holding these files.
    pub fn command_line(&self) -> Vec<String> {
        vec![
            ENGINE_BINARY.to_string(),
            format!("--beamfile={}", BEAM_FILE),
            format!("--geofile={}", GEO_FILE),
            format!("--matfile={}", MAT_FILE),
            format!("--detectfile={}", DETECT_FILE),
        ]
    }
}

/// Compiles setups into SHIELD-HIT12A input files.
#[derive(Debug, Clone, Default)]
pub struct ShieldCompiler {
    config: ConverterConfig,
}

impl ShieldCompiler {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// Compile a setup. The first failure aborts; nothing partial is returned.
    pub fn compile(&self, setup: &Setup) -> Result<(CompiledFiles, SerializationContext)> {
        let span = info_span!("compile_setup");
        let _guard = span.enter();
        info!(
            materials = setup.materials.len(),
            bodies = setup.bodies.len(),
            zones = setup.zones.len(),
            detectors = setup.detectors.len(),
            "compiling setup"
        );

        check_complete(setup)?;

        let mut ctx = SerializationContext::new();
        let (materials, material_map) = compile_materials(&setup.materials, &mut ctx)?;
        let geometry = compile_geometry(
            &setup.bodies,
            &setup.zones,
            &material_map,
            self.config.blackhole_half_extent,
            &mut ctx,
        )?;
        let detectors = compile_detectors(&setup.detectors, &material_map, &mut ctx)?;
        let beam = compile_beam(&setup.beam, &setup.options)?;
        debug!(
            zones = geometry.zones.len(),
            detector_files = ctx.detector_files.len(),
            "setup compiled"
        );

        let files = CompiledFiles {
            mat: render_mat(&materials),
            geo: render_geo(&geometry, &self.config.geometry_title),
            detect: render_detect(&detectors),
            beam: render_beam(&beam),
        };
        info!("setup compiled");
        Ok((files, ctx))
    }
}

fn check_complete(setup: &Setup) -> Result<()> {
    let collections = [
        ("Bodies", setup.bodies.is_empty()),
        ("Zones", setup.zones.is_empty()),
        ("Materials", setup.materials.is_empty()),
        ("Detectors", setup.detectors.is_empty()),
    ];
    match collections.into_iter().find(|(_, empty)| *empty) {
        Some((collection, _)) => Err(ConverterError::Incomplete { collection }),
        None => Ok(()),
    }
}

/// [`SimulationBackend`] for SHIELD-HIT12A.
#[derive(Debug, Clone, Default)]
pub struct ShieldBackend {
    compiler: ShieldCompiler,
}

impl ShieldBackend {
    pub fn new(config: ConverterConfig) -> Self {
        Self {
            compiler: ShieldCompiler::new(config),
        }
    }
}

impl SimulationBackend for ShieldBackend {
    type Files = CompiledFiles;
    type Context = SerializationContext;

    fn compile(&self, setup: &Setup) -> Result<(CompiledFiles, SerializationContext)> {
        self.compiler.compile(setup)
    }

    fn parse_results(&self, files: &BTreeMap<String, Vec<u8>>, ctx: &SerializationContext) -> SimulationResult {
        parse_results(files, ctx, self.compiler.config())
    }
}
