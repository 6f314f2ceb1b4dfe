//! Engine-independent description of a particle-transport simulation.
//!
//! A [`Setup`] is a geometry (bodies combined into material-filled zones),
//! a material catalog, a set of scoring detectors, one beam and one record
//! of physics options. Engine backends compile a setup into their own input
//! format and turn engine output back into a [`SimulationResult`].
//!
//! ```text
//! Setup ──► backend compile ──► engine input files
//!                                    │
//!                              (external run)
//!                                    ▼
//! SimulationResult ◄── backend parse ◄── engine output files
//! ```

pub mod beam;
pub mod body;
pub mod detector;
pub mod error;
pub mod geometry;
pub mod ids;
pub mod material;
pub mod result;
pub mod setup;
pub mod validate;
pub mod zone;

pub use beam::{
    Beam, BeamDirection, BeamDivergence, Distribution, EnergyStraggling, ScatteringType,
    SimulationOptions,
};
pub use body::{Body, BodyGeometry};
pub use detector::{Detector, DetectorGeometry, HeavyIon, Particle, Scoring};
pub use error::SetupError;
pub use geometry::{CylindricalSlices, Point, Range, Vec3, Vec3Int};
pub use ids::{BodyId, DetectorId, MaterialId, ZoneId, ROOT_ZONE};
pub use material::{
    CompoundMaterial, Element, Material, MaterialSpecs, PredefinedMaterial, StateOfMatter,
    VoxelMaterial,
};
pub use result::{DetectorResult, Dimensions, SimulationResult};
pub use setup::Setup;
pub use validate::{validate_setup, ValidationError};
pub use zone::{OperationKind, Zone, ZoneOperation};
