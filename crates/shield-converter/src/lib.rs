//! SHIELD-HIT12A backend: compiles a [`Setup`](sim_setup::Setup) into the
//! engine's fixed-column input cards and reads its binary detector output.
//!
//! # Architecture
//!
//! ```text
//! Setup ──► ShieldCompiler ──► CompiledFiles { mat.dat, geo.dat, detect.dat, beam.dat }
//!                │
//!                ├── material numbering (predefined, then compound)
//!                ├── body cards + boundary body
//!                ├── zone forest ──► OET normalisation ──► flat zones
//!                ├── detector cards + result file names
//!                └── beam cards
//!                      │
//!                      ▼
//!            SerializationContext (engine id → original id)
//!                      │
//! *.bdo files ─────────┴──► parse_results ──► SimulationResult
//! ```
//!
//! # Key Concepts
//!
//! - **SerializationContext**: reverse id maps, persisted between compiling
//!   a setup and parsing the run's output
//! - **Oet**: operation expression tree with complements pushed to the
//!   leaves, flattened into sum-of-products zone lines
//! - **Blackhole**: the absorbing boundary zone that claims all space no
//!   user zone claims

pub mod beam;
pub mod compiler;
pub mod config;
pub mod context;
pub mod detector;
pub mod error;
pub mod format;
pub mod geometry;
pub mod mapping;
pub mod material;
pub mod results;

pub use compiler::{CompiledFiles, ShieldBackend, ShieldCompiler, SimulationBackend};
pub use config::{ConverterConfig, CONFIG_ENV_VAR};
pub use context::SerializationContext;
pub use error::{BdoError, ConverterError, EntityKind, EntityRef, MappingTable, Result};
pub use format::{fixed_width_float, CardArg};
pub use results::{parse_bdo, parse_results};

/// Most materials one `mat.dat` may declare.
pub const MAX_MATERIALS: usize = 100;

/// Most elements one compound material may list.
pub const MAX_COMPOUND_ELEMENTS: usize = 13;

/// Material id of the absorbing boundary zone.
pub const BLACKHOLE_MATERIAL: i64 = 0;

/// Default half edge of the boundary cube (cm).
pub const BLACKHOLE_HALF_EXTENT: f64 = 250.0;

/// Suffix of the engine's binary detector output.
pub const DEFAULT_RESULT_EXTENSION: &str = ".bdo";

pub const MAT_FILE: &str = "mat.dat";
pub const GEO_FILE: &str = "geo.dat";
pub const DETECT_FILE: &str = "detect.dat";
pub const BEAM_FILE: &str = "beam.dat";

/// Engine executable invoked on a prepared working directory.
pub const ENGINE_BINARY: &str = "shieldhit";
