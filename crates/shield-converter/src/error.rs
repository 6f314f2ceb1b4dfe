//! Converter error types.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of setup entity an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Material,
    Body,
    Zone,
    Detector,
}

impl EntityKind {
    /// Lower-case noun used inside messages.
    pub fn noun(self) -> &'static str {
        match self {
            EntityKind::Material => "material",
            EntityKind::Body => "body",
            EntityKind::Zone => "zone",
            EntityKind::Detector => "detector",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Material => "Material",
            EntityKind::Body => "Body",
            EntityKind::Zone => "Zone",
            EntityKind::Detector => "Detector",
        };
        f.write_str(name)
    }
}

/// An entity of the setup, by kind and original id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        Self { kind, id }
    }

    pub fn material(id: impl Into<sim_setup::MaterialId>) -> Self {
        Self::new(EntityKind::Material, id.into().value())
    }

    pub fn body(id: impl Into<sim_setup::BodyId>) -> Self {
        Self::new(EntityKind::Body, id.into().value())
    }

    pub fn zone(id: impl Into<sim_setup::ZoneId>) -> Self {
        Self::new(EntityKind::Zone, id.into().value())
    }

    pub fn detector(id: impl Into<sim_setup::DetectorId>) -> Self {
        Self::new(EntityKind::Detector, id.into().value())
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{{Id: {}}}", self.kind, self.id)
    }
}

/// Fixed engine lookup table a name is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingTable {
    Material,
    Isotope,
    Particle,
    Scoring,
}

impl fmt::Display for MappingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MappingTable::Material => "material",
            MappingTable::Isotope => "isotope",
            MappingTable::Particle => "particle",
            MappingTable::Scoring => "scoring",
        };
        f.write_str(name)
    }
}

fn at(owner: &Option<EntityRef>, file: &str) -> String {
    match owner {
        Some(owner) => format!("[serializer] {} -> {}", owner, file),
        None => format!("[serializer] {}", file),
    }
}

/// Errors that stop compilation of a setup.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// One of the four catalogs has no entries.
    #[error("[serializer]: {collection} map is empty")]
    Incomplete { collection: &'static str },

    #[error("[serializer] {owner} -> {file}: Cannot find {}: {}", .reference.kind.noun(), .reference.id)]
    MissingReference {
        owner: EntityRef,
        file: &'static str,
        reference: EntityRef,
    },

    #[error("[serializer] {owner} -> {file}: \"{name}\" {table} mapping to shield format not found")]
    UnmappedName {
        owner: EntityRef,
        file: &'static str,
        table: MappingTable,
        name: String,
    },

    #[error("{}: Only {limit} {what} are permitted in shield ({actual} > {limit})", at(.owner, .file))]
    LimitExceeded {
        owner: Option<EntityRef>,
        file: &'static str,
        what: &'static str,
        limit: usize,
        actual: usize,
    },

    /// A required property has no usable value.
    #[error("[serializer] {owner} -> {file}: {message}")]
    MissingProperty {
        owner: EntityRef,
        file: &'static str,
        message: &'static str,
    },

    #[error("[serializer] {owner} -> {file}: {field} must be positive (got {value})")]
    Degenerate {
        owner: EntityRef,
        file: &'static str,
        field: &'static str,
        value: f64,
    },

    #[error("[serializer] {owner} -> {file}: {feature} not implemented")]
    NotImplemented {
        owner: EntityRef,
        file: &'static str,
        feature: &'static str,
    },

    #[error("[serializer] detect.dat: Found name duplicates: \"{name}\" for detector Ids: {first} and {second}")]
    DuplicateDetectorName { name: String, first: i64, second: i64 },

    #[error("[serializer] beam.dat: {}", .findings.join("; "))]
    InvalidBeam { findings: Vec<String> },

    #[error("[serializer] {owner} -> geo.dat: zone is not reachable from the root (parent Id: {parent})")]
    UnreachableZone { owner: EntityRef, parent: i64 },

    #[error("[serializer] {owner} -> geo.dat: zone Id 0 is reserved for the root")]
    ReservedZoneId { owner: EntityRef },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("cannot write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConverterError {
    /// The setup entity this error is about, if it is about one.
    pub fn entity(&self) -> Option<EntityRef> {
        match self {
            ConverterError::MissingReference { owner, .. }
            | ConverterError::UnmappedName { owner, .. }
            | ConverterError::MissingProperty { owner, .. }
            | ConverterError::Degenerate { owner, .. }
            | ConverterError::NotImplemented { owner, .. }
            | ConverterError::UnreachableZone { owner, .. }
            | ConverterError::ReservedZoneId { owner } => Some(*owner),
            ConverterError::LimitExceeded { owner, .. } => *owner,
            ConverterError::DuplicateDetectorName { second, .. } => {
                Some(EntityRef::new(EntityKind::Detector, *second))
            }
            ConverterError::Incomplete { .. }
            | ConverterError::InvalidBeam { .. }
            | ConverterError::InvalidConfig(_)
            | ConverterError::Io { .. } => None,
        }
    }

    /// Whether fixing the setup (rather than the environment) resolves this error.
    pub fn is_user_error(&self) -> bool {
        !matches!(
            self,
            ConverterError::InvalidConfig(_) | ConverterError::Io { .. }
        )
    }
}

/// Errors raised while decoding one binary result file.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BdoError {
    #[error("bad magic number (expected \"xSH12A\")")]
    BadMagic,

    #[error("unknown endianness marker {0:?}")]
    BadEndianness(String),

    #[error("truncated record at byte {offset}")]
    Truncated { offset: usize },

    #[error("record 0x{tag:04X}: unsupported data type {dtype:?}")]
    UnsupportedType { tag: u32, dtype: String },

    #[error("record 0x{tag:04X}: expected {expected} items, found {found}")]
    WrongCount { tag: u32, expected: usize, found: usize },

    #[error("bin counts {0:?} must all be positive")]
    BadBins([i32; 3]),

    #[error("missing record 0x{0:04X}")]
    MissingRecord(u32),

    #[error("data holds {found} values but bins require {expected}")]
    DataLength { expected: usize, found: usize },

    #[error("no detector registered for result file {0:?}")]
    UnknownFile(String),
}

pub type Result<T> = std::result::Result<T, ConverterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConverterError::UnmappedName {
            owner: EntityRef::material(1),
            file: "mat.dat",
            table: MappingTable::Material,
            name: "unobtainium".into(),
        };
        assert_eq!(
            err.to_string(),
            "[serializer] Material{Id: 1} -> mat.dat: \"unobtainium\" material mapping to shield format not found"
        );

        let err = ConverterError::LimitExceeded {
            owner: None,
            file: "mat.dat",
            what: "distinct materials",
            limit: 100,
            actual: 101,
        };
        assert_eq!(
            err.to_string(),
            "[serializer] mat.dat: Only 100 distinct materials are permitted in shield (101 > 100)"
        );

        let err = ConverterError::MissingReference {
            owner: EntityRef::zone(4),
            file: "geo.dat",
            reference: EntityRef::body(9),
        };
        assert_eq!(
            err.to_string(),
            "[serializer] Zone{Id: 4} -> geo.dat: Cannot find body: 9"
        );

        let err = ConverterError::Incomplete { collection: "Bodies" };
        assert_eq!(err.to_string(), "[serializer]: Bodies map is empty");
    }

    #[test]
    fn error_entity() {
        let err = ConverterError::Degenerate {
            owner: EntityRef::body(3),
            file: "geo.dat",
            field: "radius",
            value: 0.0,
        };
        assert_eq!(err.entity(), Some(EntityRef::body(3)));
        assert!(err.is_user_error());
        assert_eq!(ConverterError::Incomplete { collection: "Zones" }.entity(), None);
        assert!(!ConverterError::InvalidConfig("x".into()).is_user_error());
    }
}
