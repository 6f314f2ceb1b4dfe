//! Caller-supplied entity identifiers.
//!
//! Each entity kind has its own id space. Ids are chosen by the model layer
//! and are never generated here; the engine backends derive their own dense
//! numbering from them.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            pub fn value(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Identifier of a [`crate::Material`].
    MaterialId
);
entity_id!(
    /// Identifier of a [`crate::Body`].
    BodyId
);
entity_id!(
    /// Identifier of a [`crate::Zone`].
    ZoneId
);
entity_id!(
    /// Identifier of a [`crate::Detector`].
    DetectorId
);

/// Parent id marking a zone as a forest root.
pub const ROOT_ZONE: ZoneId = ZoneId(0);

impl ZoneId {
    pub fn is_root(self) -> bool {
        self == ROOT_ZONE
    }
}
