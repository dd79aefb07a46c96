//! Region entity - the neighborhood a mission is audited in
//!
//! Coverage of a region is aggregated outside this crate; the engine only
//! needs the identity and whether the region has been fully covered.

use serde::{Deserialize, Serialize};

use crate::RegionId;

/// A neighborhood containing one or more missions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub id: RegionId,
    /// Display name shown in the completion dialog
    #[serde(default)]
    pub name: Option<String>,
    /// Set by the coverage aggregator once every street has been audited
    #[serde(default)]
    pub fully_covered: bool,
}

impl Region {
    pub fn new(id: RegionId) -> Self {
        Self {
            id,
            name: None,
            fully_covered: false,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn as_fully_covered(mut self) -> Self {
        self.fully_covered = true;
        self
    }
}
