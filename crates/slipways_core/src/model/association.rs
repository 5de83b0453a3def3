//! Join records between a primary entity and its related entities.
//!
//! # Invariants
//! - `owner_fk` is the generated id of an already persisted primary entity.
//! - One batch of records is scoped to exactly one owner.

use crate::model::{now_epoch_ms, EntityId};
use uuid::Uuid;

/// Relationship shapes stored as pure join tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssociationKind {
    /// `slipway_extras`: slipway owns, extra is related.
    SlipwayExtra,
    /// `manufacturer_services`: service provider owns, manufacturer is related.
    ServiceManufacturer,
}

impl AssociationKind {
    pub fn table(self) -> &'static str {
        match self {
            Self::SlipwayExtra => "slipway_extras",
            Self::ServiceManufacturer => "manufacturer_services",
        }
    }

    pub fn owner_column(self) -> &'static str {
        match self {
            Self::SlipwayExtra => "slipway_fk",
            Self::ServiceManufacturer => "service_fk",
        }
    }

    pub fn related_column(self) -> &'static str {
        match self {
            Self::SlipwayExtra => "extra_fk",
            Self::ServiceManufacturer => "manufacturer_fk",
        }
    }

    /// Human readable `(owner, related)` labels for log lines.
    pub fn labels(self) -> (&'static str, &'static str) {
        match self {
            Self::SlipwayExtra => ("Slipway", "Extra"),
            Self::ServiceManufacturer => ("Service", "Manufacturer"),
        }
    }
}

/// One join row. Never read back by the write pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationRecord {
    pub id: EntityId,
    pub created: i64,
    pub owner_fk: EntityId,
    pub related_fk: EntityId,
}

impl AssociationRecord {
    /// Builds a record with a fresh id and a `created` stamp of now.
    pub fn new(owner_fk: EntityId, related_fk: EntityId) -> Self {
        Self {
            id: Uuid::new_v4(),
            created: now_epoch_ms(),
            owner_fk,
            related_fk,
        }
    }
}
