//! Domain model for slipways, ports, waters and their associations.
//!
//! # Responsibility
//! - Define persisted entities and the request objects that map onto them.
//! - Keep JSON naming stable: camelCase, unset optionals omitted.
//!
//! # Invariants
//! - `RecordMeta::id` is `None` before a store insert and `Some` after.
//! - Request objects are never persisted directly.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

pub mod association;
pub mod extra;
pub mod manufacturer;
pub mod port;
pub mod provider;
pub mod slipway;
pub mod station;
pub mod water;

/// Stable identifier for every persisted record.
pub type EntityId = Uuid;

/// Store-assigned identity and timestamps shared by all entities.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    /// Epoch milliseconds, set on insert.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
    /// Epoch milliseconds, set on update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<i64>,
}

impl RecordMeta {
    /// Metadata of a record that was loaded from or written to a store.
    pub fn persisted(id: EntityId, created: i64, updated: Option<i64>) -> Self {
        Self {
            id: Some(id),
            created: Some(created),
            updated,
        }
    }
}

/// Entities carrying [`RecordMeta`].
pub trait Entity: Clone {
    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> Option<EntityId> {
        self.meta().id
    }
}

/// One element of a caller-supplied related-identifier list.
///
/// `name` is an inline hint only; it is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedRef {
    pub id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl RelatedRef {
    pub fn new(id: EntityId) -> Self {
        Self { id, name: None }
    }

    pub fn named(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
        }
    }
}

/// Current wall clock time in epoch milliseconds.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

/// Returns whether a mandatory display field is missing or blank.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

macro_rules! impl_entity {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::model::Entity for $ty {
                fn meta(&self) -> &$crate::model::RecordMeta {
                    &self.meta
                }

                fn meta_mut(&mut self) -> &mut $crate::model::RecordMeta {
                    &mut self.meta
                }
            }
        )+
    };
}

impl_entity!(
    extra::Extra,
    manufacturer::Manufacturer,
    port::Port,
    provider::ServiceProvider,
    slipway::Slipway,
    station::Station,
    water::Water,
);
