//! Slipways: the primary record of the domain.

use crate::model::{EntityId, RecordMeta, RelatedRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slipway {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_fk: Option<EntityId>,
    /// Owning port, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_fk: Option<EntityId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlipwayDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_fk: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_fk: Option<EntityId>,
    /// Extras offered at this slipway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extras: Option<Vec<RelatedRef>>,
}

impl SlipwayDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn to_entity(&self) -> Slipway {
        Slipway {
            meta: RecordMeta::default(),
            name: self.name.clone(),
            city: self.city.clone(),
            water_fk: self.water_fk,
            port_fk: self.port_fk,
        }
    }
}
