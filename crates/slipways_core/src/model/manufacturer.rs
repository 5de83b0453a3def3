//! Engine and boat manufacturers.

use crate::model::RecordMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manufacturer {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManufacturerDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub name: String,
}

impl ManufacturerDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::default(),
            name: name.into(),
        }
    }

    pub fn to_entity(&self) -> Manufacturer {
        Manufacturer {
            meta: RecordMeta::default(),
            name: self.name.clone(),
        }
    }

    pub fn from_entity(entity: &Manufacturer) -> Self {
        Self {
            meta: entity.meta.clone(),
            name: entity.name.clone(),
        }
    }
}
