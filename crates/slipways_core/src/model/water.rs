//! Waterways (rivers, lakes, canals).

use crate::model::RecordMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Water {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub longname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaterDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub longname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
}

impl WaterDto {
    pub fn new(longname: impl Into<String>) -> Self {
        Self {
            longname: longname.into(),
            ..Self::default()
        }
    }

    pub fn to_entity(&self) -> Water {
        Water {
            meta: RecordMeta::default(),
            longname: self.longname.clone(),
            shortname: self.shortname.clone(),
        }
    }

    pub fn from_entity(entity: &Water) -> Self {
        Self {
            meta: entity.meta.clone(),
            longname: entity.longname.clone(),
            shortname: entity.shortname.clone(),
        }
    }
}
