//! Slipway extras (sauna, crane, parking, ...).

use crate::model::RecordMeta;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extra {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
}

/// Request/response object for extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtraDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub name: String,
}

impl ExtraDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            meta: RecordMeta::default(),
            name: name.into(),
        }
    }

    pub fn to_entity(&self) -> Extra {
        Extra {
            meta: RecordMeta::default(),
            name: self.name.clone(),
        }
    }
}
