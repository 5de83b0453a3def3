//! Marinas and harbours. Slipways point at their port via `port_fk`.

use crate::model::{RecordMeta, RelatedRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Port {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Existing slipways that belong to this port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slipways: Option<Vec<RelatedRef>>,
}

impl PortDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn to_entity(&self) -> Port {
        Port {
            meta: RecordMeta::default(),
            name: self.name.clone(),
            city: self.city.clone(),
            url: self.url.clone(),
        }
    }
}
