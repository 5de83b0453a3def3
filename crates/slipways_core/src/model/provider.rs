//! Service providers (repair shops, winter storage, ...) stored in `services`.
//!
//! A provider is linked to the manufacturers it services through
//! `manufacturer_services` join rows.

use crate::model::{RecordMeta, RelatedRef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceProvider {
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
pub struct ServiceProviderDto {
    #[serde(flatten)]
    pub meta: RecordMeta,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Manufacturers serviced by this provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturers: Option<Vec<RelatedRef>>,
}

impl ServiceProviderDto {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn to_entity(&self) -> ServiceProvider {
        ServiceProvider {
            meta: RecordMeta::default(),
            name: self.name.clone(),
            city: self.city.clone(),
            url: self.url.clone(),
        }
    }
}
