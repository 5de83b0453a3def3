//! Gauge stations along a waterway. Read-only for this service.

use crate::model::{EntityId, RecordMeta};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Station {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub longname: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shortname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_fk: Option<EntityId>,
}
