//! Row mapping between entities and their SQLite tables.
//!
//! Every table shares the `id`, `created`, `updated` prefix; [`SqlRecord`]
//! only describes the entity-specific columns after it.

use crate::model::extra::Extra;
use crate::model::manufacturer::Manufacturer;
use crate::model::port::Port;
use crate::model::provider::ServiceProvider;
use crate::model::slipway::Slipway;
use crate::model::station::Station;
use crate::model::water::Water;
use crate::model::{Entity, EntityId, RecordMeta};
use crate::repo::{StoreError, StoreResult};
use rusqlite::types::Value;
use rusqlite::Row;
use uuid::Uuid;

/// Entity that maps onto one SQLite table.
pub trait SqlRecord: Entity {
    const TABLE: &'static str;
    /// Entity-specific columns, in the order of [`SqlRecord::column_values`].
    const COLUMNS: &'static [&'static str];

    fn column_values(&self) -> Vec<Value>;
    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self>;
}

impl SqlRecord for Extra {
    const TABLE: &'static str = "extras";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn column_values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone())]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            name: row.get("name")?,
        })
    }
}

impl SqlRecord for Manufacturer {
    const TABLE: &'static str = "manufacturers";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn column_values(&self) -> Vec<Value> {
        vec![Value::Text(self.name.clone())]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            name: row.get("name")?,
        })
    }
}

impl SqlRecord for ServiceProvider {
    const TABLE: &'static str = "services";
    const COLUMNS: &'static [&'static str] = &["name", "city", "url"];

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            optional_text(self.city.as_deref()),
            optional_text(self.url.as_deref()),
        ]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            name: row.get("name")?,
            city: row.get("city")?,
            url: row.get("url")?,
        })
    }
}

impl SqlRecord for Port {
    const TABLE: &'static str = "ports";
    const COLUMNS: &'static [&'static str] = &["name", "city", "url"];

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            optional_text(self.city.as_deref()),
            optional_text(self.url.as_deref()),
        ]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            name: row.get("name")?,
            city: row.get("city")?,
            url: row.get("url")?,
        })
    }
}

impl SqlRecord for Slipway {
    const TABLE: &'static str = "slipways";
    const COLUMNS: &'static [&'static str] = &["name", "city", "water_fk", "port_fk"];

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            optional_text(self.city.as_deref()),
            optional_uuid(self.water_fk),
            optional_uuid(self.port_fk),
        ]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            name: row.get("name")?,
            city: row.get("city")?,
            water_fk: read_optional_uuid(row, "slipways.water_fk", "water_fk")?,
            port_fk: read_optional_uuid(row, "slipways.port_fk", "port_fk")?,
        })
    }
}

impl SqlRecord for Water {
    const TABLE: &'static str = "waters";
    const COLUMNS: &'static [&'static str] = &["longname", "shortname"];

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.longname.clone()),
            optional_text(self.shortname.as_deref()),
        ]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            longname: row.get("longname")?,
            shortname: row.get("shortname")?,
        })
    }
}

impl SqlRecord for Station {
    const TABLE: &'static str = "stations";
    const COLUMNS: &'static [&'static str] = &["longname", "shortname", "water_fk"];

    fn column_values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.longname.clone()),
            optional_text(self.shortname.as_deref()),
            optional_uuid(self.water_fk),
        ]
    }

    fn from_row(meta: RecordMeta, row: &Row<'_>) -> StoreResult<Self> {
        Ok(Self {
            meta,
            longname: row.get("longname")?,
            shortname: row.get("shortname")?,
            water_fk: read_optional_uuid(row, "stations.water_fk", "water_fk")?,
        })
    }
}

/// Reads the shared `id`, `created`, `updated` prefix of a row.
pub(crate) fn read_meta(row: &Row<'_>, table: &str) -> StoreResult<RecordMeta> {
    let id_text: String = row.get("id")?;
    let id = parse_uuid(&id_text, &format!("{table}.id"))?;
    Ok(RecordMeta::persisted(
        id,
        row.get("created")?,
        row.get("updated")?,
    ))
}

pub(crate) fn parse_uuid(value: &str, location: &str) -> StoreResult<EntityId> {
    Uuid::parse_str(value).map_err(|_| {
        StoreError::InvalidData(format!("invalid uuid value `{value}` in {location}"))
    })
}

fn read_optional_uuid(
    row: &Row<'_>,
    location: &str,
    column: &str,
) -> StoreResult<Option<EntityId>> {
    match row.get::<_, Option<String>>(column)? {
        Some(value) => Ok(Some(parse_uuid(&value, location)?)),
        None => Ok(None),
    }
}

fn optional_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, |text| Value::Text(text.to_string()))
}

pub(crate) fn optional_uuid(value: Option<EntityId>) -> Value {
    value.map_or(Value::Null, |id| Value::Text(id.to_string()))
}
