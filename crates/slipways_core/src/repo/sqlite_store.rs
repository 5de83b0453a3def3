//! Generic SQLite store for primary entities.
//!
//! # Responsibility
//! - Implement [`Store`] once for every [`SqlRecord`] table.
//! - Implement deferred commits on top of SQLite's own transaction state.
//!
//! # Invariants
//! - Inserts use `INSERT OR IGNORE`; an ignored row is reported as
//!   [`StoreWrite::Declined`], never as a fault.
//! - `CommitMode::Deferred` leaves a transaction open on the connection
//!   until [`UnitOfWork::commit`] or [`UnitOfWork::rollback`].

use crate::model::slipway::Slipway;
use crate::model::{now_epoch_ms, EntityId, RecordMeta};
use crate::repo::records::{read_meta, SqlRecord};
use crate::repo::{
    CancelSignal, ChildLinkStore, CommitMode, Store, StoreError, StoreResult, StoreWrite,
    UnitOfWork,
};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use std::marker::PhantomData;
use uuid::Uuid;

/// SQLite-backed store for one entity table.
pub struct SqliteStore<'conn, E> {
    conn: &'conn Connection,
    _record: PhantomData<fn() -> E>,
}

impl<'conn, E: SqlRecord> SqliteStore<'conn, E> {
    /// Constructs a store from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_table(conn, E::TABLE)?;
        Ok(Self {
            conn,
            _record: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT id, created, updated, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    fn load(&self, id: EntityId) -> StoreResult<Option<E>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE id = ?1;", Self::select_sql()))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(E::from_row(read_meta(row, E::TABLE)?, row)?)),
            None => Ok(None),
        }
    }
}

impl<E: SqlRecord> Store<E> for SqliteStore<'_, E> {
    fn insert(
        &self,
        entity: &E,
        cancel: &CancelSignal,
        commit: CommitMode,
    ) -> StoreResult<StoreWrite<E>> {
        cancel.check()?;
        if commit == CommitMode::Deferred {
            begin_if_idle(self.conn)?;
        }

        let id = Uuid::new_v4();
        let created = now_epoch_ms();
        let mut record = entity.clone();
        *record.meta_mut() = RecordMeta::persisted(id, created, None);

        let mut values = vec![Value::Text(id.to_string()), Value::Integer(created), Value::Null];
        values.extend(record.column_values());
        let placeholders = vec!["?"; values.len()].join(", ");
        let sql = format!(
            "INSERT OR IGNORE INTO {} (id, created, updated, {}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(values))?;

        if commit == CommitMode::Immediate {
            commit_if_open(self.conn)?;
        }

        if changed == 0 {
            return Ok(StoreWrite::Declined(format!(
                "insert into `{}` was ignored",
                E::TABLE
            )));
        }
        debug!(
            "event=store_insert module=repo status=ok table={} id={} commit={:?}",
            E::TABLE,
            id,
            commit
        );
        Ok(StoreWrite::Persisted(record))
    }

    fn select_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>> {
        cancel.check()?;
        self.load(id)
    }

    fn select_all(&self, cancel: &CancelSignal) -> StoreResult<Vec<E>> {
        cancel.check()?;
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY created ASC, id ASC;", Self::select_sql()))?;
        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        while let Some(row) = rows.next()? {
            records.push(E::from_row(read_meta(row, E::TABLE)?, row)?);
        }
        Ok(records)
    }

    fn update(&self, entity: &E, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>> {
        cancel.check()?;
        let Some(id) = entity.id() else {
            return Ok(StoreWrite::Declined(format!(
                "update on `{}` requires an id",
                E::TABLE
            )));
        };

        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(index, column)| format!("{column} = ?{}", index + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let id_param = E::COLUMNS.len() + 2;
        let sql = format!(
            "UPDATE {} SET updated = ?1, {assignments} WHERE id = ?{id_param};",
            E::TABLE
        );

        let mut values = vec![Value::Integer(now_epoch_ms())];
        values.extend(entity.column_values());
        values.push(Value::Text(id.to_string()));
        let changed = self.conn.execute(&sql, params_from_iter(values))?;
        if changed == 0 {
            return Ok(StoreWrite::Declined(format!(
                "no row `{id}` in `{}`",
                E::TABLE
            )));
        }

        match self.load(id)? {
            Some(stored) => Ok(StoreWrite::Persisted(stored)),
            None => Err(StoreError::NotFound(id)),
        }
    }

    fn delete(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>> {
        cancel.check()?;
        let Some(existing) = self.load(id)? else {
            return Ok(StoreWrite::Declined(format!(
                "no row `{id}` in `{}`",
                E::TABLE
            )));
        };

        self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", E::TABLE),
            [id.to_string()],
        )?;
        Ok(StoreWrite::Persisted(existing))
    }
}

impl ChildLinkStore for SqliteStore<'_, Slipway> {
    fn link_to_parent(
        &self,
        child: EntityId,
        parent: EntityId,
        cancel: &CancelSignal,
    ) -> StoreResult<()> {
        cancel.check()?;
        let changed = self.conn.execute(
            "UPDATE slipways
             SET port_fk = ?1,
                 updated = ?2
             WHERE id = ?3;",
            params![parent.to_string(), now_epoch_ms(), child.to_string()],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(child));
        }
        Ok(())
    }
}

/// Commit/rollback over the connection's open transaction.
pub struct SqliteUnitOfWork<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteUnitOfWork<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Whether deferred writes are waiting for a commit.
    pub fn has_pending(&self) -> bool {
        !self.conn.is_autocommit()
    }
}

impl UnitOfWork for SqliteUnitOfWork<'_> {
    fn commit(&self) -> StoreResult<()> {
        commit_if_open(self.conn)
    }

    fn rollback(&self) -> StoreResult<()> {
        if !self.conn.is_autocommit() {
            self.conn.execute_batch("ROLLBACK;")?;
        }
        Ok(())
    }
}

fn begin_if_idle(conn: &Connection) -> StoreResult<()> {
    if conn.is_autocommit() {
        conn.execute_batch("BEGIN IMMEDIATE;")?;
    }
    Ok(())
}

fn commit_if_open(conn: &Connection) -> StoreResult<()> {
    if !conn.is_autocommit() {
        conn.execute_batch("COMMIT;")?;
    }
    Ok(())
}

pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> StoreResult<()> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    if exists == 1 {
        Ok(())
    } else {
        Err(StoreError::MissingRequiredTable(table))
    }
}
