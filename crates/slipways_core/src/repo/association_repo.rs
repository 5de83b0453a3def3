//! SQLite store for pure join-table associations.
//!
//! # Invariants
//! - A batch is applied under one savepoint: all rows or none.
//! - Repeated `(owner, related)` pairs are ignored, dangling keys fault.

use crate::model::association::{AssociationKind, AssociationRecord};
use crate::model::EntityId;
use crate::repo::records::parse_uuid;
use crate::repo::sqlite_store::ensure_table;
use crate::repo::{AssociationStore, CancelSignal, StoreResult};
use rusqlite::{params, Connection};

const BATCH_SAVEPOINT: &str = "association_batch";

/// Join-table store bound to one [`AssociationKind`].
pub struct SqliteAssociationStore<'conn> {
    conn: &'conn Connection,
    kind: AssociationKind,
}

impl<'conn> SqliteAssociationStore<'conn> {
    pub fn try_new(conn: &'conn Connection, kind: AssociationKind) -> StoreResult<Self> {
        ensure_table(conn, kind.table())?;
        Ok(Self { conn, kind })
    }

    /// Related ids linked to `owner`, ordered by creation.
    pub fn related_ids(&self, owner: EntityId) -> StoreResult<Vec<EntityId>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {related} FROM {table} WHERE {owner} = ?1 ORDER BY created ASC, id ASC;",
            related = self.kind.related_column(),
            table = self.kind.table(),
            owner = self.kind.owner_column(),
        ))?;
        let mut rows = stmt.query([owner.to_string()])?;
        let location = format!("{}.{}", self.kind.table(), self.kind.related_column());
        let mut ids = Vec::new();
        while let Some(row) = rows.next()? {
            let value: String = row.get(0)?;
            ids.push(parse_uuid(&value, &location)?);
        }
        Ok(ids)
    }

    fn insert_rows(&self, records: &[AssociationRecord]) -> StoreResult<()> {
        let sql = format!(
            "INSERT OR IGNORE INTO {} (id, created, updated, {}, {}) VALUES (?1, ?2, NULL, ?3, ?4);",
            self.kind.table(),
            self.kind.owner_column(),
            self.kind.related_column(),
        );
        let mut stmt = self.conn.prepare(&sql)?;
        for record in records {
            stmt.execute(params![
                record.id.to_string(),
                record.created,
                record.owner_fk.to_string(),
                record.related_fk.to_string(),
            ])?;
        }
        Ok(())
    }
}

impl AssociationStore for SqliteAssociationStore<'_> {
    fn insert_many(&self, records: &[AssociationRecord], cancel: &CancelSignal) -> StoreResult<()> {
        cancel.check()?;
        if records.is_empty() {
            return Ok(());
        }

        self.conn
            .execute_batch(&format!("SAVEPOINT {BATCH_SAVEPOINT};"))?;
        match self.insert_rows(records) {
            Ok(()) => {
                self.conn
                    .execute_batch(&format!("RELEASE SAVEPOINT {BATCH_SAVEPOINT};"))?;
                Ok(())
            }
            Err(err) => {
                // Rolling back to the savepoint keeps any outer transaction alive.
                self.conn.execute_batch(&format!(
                    "ROLLBACK TO SAVEPOINT {BATCH_SAVEPOINT}; RELEASE SAVEPOINT {BATCH_SAVEPOINT};"
                ))?;
                Err(err)
            }
        }
    }
}
