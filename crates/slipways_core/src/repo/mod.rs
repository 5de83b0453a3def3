//! Store contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the persistence boundary the write pipelines talk to.
//! - Isolate SQL details from pipeline orchestration.
//!
//! # Invariants
//! - A store never returns "nothing" to mean failure: writes answer with
//!   [`StoreWrite::Persisted`] or [`StoreWrite::Declined`], faults are `Err`.
//! - Every store call checks its [`CancelSignal`] before touching SQLite.
//! - Ids and `created` stamps of primary entities are assigned by the store.

use crate::db::DbError;
use crate::model::association::AssociationRecord;
use crate::model::EntityId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub mod association_repo;
pub mod records;
pub mod sqlite_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Faults raised by store operations.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// The request's cancel signal fired before the call ran.
    Cancelled,
    NotFound(EntityId),
    MissingRequiredTable(&'static str),
    /// Persisted data cannot be converted into a valid record.
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Cancelled => write!(f, "store call cancelled"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "store requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Non-faulting result of a store write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreWrite<E> {
    /// The write took effect; carries the record as stored.
    Persisted(E),
    /// The store completed without applying the write.
    Declined(String),
}

impl<E> StoreWrite<E> {
    pub fn persisted(self) -> Option<E> {
        match self {
            Self::Persisted(entity) => Some(entity),
            Self::Declined(_) => None,
        }
    }
}

/// Whether an insert flushes immediately or waits for [`UnitOfWork::commit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitMode {
    Immediate,
    Deferred,
}

/// Cooperative cancellation flag threaded from the top of a request.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    cancelled: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails with [`StoreError::Cancelled`] once the signal fired.
    pub fn check(&self) -> StoreResult<()> {
        if self.is_cancelled() {
            Err(StoreError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Store for one primary entity kind.
pub trait Store<E> {
    /// Assigns id and `created`, then persists the entity.
    fn insert(&self, entity: &E, cancel: &CancelSignal, commit: CommitMode)
        -> StoreResult<StoreWrite<E>>;
    fn select_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>>;
    fn select_all(&self, cancel: &CancelSignal) -> StoreResult<Vec<E>>;
    /// Replaces the stored row and stamps `updated`.
    fn update(&self, entity: &E, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>>;
    /// Removes the row and answers with its last stored state.
    fn delete(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>>;
}

/// Store for pure join-table records.
pub trait AssociationStore {
    /// Inserts the whole batch or nothing.
    fn insert_many(&self, records: &[AssociationRecord], cancel: &CancelSignal)
        -> StoreResult<()>;
}

/// Store able to point a child's own foreign key at a parent.
pub trait ChildLinkStore {
    /// Fails with [`StoreError::NotFound`] when the child does not exist.
    fn link_to_parent(
        &self,
        child: EntityId,
        parent: EntityId,
        cancel: &CancelSignal,
    ) -> StoreResult<()>;
}

/// Explicit flush of writes made with [`CommitMode::Deferred`].
pub trait UnitOfWork {
    fn commit(&self) -> StoreResult<()>;
    /// Discards pending writes. No-op without an open transaction.
    fn rollback(&self) -> StoreResult<()>;
}
