#![allow(dead_code)]

use slipways_core::model::association::AssociationRecord;
use slipways_core::model::{now_epoch_ms, Entity, EntityId, RecordMeta};
use slipways_core::{
    AssociationStore, CancelSignal, ChildLinkStore, CommitMode, EventLog, Store, StoreError,
    StoreResult, StoreWrite, UnitOfWork,
};
use std::cell::{Cell, RefCell};
use std::error::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warn,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: Level,
    pub code: Option<u32>,
    pub message: String,
    pub cause: Option<String>,
}

/// Captures every event instead of writing it anywhere.
#[derive(Debug, Default)]
pub struct RecordingLog {
    entries: RefCell<Vec<LogEntry>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.borrow().clone()
    }

    pub fn at(&self, level: Level) -> Vec<LogEntry> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.level == level)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl EventLog for RecordingLog {
    fn warn(&self, code: u32, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level: Level::Warn,
            code: Some(code),
            message: message.to_string(),
            cause: None,
        });
    }

    fn error(&self, code: u32, message: &str, cause: Option<&(dyn Error + 'static)>) {
        self.entries.borrow_mut().push(LogEntry {
            level: Level::Error,
            code: Some(code),
            message: message.to_string(),
            cause: cause.map(|err| err.to_string()),
        });
    }

    fn info(&self, message: &str) {
        self.entries.borrow_mut().push(LogEntry {
            level: Level::Info,
            code: None,
            message: message.to_string(),
            cause: None,
        });
    }
}

/// Scripted answer of a fake store write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    Persist,
    Decline,
    Fault,
}

fn scripted_fault() -> StoreError {
    StoreError::InvalidData("scripted fault".to_string())
}

/// In-memory [`Store`] with scripted write behavior.
pub struct FakeStore<E> {
    pub behavior: Cell<Behavior>,
    pub rows: RefCell<Vec<E>>,
    pub inserts: RefCell<Vec<(E, CommitMode)>>,
    pub calls: Cell<usize>,
}

impl<E: Entity> FakeStore<E> {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior: Cell::new(behavior),
            rows: RefCell::new(Vec::new()),
            inserts: RefCell::new(Vec::new()),
            calls: Cell::new(0),
        }
    }

    pub fn with_rows(behavior: Behavior, rows: Vec<E>) -> Self {
        let store = Self::new(behavior);
        *store.rows.borrow_mut() = rows;
        store
    }

    fn enter(&self, cancel: &CancelSignal) -> StoreResult<Behavior> {
        self.calls.set(self.calls.get() + 1);
        cancel.check()?;
        match self.behavior.get() {
            Behavior::Fault => Err(scripted_fault()),
            behavior => Ok(behavior),
        }
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.rows
            .borrow()
            .iter()
            .position(|row| row.id() == Some(id))
    }
}

impl<E: Entity> Store<E> for FakeStore<E> {
    fn insert(
        &self,
        entity: &E,
        cancel: &CancelSignal,
        commit: CommitMode,
    ) -> StoreResult<StoreWrite<E>> {
        self.inserts.borrow_mut().push((entity.clone(), commit));
        if self.enter(cancel)? == Behavior::Decline {
            return Ok(StoreWrite::Declined("scripted decline".to_string()));
        }

        let mut stored = entity.clone();
        *stored.meta_mut() = RecordMeta::persisted(Uuid::new_v4(), now_epoch_ms(), None);
        self.rows.borrow_mut().push(stored.clone());
        Ok(StoreWrite::Persisted(stored))
    }

    fn select_by_id(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<Option<E>> {
        self.enter(cancel)?;
        Ok(self.position(id).map(|index| self.rows.borrow()[index].clone()))
    }

    fn select_all(&self, cancel: &CancelSignal) -> StoreResult<Vec<E>> {
        self.enter(cancel)?;
        Ok(self.rows.borrow().clone())
    }

    fn update(&self, entity: &E, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>> {
        if self.enter(cancel)? == Behavior::Decline {
            return Ok(StoreWrite::Declined("scripted decline".to_string()));
        }
        let Some(index) = entity.id().and_then(|id| self.position(id)) else {
            return Ok(StoreWrite::Declined("no such row".to_string()));
        };

        let mut rows = self.rows.borrow_mut();
        let mut stored = entity.clone();
        stored.meta_mut().created = rows[index].meta().created;
        stored.meta_mut().updated = Some(now_epoch_ms());
        rows[index] = stored.clone();
        Ok(StoreWrite::Persisted(stored))
    }

    fn delete(&self, id: EntityId, cancel: &CancelSignal) -> StoreResult<StoreWrite<E>> {
        if self.enter(cancel)? == Behavior::Decline {
            return Ok(StoreWrite::Declined("scripted decline".to_string()));
        }
        match self.position(id) {
            Some(index) => Ok(StoreWrite::Persisted(self.rows.borrow_mut().remove(index))),
            None => Ok(StoreWrite::Declined("no such row".to_string())),
        }
    }
}

/// Records join batches; faults when scripted to.
pub struct FakeAssociationStore {
    pub fail: bool,
    pub batches: RefCell<Vec<Vec<AssociationRecord>>>,
}

impl FakeAssociationStore {
    pub fn new() -> Self {
        Self {
            fail: false,
            batches: RefCell::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            batches: RefCell::new(Vec::new()),
        }
    }
}

impl AssociationStore for FakeAssociationStore {
    fn insert_many(&self, records: &[AssociationRecord], cancel: &CancelSignal) -> StoreResult<()> {
        self.batches.borrow_mut().push(records.to_vec());
        cancel.check()?;
        if self.fail {
            return Err(scripted_fault());
        }
        Ok(())
    }
}

/// Records `(child, parent)` links; faults on one scripted child.
#[derive(Default)]
pub struct FakeChildLinks {
    pub fail_on: Option<EntityId>,
    pub links: RefCell<Vec<(EntityId, EntityId)>>,
}

impl ChildLinkStore for FakeChildLinks {
    fn link_to_parent(
        &self,
        child: EntityId,
        parent: EntityId,
        cancel: &CancelSignal,
    ) -> StoreResult<()> {
        self.links.borrow_mut().push((child, parent));
        cancel.check()?;
        if self.fail_on == Some(child) {
            return Err(StoreError::NotFound(child));
        }
        Ok(())
    }
}

/// Counts commits and rollbacks.
#[derive(Default)]
pub struct FakeUnitOfWork {
    pub fail_commit: bool,
    pub commits: Cell<usize>,
    pub rollbacks: Cell<usize>,
}

impl UnitOfWork for FakeUnitOfWork {
    fn commit(&self) -> StoreResult<()> {
        self.commits.set(self.commits.get() + 1);
        if self.fail_commit {
            return Err(scripted_fault());
        }
        Ok(())
    }

    fn rollback(&self) -> StoreResult<()> {
        self.rollbacks.set(self.rollbacks.get() + 1);
        Ok(())
    }
}
