//! Association batch writer.
//!
//! One capability, two strategies chosen by relationship shape:
//! - join table: build one [`AssociationRecord`] per related id and insert
//!   them as a single batch;
//! - foreign key on child: point each child's own key at the parent, one
//!   store call per child.
//!
//! # Invariants
//! - Runs only after the owner was persisted; `owner` is its store id.
//! - A related id listed more than once is associated once; the first
//!   occurrence wins.
//! - One info entry is logged per associated item.
//! - A fault aborts the batch and propagates; there is no per-item outcome.

use crate::logging::EventLog;
use crate::model::association::{AssociationKind, AssociationRecord};
use crate::model::{EntityId, RelatedRef};
use crate::repo::{AssociationStore, CancelSignal, ChildLinkStore, StoreResult};
use std::collections::HashSet;

enum Strategy<'a> {
    BatchInsert {
        store: &'a dyn AssociationStore,
        kind: AssociationKind,
    },
    LinkEach {
        store: &'a dyn ChildLinkStore,
        parent_label: &'static str,
        child_label: &'static str,
    },
}

/// Associates related items with one freshly written owner.
pub struct AssociationWriter<'a> {
    strategy: Strategy<'a>,
    log: &'a dyn EventLog,
}

impl<'a> AssociationWriter<'a> {
    /// Pure join-table strategy.
    pub fn join_table(
        store: &'a dyn AssociationStore,
        kind: AssociationKind,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            strategy: Strategy::BatchInsert { store, kind },
            log,
        }
    }

    /// Foreign-key-on-child strategy.
    pub fn child_link(
        store: &'a dyn ChildLinkStore,
        parent_label: &'static str,
        child_label: &'static str,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            strategy: Strategy::LinkEach {
                store,
                parent_label,
                child_label,
            },
            log,
        }
    }

    /// Writes the batch and returns how many distinct items were associated.
    ///
    /// An absent or empty `related` list is a no-op.
    pub fn write_batch(
        &self,
        owner: EntityId,
        related: Option<&[RelatedRef]>,
        cancel: &CancelSignal,
    ) -> StoreResult<usize> {
        let related = match related {
            Some(items) if !items.is_empty() => distinct(items),
            _ => return Ok(0),
        };

        match &self.strategy {
            Strategy::BatchInsert { store, kind } => {
                let records = related
                    .iter()
                    .map(|item| AssociationRecord::new(owner, item.id))
                    .collect::<Vec<_>>();
                store.insert_many(&records, cancel)?;

                let (owner_label, related_label) = kind.labels();
                for item in &related {
                    self.log.info(&format!(
                        "Added {related_label} {} to {owner_label} '{owner}'",
                        describe(item)
                    ));
                }
            }
            Strategy::LinkEach {
                store,
                parent_label,
                child_label,
            } => {
                for item in &related {
                    store.link_to_parent(item.id, owner, cancel)?;
                    self.log.info(&format!(
                        "Added {child_label} {} to {parent_label} '{owner}'",
                        describe(item)
                    ));
                }
            }
        }

        Ok(related.len())
    }
}

fn distinct(items: &[RelatedRef]) -> Vec<&RelatedRef> {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().filter(|item| seen.insert(item.id)).collect()
}

fn describe(item: &RelatedRef) -> String {
    match item.name.as_deref() {
        Some(name) => format!("'{name}' ({})", item.id),
        None => format!("'{}'", item.id),
    }
}
