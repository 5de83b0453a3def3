//! Primary-entity writer: validate, map, insert, classify.
//!
//! # Invariants
//! - Absent or blank-named requests never reach the store.
//! - At most one store insert and at most one log entry per call.
//! - A success always carries the store-assigned id; nothing is retried.

use crate::logging::EventLog;
use crate::model::{is_blank, Entity, EntityId};
use crate::repo::{CancelSignal, CommitMode, Store, StoreWrite};
use crate::service::outcome::{declined, fault, rejected, Outcome};

/// Per-pipeline reasons and event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WritePolicy {
    /// Entity label used in log messages.
    pub kind: &'static str,
    /// Body of the `BadRequest` response.
    pub bad_request_reason: &'static str,
    /// Warning code for rejected requests; `None` rejects silently.
    pub validation_code: Option<u32>,
    pub declined_code: u32,
    pub fault_code: u32,
}

/// Request object that maps onto one persistable entity.
pub trait WriteRequest {
    type Entity: Entity;

    /// Mandatory display field (name or longname).
    fn display_name(&self) -> &str;
    fn to_entity(&self) -> Self::Entity;
    /// Copies store-assigned id and timestamps onto the request.
    fn accept(&mut self, persisted: &Self::Entity);
}

/// Successful primary write.
#[derive(Debug, Clone, PartialEq)]
pub struct Written<R> {
    pub id: EntityId,
    /// Request echoed back with server-assigned fields.
    pub response: R,
}

/// Writes one primary entity through its store.
pub struct PrimaryWriter<'a, E> {
    store: &'a dyn Store<E>,
    log: &'a dyn EventLog,
    policy: &'a WritePolicy,
}

impl<'a, E: Entity> PrimaryWriter<'a, E> {
    pub fn new(store: &'a dyn Store<E>, log: &'a dyn EventLog, policy: &'a WritePolicy) -> Self {
        Self { store, log, policy }
    }

    /// Validates `request` and inserts its entity.
    ///
    /// `commit` is forwarded to the store; pipelines that still have to
    /// link children pass [`CommitMode::Deferred`] and commit afterwards.
    pub fn write<R>(
        &self,
        request: Option<R>,
        cancel: &CancelSignal,
        commit: CommitMode,
    ) -> Outcome<Written<R>>
    where
        R: WriteRequest<Entity = E>,
    {
        let mut request = match request {
            Some(request) if !is_blank(request.display_name()) => request,
            _ => return self.reject(),
        };

        let entity = request.to_entity();
        match self.store.insert(&entity, cancel, commit) {
            Ok(StoreWrite::Persisted(persisted)) => match persisted.id() {
                Some(id) => {
                    request.accept(&persisted);
                    Outcome::Success(Written {
                        id,
                        response: request,
                    })
                }
                None => declined(
                    self.log,
                    self.policy.declined_code,
                    format!(
                        "Error occurred while inserting {} '{}': store returned no id",
                        self.policy.kind,
                        request.display_name()
                    ),
                ),
            },
            Ok(StoreWrite::Declined(reason)) => declined(
                self.log,
                self.policy.declined_code,
                format!(
                    "Error occurred while inserting {} '{}': {reason}",
                    self.policy.kind,
                    request.display_name()
                ),
            ),
            Err(err) => fault(
                self.log,
                self.policy.fault_code,
                format!(
                    "Unexpected error occurred while inserting {} '{}'",
                    self.policy.kind,
                    request.display_name()
                ),
                err,
            ),
        }
    }

    fn reject<T>(&self) -> Outcome<T> {
        rejected(
            self.log,
            self.policy.validation_code,
            &format!(
                "Error occurred while POST {} - value null or incorrect format",
                self.policy.kind
            ),
            self.policy.bad_request_reason,
        )
    }
}
