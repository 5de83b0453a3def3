//! Slipway use-cases.
//!
//! Slipway extras are join rows written after the slipway itself has been
//! committed, with the same orphan window as service providers.

use crate::logging::EventLog;
use crate::model::association::AssociationKind;
use crate::model::slipway::{Slipway, SlipwayDto};
use crate::model::EntityId;
use crate::repo::{AssociationStore, CancelSignal, CommitMode, Store};
use crate::service::association::AssociationWriter;
use crate::service::codes::{UNEXPECTED_FAULT, VALIDATION_FAILED, WRITE_DECLINED};
use crate::service::outcome::{fault, Outcome};
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};

pub const SLIPWAY_POLICY: WritePolicy = WritePolicy {
    kind: "Slipway",
    bad_request_reason: "Value null or incorrect format",
    validation_code: Some(VALIDATION_FAILED),
    declined_code: WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for SlipwayDto {
    type Entity = Slipway;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_entity(&self) -> Slipway {
        SlipwayDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &Slipway) {
        self.meta = persisted.meta.clone();
    }
}

pub struct SlipwayService<'a> {
    slipways: &'a dyn Store<Slipway>,
    extra_links: &'a dyn AssociationStore,
    log: &'a dyn EventLog,
}

impl<'a> SlipwayService<'a> {
    pub fn new(
        slipways: &'a dyn Store<Slipway>,
        extra_links: &'a dyn AssociationStore,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            slipways,
            extra_links,
            log,
        }
    }

    pub fn get(&self, id: EntityId, cancel: &CancelSignal) -> Outcome<Option<Slipway>> {
        match self.slipways.select_by_id(id, cancel) {
            Ok(slipway) => Outcome::Success(slipway),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!("Unexpected error occurred while GET Slipway '{id}'"),
                err,
            ),
        }
    }

    /// Creates one slipway, then links the listed extras.
    pub fn post(&self, request: Option<SlipwayDto>, cancel: &CancelSignal) -> Outcome<SlipwayDto> {
        let written = match PrimaryWriter::new(self.slipways, self.log, &SLIPWAY_POLICY).write(
            request,
            cancel,
            CommitMode::Immediate,
        ) {
            Outcome::Success(written) => written,
            other => return other.map(|written| written.response),
        };

        let links =
            AssociationWriter::join_table(self.extra_links, AssociationKind::SlipwayExtra, self.log);
        match links.write_batch(written.id, written.response.extras.as_deref(), cancel) {
            Ok(_) => Outcome::Success(written.response),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!(
                    "Unexpected error occurred while adding extras to Slipway '{}'; slipway '{}' stored without extras",
                    written.response.name, written.id
                ),
                err,
            ),
        }
    }
}
