//! Port use-cases.
//!
//! # Invariants
//! - The port insert is deferred; slipway links run inside the same open
//!   transaction and one shared commit flushes both.
//! - Any failure after the deferred insert rolls the transaction back, so
//!   no port is left stored without its slipways.

use crate::logging::EventLog;
use crate::model::port::{Port, PortDto};
use crate::repo::{CancelSignal, ChildLinkStore, CommitMode, Store, UnitOfWork};
use crate::service::association::AssociationWriter;
use crate::service::codes::{UNEXPECTED_FAULT, VALIDATION_FAILED, WRITE_DECLINED};
use crate::service::outcome::{fault, Outcome};
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};
use log::warn;

pub const PORT_POLICY: WritePolicy = WritePolicy {
    kind: "Port",
    bad_request_reason: "Value null or incorrect format",
    validation_code: Some(VALIDATION_FAILED),
    declined_code: WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for PortDto {
    type Entity = Port;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_entity(&self) -> Port {
        PortDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &Port) {
        self.meta = persisted.meta.clone();
    }
}

pub struct PortService<'a> {
    ports: &'a dyn Store<Port>,
    slipways: &'a dyn ChildLinkStore,
    unit_of_work: &'a dyn UnitOfWork,
    log: &'a dyn EventLog,
}

impl<'a> PortService<'a> {
    pub fn new(
        ports: &'a dyn Store<Port>,
        slipways: &'a dyn ChildLinkStore,
        unit_of_work: &'a dyn UnitOfWork,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            ports,
            slipways,
            unit_of_work,
            log,
        }
    }

    /// Creates one port and moves the listed slipways under it.
    pub fn post(&self, request: Option<PortDto>, cancel: &CancelSignal) -> Outcome<PortDto> {
        let written = match PrimaryWriter::new(self.ports, self.log, &PORT_POLICY).write(
            request,
            cancel,
            CommitMode::Deferred,
        ) {
            Outcome::Success(written) => written,
            Outcome::BadRequest(reason) => return Outcome::BadRequest(reason),
            other => {
                self.discard_pending();
                return other.map(|written| written.response);
            }
        };

        let links = AssociationWriter::child_link(self.slipways, "Port", "Slipway", self.log);
        let linked = links
            .write_batch(written.id, written.response.slipways.as_deref(), cancel)
            .and_then(|_| self.unit_of_work.commit());

        match linked {
            Ok(()) => Outcome::Success(written.response),
            Err(err) => {
                self.discard_pending();
                fault(
                    self.log,
                    UNEXPECTED_FAULT,
                    format!(
                        "Unexpected error occurred while inserting Port '{}'",
                        written.response.name
                    ),
                    err,
                )
            }
        }
    }

    fn discard_pending(&self) {
        if let Err(err) = self.unit_of_work.rollback() {
            warn!("event=port_rollback module=service status=error error={err}");
        }
    }
}
