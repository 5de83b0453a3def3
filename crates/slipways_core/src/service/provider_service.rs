//! Service provider use-cases.
//!
//! A provider and its manufacturer links are written in two steps that
//! commit independently. When the link batch faults the provider stays
//! stored without links; the fault message names its id so the orphan can
//! be found from the logs.

use crate::logging::EventLog;
use crate::model::association::AssociationKind;
use crate::model::provider::{ServiceProvider, ServiceProviderDto};
use crate::repo::{AssociationStore, CancelSignal, CommitMode, Store};
use crate::service::association::AssociationWriter;
use crate::service::codes::{UNEXPECTED_FAULT, WRITE_DECLINED};
use crate::service::outcome::{fault, Outcome};
use crate::service::writer::{PrimaryWriter, WritePolicy, WriteRequest};

pub const SERVICE_PROVIDER_POLICY: WritePolicy = WritePolicy {
    kind: "Service",
    bad_request_reason: "Service has not the correct format or is null",
    validation_code: None,
    declined_code: WRITE_DECLINED,
    fault_code: UNEXPECTED_FAULT,
};

impl WriteRequest for ServiceProviderDto {
    type Entity = ServiceProvider;

    fn display_name(&self) -> &str {
        &self.name
    }

    fn to_entity(&self) -> ServiceProvider {
        ServiceProviderDto::to_entity(self)
    }

    fn accept(&mut self, persisted: &ServiceProvider) {
        self.meta = persisted.meta.clone();
    }
}

pub struct ServiceProviderService<'a> {
    providers: &'a dyn Store<ServiceProvider>,
    manufacturer_links: &'a dyn AssociationStore,
    log: &'a dyn EventLog,
}

impl<'a> ServiceProviderService<'a> {
    pub fn new(
        providers: &'a dyn Store<ServiceProvider>,
        manufacturer_links: &'a dyn AssociationStore,
        log: &'a dyn EventLog,
    ) -> Self {
        Self {
            providers,
            manufacturer_links,
            log,
        }
    }

    pub fn list(&self, cancel: &CancelSignal) -> Outcome<Vec<ServiceProvider>> {
        match self.providers.select_all(cancel) {
            Ok(providers) => Outcome::Success(providers),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                "Unexpected error occurred while GET Services".to_string(),
                err,
            ),
        }
    }

    /// Creates one provider, then links the listed manufacturers.
    pub fn post(
        &self,
        request: Option<ServiceProviderDto>,
        cancel: &CancelSignal,
    ) -> Outcome<ServiceProviderDto> {
        let written = match PrimaryWriter::new(self.providers, self.log, &SERVICE_PROVIDER_POLICY)
            .write(request, cancel, CommitMode::Immediate)
        {
            Outcome::Success(written) => written,
            other => return other.map(|written| written.response),
        };

        let links = AssociationWriter::join_table(
            self.manufacturer_links,
            AssociationKind::ServiceManufacturer,
            self.log,
        );
        match links.write_batch(written.id, written.response.manufacturers.as_deref(), cancel) {
            Ok(_) => Outcome::Success(written.response),
            Err(err) => fault(
                self.log,
                UNEXPECTED_FAULT,
                format!(
                    "Unexpected error occurred while adding manufacturers to Service '{}'; service '{}' stored without manufacturers",
                    written.response.name, written.id
                ),
                err,
            ),
        }
    }
}
