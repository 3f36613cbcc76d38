//! Test helpers for inbound HTTP components.
//!
//! Handlers run against the real lifecycle services over a seeded
//! [`InMemoryProcurementStore`]: `alice` is responsible for Acme, `bob` for
//! Globex, and `carol` belongs to no organization.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use mockable::DefaultClock;

use crate::domain::{Employee, EmployeeId, Organization, OrganizationId};
use crate::inbound::http::state::{HttpState, HttpStateRepositories};
use crate::inbound::http::{api_scope, json_config};
use crate::outbound::memory::InMemoryProcurementStore;

/// Seeded store and the identifiers tests refer to.
pub struct TestWorld {
    pub store: Arc<InMemoryProcurementStore>,
    pub acme: OrganizationId,
    pub globex: OrganizationId,
    pub alice: EmployeeId,
    pub bob: EmployeeId,
    pub carol: EmployeeId,
}

impl TestWorld {
    /// Build the seeded directory.
    pub fn seeded() -> Self {
        let store = Arc::new(InMemoryProcurementStore::new());
        let acme = OrganizationId::random();
        let globex = OrganizationId::random();
        let alice = EmployeeId::random();
        let bob = EmployeeId::random();
        let carol = EmployeeId::random();

        for (id, name) in [(acme, "Acme"), (globex, "Globex")] {
            store.insert_organization(Organization {
                id,
                name: name.to_owned(),
            });
        }
        for (id, username) in [(alice, "alice"), (bob, "bob"), (carol, "carol")] {
            store.insert_employee(Employee {
                id,
                username: username.to_owned(),
            });
        }
        store.assign_responsible(acme, alice);
        store.assign_responsible(globex, bob);

        Self {
            store,
            acme,
            globex,
            alice,
            bob,
            carol,
        }
    }

    /// Handler state wired over the seeded store.
    pub fn http_state(&self) -> HttpState {
        HttpState::from_repositories(
            HttpStateRepositories {
                tenders: Arc::clone(&self.store),
                bids: Arc::clone(&self.store),
                reviews: Arc::clone(&self.store),
                identity: Arc::clone(&self.store),
            },
            Arc::new(DefaultClock),
        )
    }

    /// Application exposing every `/api` route over the seeded store.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(web::Data::new(self.http_state()))
            .app_data(json_config())
            .service(api_scope())
    }
}
