//! Shared world and step definitions for the procurement behaviour suites.
//!
//! Scenarios drive the lifecycle services through the same [`HttpState`]
//! bundle the HTTP adapter uses, wired over the in-memory store. Each step
//! blocks on a private Tokio runtime so steps stay synchronous.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use pagination::PageRequest;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, then, when};
use tenders::domain::ports::{
    AuthorReviewsRequest, EditBidRequest, EditTenderRequest, RollbackBidRequest,
    RollbackTenderRequest, SubmitDecisionRequest, SubmitFeedbackRequest, TenderStatusRequest,
    UpdateTenderStatusRequest,
};
use tenders::domain::{
    AuthorType, Bid, BidDecision, BidEdit, BidStatus, Employee, EmployeeId, Error, ErrorCode,
    NewBid, NewTender, Organization, OrganizationId, Review, Tender, TenderEdit, TenderStatus,
};
use tenders::inbound::http::state::{HttpState, HttpStateRepositories};
use tenders::outbound::memory::InMemoryProcurementStore;
use tokio::runtime::Runtime;
use uuid::Uuid;

const DESCRIPTION: &str = "Repave Main St";

/// Wrapper for non-Clone types to enable storage in `Slot`.
#[derive(Clone)]
pub(crate) struct RuntimeHandle(Arc<Runtime>);

/// Store plus the names scenarios use for its rows.
#[derive(Clone, Default)]
pub(crate) struct Directory {
    store: Arc<InMemoryProcurementStore>,
    organizations: HashMap<String, OrganizationId>,
    employees: HashMap<String, EmployeeId>,
}

impl Directory {
    fn organization(&self, name: &str) -> OrganizationId {
        *self
            .organizations
            .get(name)
            .unwrap_or_else(|| panic!("organization {name} is not seeded"))
    }

    fn employee(&self, username: &str) -> EmployeeId {
        *self
            .employees
            .get(username)
            .unwrap_or_else(|| panic!("employee {username} is not seeded"))
    }

    fn add_employee(&mut self, username: &str) -> EmployeeId {
        if let Some(id) = self.employees.get(username) {
            return *id;
        }
        let id = EmployeeId::random();
        self.store.insert_employee(Employee {
            id,
            username: username.to_owned(),
        });
        self.employees.insert(username.to_owned(), id);
        id
    }
}

/// Scenario state: the seeded directory, the services and the last outcome.
#[derive(Default, ScenarioState)]
pub(crate) struct ProcurementWorld {
    runtime: Slot<RuntimeHandle>,
    directory: Slot<Directory>,
    state: Slot<HttpState>,
    tender: Slot<Tender>,
    tender_owner: Slot<String>,
    bid: Slot<Bid>,
    reviews: Slot<Vec<Review>>,
    outcome: Slot<Result<(), Error>>,
}

impl ProcurementWorld {
    fn directory(&self) -> Directory {
        if let Some(directory) = self.directory.get() {
            return directory;
        }
        let directory = Directory::default();
        let store = Arc::clone(&directory.store);
        self.state.set(HttpState::from_repositories(
            HttpStateRepositories {
                tenders: Arc::clone(&store),
                bids: Arc::clone(&store),
                reviews: Arc::clone(&store),
                identity: store,
            },
            Arc::new(DefaultClock),
        ));
        self.runtime
            .set(RuntimeHandle(Arc::new(Runtime::new().expect("create runtime"))));
        self.directory.set(directory.clone());
        directory
    }

    fn services(&self) -> HttpState {
        self.state.get().expect("directory seeded before services are used")
    }

    fn block_on<T>(&self, future: impl std::future::Future<Output = T>) -> T {
        let runtime = self.runtime.get().expect("runtime");
        runtime.0.block_on(future)
    }

    fn current_tender(&self) -> Tender {
        self.tender.get().expect("a tender was created")
    }

    fn current_bid(&self) -> Bid {
        self.bid.get().expect("a bid was placed")
    }

    fn record_tender(&self, result: Result<Tender, Error>) {
        match result {
            Ok(tender) => {
                self.tender.set(tender);
                self.outcome.set(Ok(()));
            }
            Err(err) => {
                self.outcome.set(Err(err));
            }
        }
    }

    fn record_bid(&self, result: Result<Bid, Error>) {
        match result {
            Ok(bid) => {
                self.bid.set(bid);
                self.outcome.set(Ok(()));
            }
            Err(err) => {
                self.outcome.set(Err(err));
            }
        }
    }

    fn create_tender(&self, username: &str, name: String, service_type: &str, organization: &str) {
        let request = NewTender {
            name,
            description: DESCRIPTION.to_owned(),
            service_type: service_type.to_owned(),
            organization_id: self.directory().organization(organization).to_string(),
            creator_username: username.to_owned(),
        };
        let services = self.services();
        let result = self.block_on(async move { services.tenders.create(request).await });
        if result.is_ok() {
            self.tender_owner.set(username.to_owned());
        }
        self.record_tender(result);
    }

    fn update_tender_status(&self, username: &str, status: &str) {
        let request = UpdateTenderStatusRequest {
            tender_id: self.current_tender().id(),
            status: status.parse::<TenderStatus>().expect("tender status label"),
            username: username.to_owned(),
        };
        let services = self.services();
        let result = self.block_on(async move { services.tenders.update_status(request).await });
        self.record_tender(result);
    }

    fn place_bid(&self, author_type: AuthorType, author_id: Uuid) {
        let request = NewBid {
            name: "Asphalt crew".to_owned(),
            description: "Two week turnaround".to_owned(),
            tender_id: self.current_tender().id().to_string(),
            author_type: author_type.as_str().to_owned(),
            author_id: author_id.to_string(),
        };
        let services = self.services();
        let result = self.block_on(async move { services.bids.create(request).await });
        self.record_bid(result);
    }

    fn submit_feedback(&self, username: &str, feedback: String) {
        let bid = self.current_bid();
        let request = SubmitFeedbackRequest {
            bid_id: bid.id(),
            username: username.to_owned(),
            feedback,
        };
        let services = self.services();
        let result = self.block_on(async move { services.reviews.submit_feedback(request).await });
        self.outcome.set(result.map(|_| ()));
    }

    fn expect_success(&self, step: &str) {
        if let Some(Err(err)) = self.outcome.get() {
            panic!("{step} failed: {err}");
        }
    }
}

#[fixture]
pub(crate) fn world() -> ProcurementWorld {
    ProcurementWorld::default()
}

fn error_code(label: &str) -> ErrorCode {
    match label {
        "ValidationError" => ErrorCode::ValidationError,
        "InvalidParameter" => ErrorCode::InvalidParameter,
        "UserNotExists" => ErrorCode::UserNotExists,
        "UnauthorizedAccess" => ErrorCode::UnauthorizedAccess,
        "TenderNotExists" => ErrorCode::TenderNotExists,
        "BidNotExists" => ErrorCode::BidNotExists,
        "VersionNotExists" => ErrorCode::VersionNotExists,
        "ElementNotExists" => ErrorCode::ElementNotExists,
        "BidForTenderNotExists" => ErrorCode::BidForTenderNotExists,
        other => panic!("unknown error kind: {other}"),
    }
}

fn list(raw: &str) -> Vec<&str> {
    raw.split(',').map(str::trim).collect()
}

// -----------------------------------------------------------------------------
// Given Steps
// -----------------------------------------------------------------------------

#[given("an organization {organization} run by {username}")]
fn an_organization_run_by(world: &ProcurementWorld, organization: String, username: String) {
    let mut directory = world.directory();
    let employee = directory.add_employee(&username);
    let id = OrganizationId::random();
    directory.store.insert_organization(Organization {
        id,
        name: organization.clone(),
    });
    directory.store.assign_responsible(id, employee);
    directory.organizations.insert(organization, id);
    world.directory.set(directory);
}

#[given("an unaffiliated employee {username}")]
fn an_unaffiliated_employee(world: &ProcurementWorld, username: String) {
    let mut directory = world.directory();
    directory.add_employee(&username);
    world.directory.set(directory);
}

#[given("{username} has created a {service_type} tender for {organization}")]
fn has_created_a_tender(
    world: &ProcurementWorld,
    username: String,
    service_type: String,
    organization: String,
) {
    world.create_tender(&username, "Road repair".to_owned(), &service_type, &organization);
    world.expect_success("tender creation");
}

#[given("{username} has published the tender")]
fn has_published_the_tender(world: &ProcurementWorld, username: String) {
    world.update_tender_status(&username, TenderStatus::Published.as_str());
    world.expect_success("publication");
}

#[given("{organization} has placed a bid on the tender")]
fn organization_has_placed_a_bid(world: &ProcurementWorld, organization: String) {
    let id = world.directory().organization(&organization);
    world.place_bid(AuthorType::Organization, *id.as_uuid());
    world.expect_success("bid placement");
}

#[given("{username} has placed a personal bid on the tender")]
fn employee_has_placed_a_bid(world: &ProcurementWorld, username: String) {
    let id = world.directory().employee(&username);
    world.place_bid(AuthorType::User, *id.as_uuid());
    world.expect_success("bid placement");
}

#[given("{username} has left the feedback {feedback} on the bid")]
fn has_left_feedback(world: &ProcurementWorld, username: String, feedback: String) {
    world.submit_feedback(&username, feedback);
    world.expect_success("feedback");
}

// -----------------------------------------------------------------------------
// When Steps
// -----------------------------------------------------------------------------

#[when("{username} creates a {service_type} tender named {name} for {organization}")]
fn creates_a_named_tender(
    world: &ProcurementWorld,
    username: String,
    service_type: String,
    name: String,
    organization: String,
) {
    world.create_tender(&username, name, &service_type, &organization);
}

#[when(
    "{username} creates a tender with a {length} character name and service type {service_type} for {organization}"
)]
fn creates_an_oversized_tender(
    world: &ProcurementWorld,
    username: String,
    length: usize,
    service_type: String,
    organization: String,
) {
    world.create_tender(&username, "n".repeat(length), &service_type, &organization);
}

#[when("{username} sets the tender status to {status}")]
fn sets_the_tender_status(world: &ProcurementWorld, username: String, status: String) {
    world.update_tender_status(&username, &status);
}

#[when("{username} renames the tender to {name}")]
fn renames_the_tender(world: &ProcurementWorld, username: String, name: String) {
    let request = EditTenderRequest {
        tender_id: world.current_tender().id(),
        username,
        edit: TenderEdit {
            name: Some(name),
            ..TenderEdit::default()
        },
    };
    let services = world.services();
    let result = world.block_on(async move { services.tenders.edit(request).await });
    world.record_tender(result);
}

#[when("{username} rolls the tender back to version {version}")]
fn rolls_the_tender_back(world: &ProcurementWorld, username: String, version: u32) {
    let request = RollbackTenderRequest {
        tender_id: world.current_tender().id(),
        version,
        username,
    };
    let services = world.services();
    let result = world.block_on(async move { services.tenders.rollback(request).await });
    world.record_tender(result);
}

#[when("{organization} places a bid on the tender")]
fn organization_places_a_bid(world: &ProcurementWorld, organization: String) {
    let id = world.directory().organization(&organization);
    world.place_bid(AuthorType::Organization, *id.as_uuid());
}

#[when("{username} renames the bid to {name}")]
fn renames_the_bid(world: &ProcurementWorld, username: String, name: String) {
    let request = EditBidRequest {
        bid_id: world.current_bid().id(),
        username,
        edit: BidEdit {
            name: Some(name),
            ..BidEdit::default()
        },
    };
    let services = world.services();
    let result = world.block_on(async move { services.bids.edit(request).await });
    world.record_bid(result);
}

#[when("{username} rolls the bid back to version {version}")]
fn rolls_the_bid_back(world: &ProcurementWorld, username: String, version: u32) {
    let request = RollbackBidRequest {
        bid_id: world.current_bid().id(),
        version,
        username,
    };
    let services = world.services();
    let result = world.block_on(async move { services.bids.rollback(request).await });
    world.record_bid(result);
}

#[when("{username} submits the decision {decision}")]
fn submits_the_decision(world: &ProcurementWorld, username: String, decision: String) {
    let request = SubmitDecisionRequest {
        bid_id: world.current_bid().id(),
        decision: decision.parse::<BidDecision>().expect("decision label"),
        username,
    };
    let services = world.services();
    let result = world.block_on(async move { services.bids.submit_decision(request).await });
    world.record_bid(result);
}

#[when("{username} leaves the feedback {feedback} on the bid")]
fn leaves_feedback(world: &ProcurementWorld, username: String, feedback: String) {
    world.submit_feedback(&username, feedback);
}

#[when("{username} leaves blank feedback on the bid")]
fn leaves_blank_feedback(world: &ProcurementWorld, username: String) {
    world.submit_feedback(&username, "   ".to_owned());
}

#[when("{requester} lists the reviews of {author} for the tender")]
fn lists_the_reviews(world: &ProcurementWorld, requester: String, author: String) {
    let request = AuthorReviewsRequest {
        tender_id: world.current_tender().id(),
        author_username: author,
        requester_username: requester,
        page: PageRequest::default(),
    };
    let services = world.services();
    let result = world
        .block_on(async move { services.reviews_query.list_by_bid_author(request).await });
    match result {
        Ok(reviews) => {
            world.reviews.set(reviews);
            world.outcome.set(Ok(()));
        }
        Err(err) => {
            world.outcome.set(Err(err));
        }
    }
}

// -----------------------------------------------------------------------------
// Then Steps
// -----------------------------------------------------------------------------

#[then("the request fails with {kind}")]
fn the_request_fails_with(world: &ProcurementWorld, kind: String) {
    match world.outcome.get() {
        Some(Err(err)) => assert_eq!(err.code(), error_code(&kind), "unexpected error: {err}"),
        Some(Ok(())) => panic!("expected {kind}, but the request succeeded"),
        None => panic!("no request was made"),
    }
}

#[then("the rejected fields are {fields}")]
fn the_rejected_fields_are(world: &ProcurementWorld, fields: String) {
    let Some(Err(err)) = world.outcome.get() else {
        panic!("expected a validation failure");
    };
    let mut actual = err.invalid_fields();
    actual.sort_unstable();
    let mut expected = list(&fields);
    expected.sort_unstable();
    assert_eq!(actual, expected);
}

#[then("the tender is at version {version} with status {status}")]
fn the_tender_is_at_version(world: &ProcurementWorld, version: u32, status: String) {
    world.expect_success("the last request");
    let tender = world.current_tender();
    assert_eq!(tender.version(), version);
    assert_eq!(tender.status().as_str(), status);
}

#[then("the tender belongs to {organization}")]
fn the_tender_belongs_to(world: &ProcurementWorld, organization: String) {
    let expected = world.directory().organization(&organization);
    assert_eq!(world.current_tender().organization_id(), expected);
}

#[then("the tender is named {name}")]
fn the_tender_is_named(world: &ProcurementWorld, name: String) {
    let tender = world.current_tender();
    assert_eq!(tender.name(), name);
    assert_eq!(tender.description(), DESCRIPTION);
}

#[then("the tender history has versions {versions}")]
fn the_tender_history_has_versions(world: &ProcurementWorld, versions: String) {
    let expected: Vec<u32> = list(&versions)
        .into_iter()
        .map(|version| version.parse().expect("numeric version"))
        .collect();
    let stored = world
        .directory()
        .store
        .tender_versions(world.current_tender().id());
    assert_eq!(stored, expected);
}

#[then("the current tender status is {status}")]
fn the_current_tender_status_is(world: &ProcurementWorld, status: String) {
    let request = TenderStatusRequest {
        tender_id: world.current_tender().id(),
        username: world.tender_owner.get(),
    };
    let services = world.services();
    let actual = world
        .block_on(async move { services.tenders_query.status(request).await })
        .expect("status lookup");
    assert_eq!(actual.as_str(), status);
}

#[then("the bid is at version {version} with status {status}")]
fn the_bid_is_at_version(world: &ProcurementWorld, version: u32, status: String) {
    world.expect_success("the last request");
    let bid = world.current_bid();
    assert_eq!(bid.version(), version);
    assert_eq!(bid.status(), status.parse::<BidStatus>().expect("bid status label"));
}

#[then("the bid references tender version {version}")]
fn the_bid_references_tender_version(world: &ProcurementWorld, version: u32) {
    let bid = world.current_bid();
    assert_eq!(bid.tender_id(), world.current_tender().id());
    assert_eq!(bid.tender_version(), version);
}

#[then("the bid is named {name}")]
fn the_bid_is_named(world: &ProcurementWorld, name: String) {
    assert_eq!(world.current_bid().name(), name);
}

#[then("the listed reviews read {texts}")]
fn the_listed_reviews_read(world: &ProcurementWorld, texts: String) {
    world.expect_success("the review listing");
    let reviews = world.reviews.get().expect("reviews were listed");
    let actual: Vec<&str> = reviews
        .iter()
        .map(|review| review.description.as_str())
        .collect();
    assert_eq!(actual, list(&texts));
}
