//! Process-local procurement store.
//!
//! Implements every driven port over one mutex-guarded state so the service
//! can run without PostgreSQL and so integration tests exercise the real
//! services end to end. Listing order and conflict semantics match the
//! Diesel adapters.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use pagination::PageRequest;
use uuid::Uuid;

use crate::domain::ports::{
    BidRepository, BidRepositoryError, IdentityRepository, IdentityRepositoryError,
    ReviewRepository, ReviewRepositoryError, TenderRepository, TenderRepositoryError,
};
use crate::domain::{
    Bid, BidAuthor, BidId, Employee, EmployeeId, Organization, OrganizationId, Review,
    ServiceType, Tender, TenderId, TenderStatus,
};

#[derive(Debug, Default)]
struct ProcurementState {
    employees: HashMap<EmployeeId, Employee>,
    organizations: HashMap<OrganizationId, Organization>,
    responsible: HashSet<(OrganizationId, EmployeeId)>,
    tenders: BTreeMap<(TenderId, u32), Tender>,
    bids: HashMap<BidId, Bid>,
    bid_history: BTreeMap<(BidId, u32), Bid>,
    reviews: Vec<Review>,
}

impl ProcurementState {
    fn employee_id(&self, username: &str) -> Option<EmployeeId> {
        self.employees
            .values()
            .find(|employee| employee.username == username)
            .map(|employee| employee.id)
    }

    fn current_tenders(&self) -> impl Iterator<Item = &Tender> {
        let mut latest: HashMap<TenderId, &Tender> = HashMap::new();
        for ((tender_id, _), tender) in &self.tenders {
            latest.insert(*tender_id, tender);
        }
        latest.into_values()
    }

    fn current_tender(&self, tender_id: TenderId) -> Option<&Tender> {
        self.tenders
            .range((tender_id, 0)..=(tender_id, u32::MAX))
            .next_back()
            .map(|(_, tender)| tender)
    }
}

fn page_sorted_by_name<T, F>(mut items: Vec<T>, page: PageRequest, key: F) -> Vec<T>
where
    F: Fn(&T) -> (String, Uuid),
{
    items.sort_by_cached_key(key);
    page.apply(items).collect()
}

/// In-memory implementation of the tender, bid, review and identity ports.
///
/// # Examples
/// ```
/// use tenders::domain::{Employee, EmployeeId};
/// use tenders::outbound::memory::InMemoryProcurementStore;
///
/// let store = InMemoryProcurementStore::new();
/// store.insert_employee(Employee {
///     id: EmployeeId::random(),
///     username: "alice".to_owned(),
/// });
/// ```
#[derive(Debug, Default)]
pub struct InMemoryProcurementStore {
    state: Mutex<ProcurementState>,
}

impl InMemoryProcurementStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, ProcurementState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an employee.
    pub fn insert_employee(&self, employee: Employee) {
        self.state().employees.insert(employee.id, employee);
    }

    /// Register an organization.
    pub fn insert_organization(&self, organization: Organization) {
        self.state()
            .organizations
            .insert(organization.id, organization);
    }

    /// Make `employee_id` responsible for `organization_id`.
    pub fn assign_responsible(&self, organization_id: OrganizationId, employee_id: EmployeeId) {
        self.state()
            .responsible
            .insert((organization_id, employee_id));
    }

    /// Every stored version number of a tender, ascending.
    #[must_use]
    pub fn tender_versions(&self, tender_id: TenderId) -> Vec<u32> {
        self.state()
            .tenders
            .range((tender_id, 0)..=(tender_id, u32::MAX))
            .map(|((_, version), _)| *version)
            .collect()
    }
}

#[async_trait]
impl IdentityRepository for InMemoryProcurementStore {
    async fn find_employee_id_by_username(
        &self,
        username: &str,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError> {
        Ok(self.state().employee_id(username))
    }

    async fn find_employee_id_if_responsible(
        &self,
        username: &str,
        organization_id: OrganizationId,
    ) -> Result<Option<EmployeeId>, IdentityRepositoryError> {
        let state = self.state();
        Ok(state
            .employee_id(username)
            .filter(|employee_id| state.responsible.contains(&(organization_id, *employee_id))))
    }

    async fn find_employee_by_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Employee>, IdentityRepositoryError> {
        Ok(self.state().employees.get(&employee_id).cloned())
    }

    async fn find_organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<Organization>, IdentityRepositoryError> {
        Ok(self.state().organizations.get(&organization_id).cloned())
    }

    async fn find_organization_by_employee_id(
        &self,
        employee_id: EmployeeId,
    ) -> Result<Option<Organization>, IdentityRepositoryError> {
        let state = self.state();
        let mut memberships: Vec<OrganizationId> = state
            .responsible
            .iter()
            .filter(|(_, member)| *member == employee_id)
            .map(|(organization_id, _)| *organization_id)
            .collect();
        memberships.sort();
        Ok(memberships
            .first()
            .and_then(|organization_id| state.organizations.get(organization_id))
            .cloned())
    }
}

#[async_trait]
impl TenderRepository for InMemoryProcurementStore {
    async fn append_version(&self, tender: &Tender) -> Result<(), TenderRepositoryError> {
        let mut state = self.state();
        let key = (tender.id(), tender.version());
        if state.tenders.contains_key(&key) {
            return Err(TenderRepositoryError::version_conflict(tender.version()));
        }
        state.tenders.insert(key, tender.clone());
        Ok(())
    }

    async fn find_current(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        Ok(self.state().current_tender(tender_id).cloned())
    }

    async fn find_version(
        &self,
        tender_id: TenderId,
        version: u32,
    ) -> Result<Option<Tender>, TenderRepositoryError> {
        Ok(self.state().tenders.get(&(tender_id, version)).cloned())
    }

    async fn latest_version(
        &self,
        tender_id: TenderId,
    ) -> Result<Option<u32>, TenderRepositoryError> {
        Ok(self
            .state()
            .current_tender(tender_id)
            .map(Tender::version))
    }

    async fn list_published(
        &self,
        service_types: &[ServiceType],
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let state = self.state();
        let matching = state
            .current_tenders()
            .filter(|tender| tender.status() == TenderStatus::Published)
            .filter(|tender| {
                service_types.is_empty() || service_types.contains(&tender.service_type())
            })
            .cloned()
            .collect();
        Ok(page_sorted_by_name(matching, page, |tender: &Tender| {
            (tender.name().to_owned(), *tender.id().as_uuid())
        }))
    }

    async fn list_by_organization(
        &self,
        organization_id: OrganizationId,
        page: PageRequest,
    ) -> Result<Vec<Tender>, TenderRepositoryError> {
        let state = self.state();
        let owned = state
            .current_tenders()
            .filter(|tender| tender.organization_id() == organization_id)
            .cloned()
            .collect();
        Ok(page_sorted_by_name(owned, page, |tender: &Tender| {
            (tender.name().to_owned(), *tender.id().as_uuid())
        }))
    }
}

fn bid_sort_key(bid: &Bid) -> (String, Uuid) {
    (bid.name().to_owned(), *bid.id().as_uuid())
}

#[async_trait]
impl BidRepository for InMemoryProcurementStore {
    async fn insert(&self, bid: &Bid) -> Result<(), BidRepositoryError> {
        let mut state = self.state();
        if state.bids.contains_key(&bid.id()) {
            return Err(BidRepositoryError::version_conflict(bid.version()));
        }
        state.bids.insert(bid.id(), bid.clone());
        Ok(())
    }

    async fn find_current(&self, bid_id: BidId) -> Result<Option<Bid>, BidRepositoryError> {
        Ok(self.state().bids.get(&bid_id).cloned())
    }

    async fn find_historical_version(
        &self,
        bid_id: BidId,
        version: u32,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        let state = self.state();
        let archived = state.bid_history.get(&(bid_id, version)).cloned();
        Ok(archived.or_else(|| {
            state
                .bids
                .get(&bid_id)
                .filter(|current| current.version() == version)
                .cloned()
        }))
    }

    async fn list_by_author(
        &self,
        employee_id: EmployeeId,
        organization_id: Option<OrganizationId>,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let state = self.state();
        let authored = state
            .bids
            .values()
            .filter(|bid| match bid.author() {
                BidAuthor::User(author) => author == employee_id,
                BidAuthor::Organization(author) => Some(author) == organization_id,
            })
            .cloned()
            .collect();
        Ok(page_sorted_by_name(authored, page, bid_sort_key))
    }

    async fn list_by_tender(
        &self,
        tender_id: TenderId,
        page: PageRequest,
    ) -> Result<Vec<Bid>, BidRepositoryError> {
        let state = self.state();
        let answering = state
            .bids
            .values()
            .filter(|bid| bid.tender_id() == tender_id)
            .cloned()
            .collect();
        Ok(page_sorted_by_name(answering, page, bid_sort_key))
    }

    async fn find_by_author_and_tender(
        &self,
        author_id: Uuid,
        tender_id: TenderId,
    ) -> Result<Option<Bid>, BidRepositoryError> {
        Ok(self
            .state()
            .bids
            .values()
            .find(|bid| bid.author().id() == author_id && bid.tender_id() == tender_id)
            .cloned())
    }

    async fn record_revision(&self, previous: &Bid, next: &Bid) -> Result<(), BidRepositoryError> {
        let mut state = self.state();
        let stored_version = state.bids.get(&previous.id()).map(Bid::version);
        if stored_version != Some(previous.version()) {
            return Err(BidRepositoryError::version_conflict(previous.version()));
        }
        state
            .bid_history
            .insert((previous.id(), previous.version()), previous.clone());
        state.bids.insert(next.id(), next.clone());
        Ok(())
    }
}

#[async_trait]
impl ReviewRepository for InMemoryProcurementStore {
    async fn insert(&self, review: &Review) -> Result<(), ReviewRepositoryError> {
        self.state().reviews.push(review.clone());
        Ok(())
    }

    async fn list_by_bid_author(
        &self,
        author_id: Uuid,
        page: PageRequest,
    ) -> Result<Vec<Review>, ReviewRepositoryError> {
        let state = self.state();
        let mut reviews: Vec<Review> = state
            .reviews
            .iter()
            .filter(|review| {
                state
                    .bids
                    .get(&review.bid_id)
                    .is_some_and(|bid| bid.author().id() == author_id)
            })
            .cloned()
            .collect();
        reviews.sort_by(|left, right| {
            left.description
                .cmp(&right.description)
                .then_with(|| left.id.cmp(&right.id))
        });
        Ok(page.apply(reviews).collect())
    }
}
