//! Tender lifecycle service.
//!
//! Implements the tender driving ports over an append-only tender store and
//! the organization authorization guard. Existence checks always precede
//! authorization so callers learn "does not exist" before "not allowed".

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::authorization::AuthorizationGuard;
use super::ports::{
    EditTenderRequest, EmployeeTendersRequest, IdentityRepository, PublishedTendersRequest,
    RollbackTenderRequest, TenderCommand, TenderQuery, TenderRepository, TenderStatusRequest,
    UpdateTenderStatusRequest,
};
use super::repository_errors::{map_identity_error, map_tender_error};
use super::{Error, NewTender, Tender, TenderDraft, TenderId, TenderStatus};

/// Tender service implementing [`TenderCommand`] and [`TenderQuery`].
pub struct TenderService<T, I> {
    tenders: Arc<T>,
    identity: Arc<I>,
    guard: AuthorizationGuard<I>,
    clock: Arc<dyn Clock>,
}

impl<T, I> Clone for TenderService<T, I> {
    fn clone(&self) -> Self {
        Self {
            tenders: Arc::clone(&self.tenders),
            identity: Arc::clone(&self.identity),
            guard: self.guard.clone(),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, I> TenderService<T, I>
where
    T: TenderRepository,
    I: IdentityRepository,
{
    /// Create a service over the tender store and identity directory.
    pub fn new(tenders: Arc<T>, identity: Arc<I>, clock: Arc<dyn Clock>) -> Self {
        Self {
            tenders,
            guard: AuthorizationGuard::new(Arc::clone(&identity)),
            identity,
            clock,
        }
    }

    async fn current(&self, tender_id: TenderId) -> Result<Tender, Error> {
        self.tenders
            .find_current(tender_id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(Error::tender_not_exists)
    }

    async fn append(&self, tender: Tender) -> Result<Tender, Error> {
        self.tenders
            .append_version(&tender)
            .await
            .map_err(map_tender_error)?;
        info!(
            tender_id = %tender.id(),
            version = tender.version(),
            status = %tender.status(),
            "tender version stored"
        );
        Ok(tender)
    }
}

#[async_trait]
impl<T, I> TenderCommand for TenderService<T, I>
where
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn create(&self, request: NewTender) -> Result<Tender, Error> {
        let content = request.validate()?;
        let creator_id = self
            .guard
            .authorize_for_organization(&request.creator_username, content.organization_id)
            .await?;

        let tender = Tender::from(TenderDraft {
            id: TenderId::random(),
            name: content.name,
            description: content.description,
            service_type: content.service_type,
            status: TenderStatus::Created,
            version: 1,
            organization_id: content.organization_id,
            creator_id,
            created_at: self.clock.utc(),
        });
        self.append(tender).await
    }

    async fn update_status(&self, request: UpdateTenderStatusRequest) -> Result<Tender, Error> {
        let current = self.current(request.tender_id).await?;
        self.guard
            .authorize_for_organization(&request.username, current.organization_id())
            .await?;
        self.append(current.with_status(request.status)).await
    }

    async fn edit(&self, request: EditTenderRequest) -> Result<Tender, Error> {
        let current = self.current(request.tender_id).await?;
        self.guard
            .authorize_for_organization(&request.username, current.organization_id())
            .await?;
        let patch = request.edit.validate()?;
        self.append(current.edited(&patch)).await
    }

    async fn rollback(&self, request: RollbackTenderRequest) -> Result<Tender, Error> {
        let historical = self
            .tenders
            .find_version(request.tender_id, request.version)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(Error::tender_not_exists)?;
        self.guard
            .authorize_for_organization(&request.username, historical.organization_id())
            .await?;

        let latest = self
            .tenders
            .latest_version(request.tender_id)
            .await
            .map_err(map_tender_error)?
            .ok_or_else(Error::tender_not_exists)?;
        self.append(historical.restored_onto(latest)).await
    }
}

#[async_trait]
impl<T, I> TenderQuery for TenderService<T, I>
where
    T: TenderRepository,
    I: IdentityRepository,
{
    async fn list_published(
        &self,
        request: PublishedTendersRequest,
    ) -> Result<Vec<Tender>, Error> {
        self.tenders
            .list_published(&request.service_types, request.page)
            .await
            .map_err(map_tender_error)
    }

    async fn list_for_employee(
        &self,
        request: EmployeeTendersRequest,
    ) -> Result<Vec<Tender>, Error> {
        let employee_id = self.guard.resolve_employee(&request.username).await?;
        let organization = self
            .identity
            .find_organization_by_employee_id(employee_id)
            .await
            .map_err(map_identity_error)?;
        let Some(organization) = organization else {
            return Ok(Vec::new());
        };

        self.tenders
            .list_by_organization(organization.id, request.page)
            .await
            .map_err(map_tender_error)
    }

    async fn status(&self, request: TenderStatusRequest) -> Result<TenderStatus, Error> {
        let current = self.current(request.tender_id).await?;
        match request.username.as_deref().filter(|name| !name.is_empty()) {
            None if current.status() == TenderStatus::Published => Ok(current.status()),
            None => Err(Error::unauthorized_access()),
            Some(username) => {
                self.guard
                    .authorize_for_organization(username, current.organization_id())
                    .await?;
                Ok(current.status())
            }
        }
    }
}

#[cfg(test)]
#[path = "tender_service_tests.rs"]
mod tests;
