//! Shared authorization policy for tender, bid, and review operations.
//!
//! Organization checks resolve "is this username responsible for that
//! organization" with one combined lookup. When it fails, a second bare
//! username lookup decides between [`ErrorCode::UserNotExists`] and
//! [`ErrorCode::UnauthorizedAccess`].
//!
//! Bid authorship for an organization uses the same single-organization
//! resolution as the "my bids" listing, so an employee acts for exactly the
//! organization their listings show.
//!
//! [`ErrorCode::UserNotExists`]: super::ErrorCode::UserNotExists
//! [`ErrorCode::UnauthorizedAccess`]: super::ErrorCode::UnauthorizedAccess

use std::sync::Arc;

use tracing::debug;

use super::ports::IdentityRepository;
use super::repository_errors::map_identity_error;
use super::{BidAuthor, EmployeeId, Error, OrganizationId};

/// Authorization guard over the identity directory.
pub struct AuthorizationGuard<I> {
    identity: Arc<I>,
}

impl<I> Clone for AuthorizationGuard<I> {
    fn clone(&self) -> Self {
        Self {
            identity: Arc::clone(&self.identity),
        }
    }
}

impl<I> AuthorizationGuard<I>
where
    I: IdentityRepository,
{
    /// Create a guard reading from `identity`.
    pub fn new(identity: Arc<I>) -> Self {
        Self { identity }
    }

    /// Resolve a username to an employee.
    ///
    /// # Errors
    /// [`Error::user_not_exists`] when no employee has that username.
    pub async fn resolve_employee(&self, username: &str) -> Result<EmployeeId, Error> {
        self.identity
            .find_employee_id_by_username(username)
            .await
            .map_err(map_identity_error)?
            .ok_or_else(Error::user_not_exists)
    }

    /// Confirm `username` is responsible for `organization_id`.
    ///
    /// # Errors
    /// [`Error::user_not_exists`] when the username is unknown, otherwise
    /// [`Error::unauthorized_access`] when the employee lacks responsibility.
    pub async fn authorize_for_organization(
        &self,
        username: &str,
        organization_id: OrganizationId,
    ) -> Result<EmployeeId, Error> {
        let responsible = self
            .identity
            .find_employee_id_if_responsible(username, organization_id)
            .await
            .map_err(map_identity_error)?;
        if let Some(employee_id) = responsible {
            return Ok(employee_id);
        }

        self.resolve_employee(username).await?;
        debug!(%organization_id, "employee is not responsible for organization");
        Err(Error::unauthorized_access())
    }

    /// Confirm `username` acts as the bid's author.
    ///
    /// A user author must be the employee; an organization author must be the
    /// organization the employee resolves to.
    ///
    /// # Errors
    /// [`Error::user_not_exists`] when the username is unknown, otherwise
    /// [`Error::unauthorized_access`] when the employee is not the author.
    pub async fn authorize_bid_author(
        &self,
        username: &str,
        author: BidAuthor,
    ) -> Result<EmployeeId, Error> {
        let employee_id = self.resolve_employee(username).await?;
        let is_author = match author {
            BidAuthor::User(author_id) => author_id == employee_id,
            BidAuthor::Organization(organization_id) => self
                .identity
                .find_organization_by_employee_id(employee_id)
                .await
                .map_err(map_identity_error)?
                .is_some_and(|organization| organization.id == organization_id),
        };

        if is_author {
            Ok(employee_id)
        } else {
            debug!(author_id = %author.id(), "employee is not the bid author");
            Err(Error::unauthorized_access())
        }
    }
}
