//! Bid aggregate, its author union, and partial edits.
//!
//! Bids follow the same append-only versioning contract as tenders. The
//! current row is replaced on each mutation while the previous row is kept in
//! a history store, so any past version stays addressable by number.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::identity::{EmployeeId, OrganizationId, uuid_identifier};
use super::labels::labelled_enum;
use super::tender::TenderId;
use super::validation::{DESCRIPTION_MAX_CHARS, FieldViolations, NAME_MAX_CHARS, provided};
use super::Error;

uuid_identifier!(
    /// Stable business key shared by every version of a bid.
    BidId
);

labelled_enum! {
    /// Lifecycle state of a bid.
    BidStatus as "bid status" {
        /// Draft visible to its author.
        Created,
        /// Submitted for consideration.
        Published,
        /// Withdrawn by its author.
        Canceled,
    }
}

labelled_enum! {
    /// Decision taken by the tender owner on a bid.
    BidDecision as "decision" {
        /// The bid wins; the tender is closed.
        Approved,
        /// The bid is declined.
        Rejected,
    }
}

labelled_enum! {
    /// Discriminant of [`BidAuthor`].
    AuthorType as "author type" {
        /// An individual employee.
        User,
        /// An organization.
        Organization,
    }
}

/// Party credited with submitting a bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BidAuthor {
    /// Bid authored by an employee.
    User(EmployeeId),
    /// Bid authored on behalf of an organization.
    Organization(OrganizationId),
}

impl BidAuthor {
    /// Combine a discriminant with a raw identifier.
    #[must_use]
    pub fn new(author_type: AuthorType, id: Uuid) -> Self {
        match author_type {
            AuthorType::User => Self::User(EmployeeId::from_uuid(id)),
            AuthorType::Organization => Self::Organization(OrganizationId::from_uuid(id)),
        }
    }

    /// Discriminant of the author.
    #[must_use]
    pub fn author_type(&self) -> AuthorType {
        match self {
            Self::User(_) => AuthorType::User,
            Self::Organization(_) => AuthorType::Organization,
        }
    }

    /// Raw identifier of the author.
    #[must_use]
    pub fn id(&self) -> Uuid {
        match self {
            Self::User(id) => *id.as_uuid(),
            Self::Organization(id) => *id.as_uuid(),
        }
    }
}

/// Plain field set used to rehydrate a [`Bid`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidDraft {
    /// Business key.
    pub id: BidId,
    /// Bid name.
    pub name: String,
    /// Bid description.
    pub description: String,
    /// Lifecycle state.
    pub status: BidStatus,
    /// Tender the bid answers.
    pub tender_id: TenderId,
    /// Tender version current when the bid was created.
    pub tender_version: u32,
    /// Bid author.
    pub author: BidAuthor,
    /// Version number, starting at 1.
    pub version: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// One immutable version of a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    id: BidId,
    name: String,
    description: String,
    status: BidStatus,
    tender_id: TenderId,
    tender_version: u32,
    author: BidAuthor,
    version: u32,
    created_at: DateTime<Utc>,
}

impl From<BidDraft> for Bid {
    fn from(draft: BidDraft) -> Self {
        let BidDraft {
            id,
            name,
            description,
            status,
            tender_id,
            tender_version,
            author,
            version,
            created_at,
        } = draft;
        Self {
            id,
            name,
            description,
            status,
            tender_id,
            tender_version,
            author,
            version,
            created_at,
        }
    }
}

impl Bid {
    /// Business key.
    #[must_use]
    pub fn id(&self) -> BidId {
        self.id
    }

    /// Bid name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bid description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Lifecycle state.
    #[must_use]
    pub fn status(&self) -> BidStatus {
        self.status
    }

    /// Tender the bid answers.
    #[must_use]
    pub fn tender_id(&self) -> TenderId {
        self.tender_id
    }

    /// Tender version snapshotted at creation.
    #[must_use]
    pub fn tender_version(&self) -> u32 {
        self.tender_version
    }

    /// Bid author.
    #[must_use]
    pub fn author(&self) -> BidAuthor {
        self.author
    }

    /// Version number of this row.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Next version with `status` applied.
    #[must_use]
    pub fn with_status(&self, status: BidStatus) -> Self {
        Self {
            status,
            version: self.version.saturating_add(1),
            ..self.clone()
        }
    }

    /// Next version with the provided fields replaced.
    #[must_use]
    pub fn edited(&self, patch: &BidPatch) -> Self {
        Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            version: self.version.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this historical row stacked on top of `current_version`.
    #[must_use]
    pub fn restored_onto(&self, current_version: u32) -> Self {
        Self {
            version: current_version.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Request to create a bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBid {
    /// Bid name.
    pub name: String,
    /// Bid description.
    pub description: String,
    /// Raw identifier of the tender the bid answers.
    pub tender_id: String,
    /// Raw author type label.
    pub author_type: String,
    /// Raw employee or organization identifier, per `author_type`.
    pub author_id: String,
}

/// Validated content of a new bid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidContent {
    /// Bid name.
    pub name: String,
    /// Bid description.
    pub description: String,
    /// Tender the bid answers.
    pub tender_id: TenderId,
    /// Bid author.
    pub author: BidAuthor,
}

impl NewBid {
    /// Validate every field, reporting all violations together.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming each invalid field.
    pub fn validate(&self) -> Result<BidContent, Error> {
        let mut violations = FieldViolations::new();
        violations.check_text("name", &self.name, NAME_MAX_CHARS);
        violations.check_text("description", &self.description, DESCRIPTION_MAX_CHARS);
        let tender_id = violations.check_parse::<TenderId>("tenderId", &self.tender_id);
        let author_type = violations.check_parse::<AuthorType>("authorType", &self.author_type);
        let author_id = violations.check_parse::<Uuid>("authorId", self.author_id.trim());
        violations.into_result()?;

        let (Some(tender_id), Some(author_type), Some(author_id)) =
            (tender_id, author_type, author_id)
        else {
            return Err(Error::validation(["tenderId", "authorType", "authorId"]));
        };
        Ok(BidContent {
            name: self.name.clone(),
            description: self.description.clone(),
            tender_id,
            author: BidAuthor::new(author_type, author_id),
        })
    }
}

/// Partial edit of a bid; empty or absent fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidEdit {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Validated partial edit of a bid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BidPatch {
    name: Option<String>,
    description: Option<String>,
}

impl BidEdit {
    /// Validate only the provided fields.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming each invalid provided field.
    pub fn validate(&self) -> Result<BidPatch, Error> {
        let mut violations = FieldViolations::new();
        let name = provided(self.name.as_ref());
        let description = provided(self.description.as_ref());
        if let Some(value) = name {
            violations.check_text("name", value, NAME_MAX_CHARS);
        }
        if let Some(value) = description {
            violations.check_text("description", value, DESCRIPTION_MAX_CHARS);
        }
        violations.into_result()?;

        Ok(BidPatch {
            name: name.map(str::to_owned),
            description: description.map(str::to_owned),
        })
    }
}
