//! Tender aggregate and its append-only version history.
//!
//! A tender is keyed by a stable [`TenderId`]; every mutation produces a new
//! [`Tender`] value carrying the next version number rather than changing an
//! existing one. Persistence adapters store each value as its own row.

use chrono::{DateTime, Utc};

use super::identity::{EmployeeId, OrganizationId, uuid_identifier};
use super::labels::labelled_enum;
use super::validation::{DESCRIPTION_MAX_CHARS, FieldViolations, NAME_MAX_CHARS, provided};
use super::Error;

uuid_identifier!(
    /// Stable business key shared by every version of a tender.
    TenderId
);

labelled_enum! {
    /// Category of work a tender procures.
    ServiceType as "service type" {
        /// Construction work.
        Construction,
        /// Delivery of goods.
        Delivery,
        /// Manufacturing.
        Manufacture,
    }
}

labelled_enum! {
    /// Publication state of a tender.
    ///
    /// Transitions are unrestricted: any status may follow any other.
    TenderStatus as "tender status" {
        /// Draft visible only to the owning organization.
        Created,
        /// Publicly listed.
        Published,
        /// Closed, typically after a bid was approved.
        Closed,
    }
}

/// Plain field set used to rehydrate a [`Tender`] from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderDraft {
    /// Business key.
    pub id: TenderId,
    /// Tender name.
    pub name: String,
    /// Tender description.
    pub description: String,
    /// Procured service category.
    pub service_type: ServiceType,
    /// Publication state.
    pub status: TenderStatus,
    /// Version number, starting at 1.
    pub version: u32,
    /// Owning organization.
    pub organization_id: OrganizationId,
    /// Employee who created the tender.
    pub creator_id: EmployeeId,
    /// Creation timestamp carried across versions.
    pub created_at: DateTime<Utc>,
}

/// One immutable version of a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tender {
    id: TenderId,
    name: String,
    description: String,
    service_type: ServiceType,
    status: TenderStatus,
    version: u32,
    organization_id: OrganizationId,
    creator_id: EmployeeId,
    created_at: DateTime<Utc>,
}

impl From<TenderDraft> for Tender {
    fn from(draft: TenderDraft) -> Self {
        let TenderDraft {
            id,
            name,
            description,
            service_type,
            status,
            version,
            organization_id,
            creator_id,
            created_at,
        } = draft;
        Self {
            id,
            name,
            description,
            service_type,
            status,
            version,
            organization_id,
            creator_id,
            created_at,
        }
    }
}

impl Tender {
    /// Business key.
    #[must_use]
    pub fn id(&self) -> TenderId {
        self.id
    }

    /// Tender name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tender description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Procured service category.
    #[must_use]
    pub fn service_type(&self) -> ServiceType {
        self.service_type
    }

    /// Publication state.
    #[must_use]
    pub fn status(&self) -> TenderStatus {
        self.status
    }

    /// Version number of this row.
    #[must_use]
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Owning organization.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }

    /// Employee who created the tender.
    #[must_use]
    pub fn creator_id(&self) -> EmployeeId {
        self.creator_id
    }

    /// Creation timestamp.
    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Next version with `status` applied.
    #[must_use]
    pub fn with_status(&self, status: TenderStatus) -> Self {
        Self {
            status,
            version: self.version.saturating_add(1),
            ..self.clone()
        }
    }

    /// Next version with the provided fields replaced.
    #[must_use]
    pub fn edited(&self, patch: &TenderPatch) -> Self {
        Self {
            name: patch.name.clone().unwrap_or_else(|| self.name.clone()),
            description: patch
                .description
                .clone()
                .unwrap_or_else(|| self.description.clone()),
            service_type: patch.service_type.unwrap_or(self.service_type),
            version: self.version.saturating_add(1),
            ..self.clone()
        }
    }

    /// Copy of this historical row stacked on top of `latest_version`.
    #[must_use]
    pub fn restored_onto(&self, latest_version: u32) -> Self {
        Self {
            version: latest_version.saturating_add(1),
            ..self.clone()
        }
    }
}

/// Request to create a tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTender {
    /// Tender name.
    pub name: String,
    /// Tender description.
    pub description: String,
    /// Raw service type label.
    pub service_type: String,
    /// Raw identifier of the organization that will own the tender.
    pub organization_id: String,
    /// Username of the creating employee.
    pub creator_username: String,
}

/// Validated content of a new tender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenderContent {
    /// Tender name.
    pub name: String,
    /// Tender description.
    pub description: String,
    /// Procured service category.
    pub service_type: ServiceType,
    /// Owning organization.
    pub organization_id: OrganizationId,
}

impl NewTender {
    /// Validate every field, reporting all violations together.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming each invalid field.
    pub fn validate(&self) -> Result<TenderContent, Error> {
        let mut violations = FieldViolations::new();
        violations.check_text("name", &self.name, NAME_MAX_CHARS);
        violations.check_text("description", &self.description, DESCRIPTION_MAX_CHARS);
        let service_type = violations.check_parse::<ServiceType>("serviceType", &self.service_type);
        let organization_id =
            violations.check_parse::<OrganizationId>("organizationId", &self.organization_id);
        violations.into_result()?;

        let (Some(service_type), Some(organization_id)) = (service_type, organization_id) else {
            return Err(Error::validation(["serviceType", "organizationId"]));
        };
        Ok(TenderContent {
            name: self.name.clone(),
            description: self.description.clone(),
            service_type,
            organization_id,
        })
    }
}

/// Partial edit of a tender; empty or absent fields keep their prior value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderEdit {
    /// Replacement name.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement raw service type label.
    pub service_type: Option<String>,
}

/// Validated partial edit of a tender.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TenderPatch {
    name: Option<String>,
    description: Option<String>,
    service_type: Option<ServiceType>,
}

impl TenderEdit {
    /// Validate only the provided fields.
    ///
    /// # Errors
    /// Returns [`Error::validation`] naming each invalid provided field.
    pub fn validate(&self) -> Result<TenderPatch, Error> {
        let mut violations = FieldViolations::new();
        let name = provided(self.name.as_ref());
        let description = provided(self.description.as_ref());
        if let Some(value) = name {
            violations.check_text("name", value, NAME_MAX_CHARS);
        }
        if let Some(value) = description {
            violations.check_text("description", value, DESCRIPTION_MAX_CHARS);
        }
        let service_type = provided(self.service_type.as_ref())
            .and_then(|raw| violations.check_parse::<ServiceType>("serviceType", raw));
        violations.into_result()?;

        Ok(TenderPatch {
            name: name.map(str::to_owned),
            description: description.map(str::to_owned),
            service_type,
        })
    }
}
