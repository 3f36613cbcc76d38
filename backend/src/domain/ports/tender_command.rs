//! Driving port for tender mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewTender, Tender, TenderEdit, TenderId, TenderStatus};

/// Request to move a tender to another status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTenderStatusRequest {
    /// Tender to update.
    pub tender_id: TenderId,
    /// Target status.
    pub status: TenderStatus,
    /// Acting employee.
    pub username: String,
}

/// Request to edit tender fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditTenderRequest {
    /// Tender to edit.
    pub tender_id: TenderId,
    /// Acting employee.
    pub username: String,
    /// Fields to replace.
    pub edit: TenderEdit,
}

/// Request to restore a historical tender version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollbackTenderRequest {
    /// Tender to roll back.
    pub tender_id: TenderId,
    /// Version whose content is restored.
    pub version: u32,
    /// Acting employee.
    pub username: String,
}

/// Tender lifecycle mutations. Each successful call stores a new version.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TenderCommand: Send + Sync {
    /// Create a tender at version 1 with status `Created`.
    async fn create(&self, request: NewTender) -> Result<Tender, Error>;

    /// Store a new version with the requested status.
    async fn update_status(&self, request: UpdateTenderStatusRequest) -> Result<Tender, Error>;

    /// Store a new version with the provided fields replaced.
    async fn edit(&self, request: EditTenderRequest) -> Result<Tender, Error>;

    /// Store a copy of a historical version on top of the latest one.
    async fn rollback(&self, request: RollbackTenderRequest) -> Result<Tender, Error>;
}
