//! Behaviour tests for the tender lifecycle: creation, publication, edits,
//! authorization and rollback.

#[path = "support/procurement_world.rs"]
mod procurement_world;

use procurement_world::{ProcurementWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Creating a tender starts at version one"
)]
fn creating_a_tender_starts_at_version_one(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Publishing a tender adds a version"
)]
fn publishing_a_tender_adds_a_version(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Outsiders cannot edit a tender"
)]
fn outsiders_cannot_edit_a_tender(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Unknown users are reported before authorization"
)]
fn unknown_users_are_reported_before_authorization(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Rolling back copies historical content forward"
)]
fn rolling_back_copies_historical_content_forward(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Rolling back to a missing version changes nothing"
)]
fn rolling_back_to_a_missing_version_changes_nothing(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/tender_lifecycle.feature",
    name = "Every invalid field is reported together"
)]
fn every_invalid_field_is_reported_together(world: ProcurementWorld) {
    drop(world);
}
