//! Behaviour tests for feedback left on bids and the per-author review listing.

#[path = "support/procurement_world.rs"]
mod procurement_world;

use procurement_world::{ProcurementWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/review_feedback.feature",
    name = "Feedback is listed for the bid author"
)]
fn feedback_is_listed_for_the_bid_author(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/review_feedback.feature",
    name = "Outsiders cannot leave feedback"
)]
fn outsiders_cannot_leave_feedback(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/review_feedback.feature",
    name = "Blank feedback is rejected"
)]
fn blank_feedback_is_rejected(world: ProcurementWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/review_feedback.feature",
    name = "Authors without a bid on the tender have no reviews"
)]
fn authors_without_a_bid_on_the_tender_have_no_reviews(world: ProcurementWorld) {
    drop(world);
}
