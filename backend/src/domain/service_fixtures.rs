//! Shared fixtures for the domain service tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use super::{
    Bid, BidAuthor, BidDraft, BidId, BidStatus, EmployeeId, OrganizationId, ServiceType, Tender,
    TenderDraft, TenderId, TenderStatus,
};

pub(super) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(super) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(super) fn tender_at(
    status: TenderStatus,
    version: u32,
    organization_id: OrganizationId,
) -> Tender {
    Tender::from(TenderDraft {
        id: TenderId::random(),
        name: "Road works".to_owned(),
        description: "Resurface the ring road".to_owned(),
        service_type: ServiceType::Construction,
        status,
        version,
        organization_id,
        creator_id: EmployeeId::random(),
        created_at: fixture_timestamp(),
    })
}

pub(super) fn bid_at(author: BidAuthor, tender_id: TenderId, version: u32) -> Bid {
    Bid::from(BidDraft {
        id: BidId::random(),
        name: "Asphalt supply".to_owned(),
        description: "Two hundred tonnes".to_owned(),
        status: BidStatus::Created,
        tender_id,
        tender_version: 1,
        author,
        version,
        created_at: fixture_timestamp(),
    })
}
