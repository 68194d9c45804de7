// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use relief_ledger_audit::Cause;
use relief_ledger_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    ActingUser, AllocateDonationsRequest, OpenLeadRequest, RecordDonationRequest,
    open_lead, record_donation, verify_donation,
};

pub fn create_test_user() -> ActingUser {
    ActingUser::new(String::from("operator-7")).unwrap()
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub const fn test_time() -> OffsetDateTime {
    datetime!(2026-03-02 14:00 UTC)
}

pub fn setup() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn record(persistence: &mut Persistence, donor_name: &str, amount: u64) -> i64 {
    record_donation(
        persistence,
        RecordDonationRequest {
            donor_name: String::from(donor_name),
            amount,
            recorded_at: test_time(),
            notes: None,
        },
        &create_test_user(),
        create_test_cause(),
    )
    .expect("Failed to record donation")
    .donation_id
}

pub fn record_verified(persistence: &mut Persistence, donor_name: &str, amount: u64) -> i64 {
    let donation_id: i64 = record(persistence, donor_name, amount);
    verify_donation(
        persistence,
        donation_id,
        &create_test_user(),
        create_test_cause(),
    )
    .expect("Failed to verify donation");
    donation_id
}

pub fn open(persistence: &mut Persistence, beneficiary_name: &str, help_requested: u64) -> i64 {
    open_lead(
        persistence,
        OpenLeadRequest {
            beneficiary_name: String::from(beneficiary_name),
            purpose: String::from("Medical treatment"),
            help_requested,
            opened_at: test_time(),
        },
        &create_test_user(),
        create_test_cause(),
    )
    .expect("Failed to open lead")
    .lead_id
}

pub fn allocation_request(lead_id: i64, donation_ids: Vec<i64>) -> AllocateDonationsRequest {
    AllocateDonationsRequest {
        lead_id,
        donation_ids,
        allocated_at: test_time(),
    }
}
