// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use relief_ledger_audit::{Actor, Cause};
use relief_ledger_domain::{Amount, Donation, DonationAllocation, DonationStatus, Lead};
use time::OffsetDateTime;
use time::macros::datetime;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-12"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-02-10 09:30 UTC)
}

pub fn create_test_lead(lead_id: i64, help_requested: u32, help_given: u32) -> Lead {
    Lead::with_id(
        lead_id,
        String::from("Ravi Kumar"),
        String::from("School fees"),
        Amount::from_major(help_requested),
        Amount::from_major(help_given),
        test_time(),
    )
}

pub fn create_test_donation(
    donation_id: i64,
    amount: u32,
    allocated: u32,
    status: DonationStatus,
) -> Donation {
    let allocations: Vec<DonationAllocation> = if allocated == 0 {
        Vec::new()
    } else {
        vec![DonationAllocation {
            lead_id: 99,
            amount: Amount::from_major(allocated),
            allocated_at: test_time(),
            allocated_by: String::from("operator-1"),
        }]
    };
    Donation::with_id(
        donation_id,
        String::from("Asha Trust"),
        Amount::from_major(amount),
        status,
        allocations,
        test_time(),
        None,
    )
}
