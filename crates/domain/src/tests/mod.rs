// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod allocation;
mod amount;
mod lead;

use time::OffsetDateTime;
use time::macros::datetime;

use crate::{Amount, DonationSnapshot, LeadSnapshot};

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-01-04 10:00 UTC)
}

pub fn lead_needing(help_requested: u32, help_given: u32) -> LeadSnapshot {
    LeadSnapshot {
        lead_id: 1,
        help_requested: Amount::from_major(help_requested),
        help_given: Amount::from_major(help_given),
    }
}

/// A donation snapshot with a single prior allocation of `amount - available`.
pub fn donation_with_available(donation_id: i64, amount: u32, available: u32) -> DonationSnapshot {
    let allocations: Vec<Amount> = if amount == available {
        Vec::new()
    } else {
        vec![Amount::from_major(amount - available)]
    };
    DonationSnapshot {
        donation_id,
        amount: Amount::from_major(amount),
        allocations,
    }
}
