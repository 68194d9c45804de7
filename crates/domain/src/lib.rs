// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod allocation;
mod amount;
mod donation;
mod error;
mod lead;
mod listing;
mod validation;

#[cfg(test)]
mod tests;

pub use allocation::{
    Allocation, AllocationOutcome, AllocationPreview, AllocationRequest, allocate,
    preview_allocation,
};
pub use amount::Amount;
pub use donation::{Donation, DonationAllocation, DonationSnapshot, DonationStatus};
pub use error::{AllocationInputError, DomainError};
pub use lead::{FundingStatus, Lead, LeadSnapshot};
pub use listing::{
    DEFAULT_PER_PAGE, DonationQuery, DonationSortKey, LeadQuery, LeadSortKey, MAX_PER_PAGE, Page,
    PageRequest, SortDirection, list_donations, list_leads,
};
pub use validation::{
    validate_donation_fields, validate_help_requested_revision, validate_lead_fields,
};
