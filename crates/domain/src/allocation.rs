// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation-to-lead allocation.
//!
//! Given a lead's outstanding need and an ordered selection of donations,
//! this module computes how much to draw from each donation. The walk is
//! greedy and keeps the caller's order: each donation gives
//! `min(available, remaining)` and the walk stops the moment the need is met.
//!
//! Nothing here touches storage. The outcome describes the ledger mutations;
//! applying them atomically is the persistence layer's job.
//!
//! Status filtering is a precondition: callers pass only verified donations.

use std::collections::HashSet;

use time::OffsetDateTime;

use crate::amount::Amount;
use crate::donation::DonationSnapshot;
use crate::error::{AllocationInputError, DomainError};
use crate::lead::LeadSnapshot;

/// A fully specified allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// The lead to fund.
    pub lead: LeadSnapshot,
    /// Candidate donations, in the order the operator selected them.
    pub donations: Vec<DonationSnapshot>,
    /// The user performing the allocation, recorded on every allocation.
    pub acting_user_id: String,
    /// Timestamp recorded on every allocation.
    pub allocated_at: OffsetDateTime,
}

/// A single draw from a donation in favour of a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    /// The funded lead.
    pub lead_id: i64,
    /// The source donation.
    pub donation_id: i64,
    /// The amount drawn. Always positive.
    pub amount: Amount,
    /// When the allocation was computed.
    pub allocated_at: OffsetDateTime,
    /// The acting user.
    pub allocated_by: String,
    /// The donation's available amount this draw was computed against.
    pub available_before: Amount,
}

impl Allocation {
    /// Returns what the donation has left once this allocation is applied.
    #[must_use]
    pub const fn available_after(&self) -> Amount {
        self.available_before.saturating_sub(self.amount)
    }
}

/// The result of an allocation computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    /// The funded lead.
    pub lead_id: i64,
    /// The lead's need before allocation.
    pub needed_amount: Amount,
    /// Emitted allocations, in candidate order.
    pub allocations: Vec<Allocation>,
    /// Sum of emitted allocation amounts.
    pub total_allocated: Amount,
    /// The lead's `help_given` after applying the allocations.
    pub new_help_given: Amount,
}

impl AllocationOutcome {
    /// Returns true if nothing was allocated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }

    /// Returns the part of the need the selection could not cover.
    #[must_use]
    pub const fn shortfall(&self) -> Amount {
        self.needed_amount.saturating_sub(self.total_allocated)
    }
}

/// What an allocation would do, shown to the operator before confirming.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationPreview {
    /// The lead's outstanding need.
    pub needed_amount: Amount,
    /// Combined available amount of the selected donations.
    pub total_selected_available: Amount,
    /// `min(total_selected_available, needed_amount)`.
    pub final_allocation_amount: Amount,
    /// Need left uncovered by the selection.
    pub shortfall: Amount,
}

/// Checks the candidate list and returns each donation's available amount.
fn validate_candidates(donations: &[DonationSnapshot]) -> Result<Vec<Amount>, DomainError> {
    if donations.is_empty() {
        return Err(AllocationInputError::NoDonationsSelected.into());
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(donations.len());
    let mut available: Vec<Amount> = Vec::with_capacity(donations.len());
    for donation in donations {
        if !seen.insert(donation.donation_id) {
            return Err(AllocationInputError::DuplicateDonation {
                donation_id: donation.donation_id,
            }
            .into());
        }
        let amount: Amount = donation.available_amount()?;
        if amount.is_zero() {
            return Err(AllocationInputError::DonationExhausted {
                donation_id: donation.donation_id,
            }
            .into());
        }
        available.push(amount);
    }
    Ok(available)
}

/// Computes how much of each candidate donation to apply to the lead.
///
/// A lead with no outstanding need yields an empty outcome whatever the
/// candidates are. Otherwise the candidates are validated and walked in the
/// order given.
///
/// # Arguments
///
/// * `request` - The lead, the ordered candidates, and the audit context
///
/// # Errors
///
/// Returns `DomainError::InvalidAllocationInput` if the candidate list is
/// empty, repeats a donation, or contains a donation with nothing available.
pub fn allocate(request: &AllocationRequest) -> Result<AllocationOutcome, DomainError> {
    let lead: LeadSnapshot = request.lead;
    let needed: Amount = lead.needed_amount();

    if needed.is_zero() {
        return Ok(AllocationOutcome {
            lead_id: lead.lead_id,
            needed_amount: needed,
            allocations: Vec::new(),
            total_allocated: Amount::ZERO,
            new_help_given: lead.help_given,
        });
    }

    let available: Vec<Amount> = validate_candidates(&request.donations)?;

    let mut remaining: Amount = needed;
    let mut allocations: Vec<Allocation> = Vec::new();
    for (donation, available_before) in request.donations.iter().zip(available) {
        let draw: Amount = available_before.min(remaining);
        if draw.is_zero() {
            continue;
        }

        allocations.push(Allocation {
            lead_id: lead.lead_id,
            donation_id: donation.donation_id,
            amount: draw,
            allocated_at: request.allocated_at,
            allocated_by: request.acting_user_id.clone(),
            available_before,
        });

        remaining = remaining.saturating_sub(draw);
        if remaining.is_zero() {
            break;
        }
    }

    let total_allocated: Amount = needed.saturating_sub(remaining);
    let new_help_given: Amount = lead.help_given.checked_add(total_allocated)?;

    Ok(AllocationOutcome {
        lead_id: lead.lead_id,
        needed_amount: needed,
        allocations,
        total_allocated,
        new_help_given,
    })
}

/// Summarizes what allocating `donations` to `lead` would achieve.
///
/// Unlike [`allocate`], this accepts an empty or exhausted selection and
/// simply reports zero available.
///
/// # Errors
///
/// Returns `DomainError::AmountOverflow` if the selection's total overflows.
pub fn preview_allocation(
    lead: &LeadSnapshot,
    donations: &[DonationSnapshot],
) -> Result<AllocationPreview, DomainError> {
    let needed_amount: Amount = lead.needed_amount();
    let total_selected_available: Amount = donations.iter().try_fold(
        Amount::ZERO,
        |total, donation| -> Result<Amount, DomainError> {
            total.checked_add(donation.available_amount()?)
        },
    )?;
    let final_allocation_amount: Amount = total_selected_available.min(needed_amount);

    Ok(AllocationPreview {
        needed_amount,
        total_selected_available,
        final_allocation_amount,
        shortfall: needed_amount.saturating_sub(final_allocation_amount),
    })
}
