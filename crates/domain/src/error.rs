// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::amount::Amount;
use crate::donation::DonationStatus;

/// Reasons an allocation request is rejected before any arithmetic runs.
///
/// These all indicate a caller bug, usually a stale selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationInputError {
    /// The candidate donation list is empty.
    NoDonationsSelected,
    /// A candidate donation has nothing left to allocate.
    DonationExhausted {
        /// The exhausted donation.
        donation_id: i64,
    },
    /// The same donation appears more than once in the candidate list.
    DuplicateDonation {
        /// The repeated donation.
        donation_id: i64,
    },
}

impl std::fmt::Display for AllocationInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoDonationsSelected => write!(f, "No donations selected"),
            Self::DonationExhausted { donation_id } => {
                write!(f, "Donation {donation_id} has no available amount")
            }
            Self::DuplicateDonation { donation_id } => {
                write!(f, "Donation {donation_id} was selected more than once")
            }
        }
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An amount is zero where a positive amount is required.
    InvalidAmount(String),
    /// Amount arithmetic overflowed.
    AmountOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Donor name is empty or invalid.
    InvalidDonorName(String),
    /// Beneficiary name is empty or invalid.
    InvalidBeneficiaryName(String),
    /// A stored donation status string is not recognized.
    InvalidDonationStatus {
        /// The unrecognized status.
        status: String,
    },
    /// A funding status filter string is not recognized.
    InvalidFundingStatus {
        /// The unrecognized status.
        status: String,
    },
    /// A donation status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was refused.
        reason: String,
    },
    /// A lead's requested amount cannot drop below what it already received.
    HelpRequestedBelowGiven {
        /// The requested amount that was refused.
        help_requested: Amount,
        /// The amount already given.
        help_given: Amount,
    },
    /// A donation's allocations exceed its amount.
    OverAllocatedDonation {
        /// The donation.
        donation_id: Option<i64>,
        /// The donation amount.
        amount: Amount,
        /// The sum of its allocations.
        allocated: Amount,
    },
    /// The allocation request violates its preconditions.
    InvalidAllocationInput(AllocationInputError),
    /// The donation is not in a state that allows allocation.
    DonationNotEligible {
        /// The donation.
        donation_id: i64,
        /// Its current status.
        status: DonationStatus,
    },
    /// Donation does not exist.
    DonationNotFound(i64),
    /// Lead does not exist.
    LeadNotFound(i64),
    /// A record that must be persisted has no identifier yet.
    MissingIdentifier {
        /// The kind of record.
        entity: &'static str,
    },
    /// A page request is out of range.
    InvalidPageRequest {
        /// Description of the problem.
        reason: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAmount(msg) => write!(f, "Invalid amount: {msg}"),
            Self::AmountOverflow { operation } => {
                write!(f, "Amount overflow while {operation}")
            }
            Self::InvalidDonorName(msg) => write!(f, "Invalid donor name: {msg}"),
            Self::InvalidBeneficiaryName(msg) => write!(f, "Invalid beneficiary name: {msg}"),
            Self::InvalidDonationStatus { status } => {
                write!(f, "Invalid donation status: {status}")
            }
            Self::InvalidFundingStatus { status } => {
                write!(f, "Invalid funding status: {status}")
            }
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot move donation from {from} to {to}: {reason}")
            }
            Self::HelpRequestedBelowGiven {
                help_requested,
                help_given,
            } => {
                write!(
                    f,
                    "Requested help {help_requested} is below the {help_given} already given"
                )
            }
            Self::OverAllocatedDonation {
                donation_id,
                amount,
                allocated,
            } => match donation_id {
                Some(id) => write!(
                    f,
                    "Donation {id} has {allocated} allocated against an amount of {amount}"
                ),
                None => write!(
                    f,
                    "Donation has {allocated} allocated against an amount of {amount}"
                ),
            },
            Self::InvalidAllocationInput(reason) => {
                write!(f, "Invalid allocation input: {reason}")
            }
            Self::DonationNotEligible {
                donation_id,
                status,
            } => {
                write!(
                    f,
                    "Donation {donation_id} is {} and cannot be allocated",
                    status.as_str()
                )
            }
            Self::DonationNotFound(id) => write!(f, "Donation {id} not found"),
            Self::LeadNotFound(id) => write!(f, "Lead {id} not found"),
            Self::MissingIdentifier { entity } => {
                write!(f, "The {entity} has not been persisted yet")
            }
            Self::InvalidPageRequest { reason } => write!(f, "Invalid page request: {reason}"),
        }
    }
}

impl std::error::Error for DomainError {}

impl From<AllocationInputError> for DomainError {
    fn from(err: AllocationInputError) -> Self {
        Self::InvalidAllocationInput(err)
    }
}
