// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donations and their verification lifecycle.
//!
//! Donations are recorded as pending, verified by an operator, and then
//! drawn down by allocations until nothing is left. Only the storage layer
//! moves a donation to `Allocated`, once its available amount reaches zero.

use crate::amount::Amount;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Verification and consumption state of a donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    /// Recorded but not yet reviewed.
    PendingVerification,
    /// Reviewed and available for allocation.
    Verified,
    /// Review failed or the record is incomplete.
    FailedIncomplete,
    /// Fully allocated to leads.
    Allocated,
}

impl DonationStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingVerification => "pending_verification",
            Self::Verified => "verified",
            Self::FailedIncomplete => "failed_incomplete",
            Self::Allocated => "allocated",
        }
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::FailedIncomplete | Self::Allocated)
    }

    /// Validates a transition from this status to `new_status`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::PendingVerification => {
                matches!(new_status, Self::Verified | Self::FailedIncomplete)
            }
            Self::Verified => matches!(new_status, Self::Allocated),
            Self::FailedIncomplete | Self::Allocated => false,
        };

        if !valid {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted".to_string(),
            });
        }

        Ok(())
    }
}

impl FromStr for DonationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending_verification" => Ok(Self::PendingVerification),
            "verified" => Ok(Self::Verified),
            "failed_incomplete" => Ok(Self::FailedIncomplete),
            "allocated" => Ok(Self::Allocated),
            _ => Err(DomainError::InvalidDonationStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A portion of a donation already applied to a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationAllocation {
    /// The lead that received the funds.
    pub lead_id: i64,
    /// The amount applied.
    pub amount: Amount,
    /// When the allocation was made.
    pub allocated_at: OffsetDateTime,
    /// The user who made the allocation.
    pub allocated_by: String,
}

/// A donation record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Donation {
    /// The numeric identifier assigned by storage.
    /// `None` indicates the donation has not been persisted yet.
    donation_id: Option<i64>,
    /// Who gave the donation.
    pub donor_name: String,
    /// The total donated amount.
    pub amount: Amount,
    /// Verification state.
    pub status: DonationStatus,
    /// Existing allocations, oldest first.
    pub allocations: Vec<DonationAllocation>,
    /// When the donation was recorded.
    pub recorded_at: OffsetDateTime,
    /// Free-form operator notes.
    pub notes: Option<String>,
}

impl Donation {
    /// Creates a new, unpersisted donation awaiting verification.
    #[must_use]
    pub const fn new(
        donor_name: String,
        amount: Amount,
        recorded_at: OffsetDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            donation_id: None,
            donor_name,
            amount,
            status: DonationStatus::PendingVerification,
            allocations: Vec::new(),
            recorded_at,
            notes,
        }
    }

    /// Rebuilds a persisted donation.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        donation_id: i64,
        donor_name: String,
        amount: Amount,
        status: DonationStatus,
        allocations: Vec<DonationAllocation>,
        recorded_at: OffsetDateTime,
        notes: Option<String>,
    ) -> Self {
        Self {
            donation_id: Some(donation_id),
            donor_name,
            amount,
            status,
            allocations,
            recorded_at,
            notes,
        }
    }

    /// Returns the storage identifier if persisted.
    #[must_use]
    pub const fn donation_id(&self) -> Option<i64> {
        self.donation_id
    }

    /// Returns the sum of existing allocations.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the allocations overflow.
    pub fn allocated_total(&self) -> Result<Amount, DomainError> {
        Amount::checked_sum(self.allocations.iter().map(|a| a.amount))
    }

    /// Returns what is left to allocate, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the allocations overflow.
    pub fn available_amount(&self) -> Result<Amount, DomainError> {
        Ok(self.amount.saturating_sub(self.allocated_total()?))
    }

    /// Returns true if the donation may be offered as an allocation candidate.
    #[must_use]
    pub fn is_eligible_for_allocation(&self) -> bool {
        self.status == DonationStatus::Verified
            && self.available_amount().is_ok_and(|a| !a.is_zero())
    }

    /// Builds the view the allocation engine works from.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentifier` if the donation is unpersisted.
    pub fn snapshot(&self) -> Result<DonationSnapshot, DomainError> {
        let donation_id: i64 = self
            .donation_id
            .ok_or(DomainError::MissingIdentifier { entity: "donation" })?;
        Ok(DonationSnapshot {
            donation_id,
            amount: self.amount,
            allocations: self.allocations.iter().map(|a| a.amount).collect(),
        })
    }
}

/// The allocation-relevant subset of a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationSnapshot {
    /// The donation identifier.
    pub donation_id: i64,
    /// The total donated amount.
    pub amount: Amount,
    /// Amounts of existing allocations.
    pub allocations: Vec<Amount>,
}

impl DonationSnapshot {
    /// Returns `amount - sum(allocations)`, clamped at zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AmountOverflow` if the allocations overflow.
    pub fn available_amount(&self) -> Result<Amount, DomainError> {
        Ok(self
            .amount
            .saturating_sub(Amount::checked_sum(self.allocations.iter().copied())?))
    }
}
