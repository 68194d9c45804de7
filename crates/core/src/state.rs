// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use relief_ledger_audit::AuditEvent;
use relief_ledger_domain::{
    AllocationOutcome, Amount, DomainError, Donation, DonationStatus, Lead,
};

/// The working set of ledger records a command is applied against.
///
/// Callers load only the records the command touches: the lead and the
/// selected donations for an allocation, a single donation for a status
/// change, nothing at all for a new record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// Loaded leads.
    pub leads: Vec<Lead>,
    /// Loaded donations.
    pub donations: Vec<Donation>,
}

impl State {
    /// Creates an empty working set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            leads: Vec::new(),
            donations: Vec::new(),
        }
    }

    /// Creates a working set from loaded records.
    #[must_use]
    pub const fn with_records(leads: Vec<Lead>, donations: Vec<Donation>) -> Self {
        Self { leads, donations }
    }

    /// Looks up a lead by identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LeadNotFound` if the lead is not loaded.
    pub fn find_lead(&self, lead_id: i64) -> Result<&Lead, DomainError> {
        self.leads
            .iter()
            .find(|lead| lead.lead_id() == Some(lead_id))
            .ok_or(DomainError::LeadNotFound(lead_id))
    }

    /// Looks up a donation by identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DonationNotFound` if the donation is not loaded.
    pub fn find_donation(&self, donation_id: i64) -> Result<&Donation, DomainError> {
        self.donations
            .iter()
            .find(|donation| donation.donation_id() == Some(donation_id))
            .ok_or(DomainError::DonationNotFound(donation_id))
    }
}

/// The ledger mutation a transition asks storage to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerChange {
    /// Insert a new donation.
    DonationRecorded(Donation),
    /// Move a donation to a new status.
    DonationStatusChanged {
        /// The donation.
        donation_id: i64,
        /// The status it was read in.
        from: DonationStatus,
        /// The new status.
        to: DonationStatus,
    },
    /// Insert a new lead.
    LeadOpened(Lead),
    /// Replace a lead's requested amount.
    HelpRequestedRevised {
        /// The lead.
        lead_id: i64,
        /// The requested amount as read.
        from: Amount,
        /// The new requested amount.
        to: Amount,
        /// The lead's `help_given` as read.
        help_given: Amount,
    },
    /// Apply allocations to a lead and its source donations.
    Allocated {
        /// The engine's computation.
        outcome: AllocationOutcome,
        /// The lead's `help_given` as read, checked again before writing.
        expected_help_given: Amount,
    },
    /// The lead was already fully funded. Nothing is written.
    NothingToAllocate {
        /// The lead.
        lead_id: i64,
    },
}

impl LedgerChange {
    /// Returns true if the change writes nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        matches!(self, Self::NothingToAllocate { .. })
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The mutation to apply.
    pub change: LedgerChange,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
