// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use relief_ledger_domain::Amount;
use time::OffsetDateTime;

/// Operator intent, as data only.
///
/// Commands are the only way to request ledger changes. Timestamps are
/// carried explicitly so that applying a command is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Record a donation awaiting verification.
    RecordDonation {
        /// Who gave the donation.
        donor_name: String,
        /// The donated amount.
        amount: Amount,
        /// When the donation was received.
        recorded_at: OffsetDateTime,
        /// Free-form notes.
        notes: Option<String>,
    },
    /// Mark a pending donation as verified.
    VerifyDonation {
        /// The donation to verify.
        donation_id: i64,
    },
    /// Mark a pending donation as failed or incomplete.
    RejectDonation {
        /// The donation to reject.
        donation_id: i64,
        /// Why verification failed.
        reason: String,
    },
    /// Open a help request for a beneficiary.
    OpenLead {
        /// Who the help is for.
        beneficiary_name: String,
        /// What the help is for.
        purpose: String,
        /// Total amount needed.
        help_requested: Amount,
        /// When the lead was opened.
        opened_at: OffsetDateTime,
    },
    /// Change a lead's requested amount.
    ReviseHelpRequested {
        /// The lead to revise.
        lead_id: i64,
        /// The new requested amount.
        help_requested: Amount,
    },
    /// Allocate the selected donations to a lead, in the given order.
    AllocateDonations {
        /// The lead to fund.
        lead_id: i64,
        /// Selected donations, in operator order.
        donation_ids: Vec<i64>,
        /// Timestamp recorded on every allocation.
        allocated_at: OffsetDateTime,
    },
}
