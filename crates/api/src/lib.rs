// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operator-facing API for the relief ledger.
//!
//! This crate sits between transport and the ledger. It validates operator
//! input, drives the core state machine, persists transitions, and turns
//! every lower-level error into an [`ApiError`].

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
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod retry;

#[cfg(test)]
mod tests;

use relief_ledger_audit::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    ALLOCATION_ALREADY_COMPLETE, allocate_donations, get_audit_event, get_donation,
    get_donation_audit_timeline, get_lead, get_lead_audit_timeline, list_donations, list_leads,
    open_lead, preview_lead_allocation, record_donation, reject_donation, revise_help_requested,
    verify_donation,
};
pub use request_response::{
    AllocateDonationsRequest, AllocateDonationsResponse, AllocatedDonationInfo,
    AllocationPreviewResponse, AuditEventInfo, DonationAllocationInfo, DonationInfo,
    DonationStatusResponse, LeadAllocationInfo, LeadDetailResponse, LeadInfo,
    ListDonationsRequest, ListDonationsResponse, ListLeadsRequest, ListLeadsResponse,
    OpenLeadRequest, OpenLeadResponse, PreviewAllocationRequest, RecordDonationRequest,
    RecordDonationResponse, RejectDonationRequest, ReviseHelpRequestedRequest,
    ReviseHelpRequestedResponse,
};
pub use retry::{DEFAULT_MAX_ALLOCATION_ATTEMPTS, retry_on_conflict};

/// The operator performing a request.
///
/// Every write is attributed to an acting user. Allocations record the
/// user's ID as `allocated_by`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    /// The operator's identifier.
    pub id: String,
}

impl ActingUser {
    /// Audit actor type recorded for operators.
    pub const ACTOR_TYPE: &'static str = "operator";

    /// Creates an acting user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the ID is blank.
    pub fn new(id: String) -> Result<Self, ApiError> {
        if id.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("acting_user_id"),
                message: String::from("Acting user ID cannot be empty"),
            });
        }
        Ok(Self { id })
    }

    /// Converts this user into an audit actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), String::from(Self::ACTOR_TYPE))
    }
}
