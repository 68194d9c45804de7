// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Amounts cross the boundary as integer minor units. Timestamps in
//! responses are RFC 3339 strings.

use time::OffsetDateTime;

/// API request to record a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDonationRequest {
    /// Who gave the donation.
    pub donor_name: String,
    /// The donated amount in minor units.
    pub amount: u64,
    /// When the donation was received.
    pub recorded_at: OffsetDateTime,
    /// Optional operator notes.
    pub notes: Option<String>,
}

/// API response for a recorded donation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecordDonationResponse {
    /// The new donation's identifier.
    pub donation_id: i64,
    /// The audit event recording the donation.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to reject a donation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectDonationRequest {
    /// The donation to reject.
    pub donation_id: i64,
    /// Why it is being rejected.
    pub reason: String,
}

/// API response for a donation status change.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DonationStatusResponse {
    /// The donation.
    pub donation_id: i64,
    /// Its new status.
    pub status: String,
    /// The audit event recording the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A single allocation as seen from its donation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DonationAllocationInfo {
    /// The funded lead.
    pub lead_id: i64,
    /// The amount drawn.
    pub amount: u64,
    /// When it was allocated.
    pub allocated_at: String,
    /// Who allocated it.
    pub allocated_by: String,
}

/// A donation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DonationInfo {
    /// The donation identifier.
    pub donation_id: i64,
    /// Who gave the donation.
    pub donor_name: String,
    /// The donated amount.
    pub amount: u64,
    /// What is left to allocate.
    pub available_amount: u64,
    /// Verification state.
    pub status: String,
    /// Whether the donation can be offered for allocation.
    pub eligible_for_allocation: bool,
    /// Operator notes.
    pub notes: Option<String>,
    /// When the donation was recorded.
    pub recorded_at: String,
    /// Existing allocations, oldest first.
    pub allocations: Vec<DonationAllocationInfo>,
}

/// API request to list donations.
///
/// Every field is optional; unset fields use the listing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListDonationsRequest {
    /// Only donations in this status.
    pub status: Option<String>,
    /// Only donations that can be allocated.
    pub eligible_only: bool,
    /// Case-insensitive donor name substring.
    pub search: Option<String>,
    /// `recorded_at`, `amount`, `available_amount` or `donor_name`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// API response for listing donations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListDonationsResponse {
    /// Donations on this page.
    pub donations: Vec<DonationInfo>,
    /// The page number.
    pub page: u32,
    /// The page size.
    pub per_page: u32,
    /// Matching donations across all pages.
    pub total_items: u64,
    /// Number of pages.
    pub total_pages: u64,
}

/// API request to open a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenLeadRequest {
    /// Who the help is for.
    pub beneficiary_name: String,
    /// What the help is for.
    pub purpose: String,
    /// The amount needed, in minor units.
    pub help_requested: u64,
    /// When the lead was opened.
    pub opened_at: OffsetDateTime,
}

/// API response for an opened lead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OpenLeadResponse {
    /// The new lead's identifier.
    pub lead_id: i64,
    /// The audit event recording the lead.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to change a lead's requested amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviseHelpRequestedRequest {
    /// The lead.
    pub lead_id: i64,
    /// The new requested amount, in minor units.
    pub help_requested: u64,
}

/// API response for a revised lead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReviseHelpRequestedResponse {
    /// The lead.
    pub lead_id: i64,
    /// The new requested amount.
    pub help_requested: u64,
    /// The amount already given.
    pub help_given: u64,
    /// The audit event recording the change.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// A lead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadInfo {
    /// The lead identifier.
    pub lead_id: i64,
    /// Who the help is for.
    pub beneficiary_name: String,
    /// What the help is for.
    pub purpose: String,
    /// Total amount needed.
    pub help_requested: u64,
    /// Amount allocated so far.
    pub help_given: u64,
    /// Amount still needed.
    pub needed_amount: u64,
    /// `open`, `partially_funded` or `funded`.
    pub funding_status: String,
    /// When the lead was opened.
    pub opened_at: String,
}

/// A single allocation as seen from its lead.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadAllocationInfo {
    /// The allocation identifier.
    pub allocation_id: i64,
    /// The source donation.
    pub donation_id: i64,
    /// The amount drawn.
    pub amount: u64,
    /// When it was allocated.
    pub allocated_at: String,
    /// Who allocated it.
    pub allocated_by: String,
    /// The audit event that recorded it.
    pub audit_event_id: i64,
}

/// API response for a single lead with its funding history.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeadDetailResponse {
    /// The lead.
    pub lead: LeadInfo,
    /// Allocations received, oldest first.
    pub allocations: Vec<LeadAllocationInfo>,
}

/// API request to list leads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListLeadsRequest {
    /// `open`, `partially_funded` or `funded`.
    pub funding_status: Option<String>,
    /// Case-insensitive beneficiary name or purpose substring.
    pub search: Option<String>,
    /// `opened_at`, `help_requested`, `needed_amount` or `beneficiary_name`.
    pub sort_by: Option<String>,
    /// `asc` or `desc`.
    pub direction: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
}

/// API response for listing leads.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLeadsResponse {
    /// Leads on this page.
    pub leads: Vec<LeadInfo>,
    /// The page number.
    pub page: u32,
    /// The page size.
    pub per_page: u32,
    /// Matching leads across all pages.
    pub total_items: u64,
    /// Number of pages.
    pub total_pages: u64,
}

/// API request to preview an allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewAllocationRequest {
    /// The lead to fund.
    pub lead_id: i64,
    /// Selected donations.
    pub donation_ids: Vec<i64>,
}

/// API response describing what an allocation would do.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocationPreviewResponse {
    /// The lead.
    pub lead_id: i64,
    /// The lead's outstanding need.
    pub needed_amount: u64,
    /// Combined available amount of the selection.
    pub total_selected_available: u64,
    /// What would actually be allocated.
    pub final_allocation_amount: u64,
    /// Need the selection leaves uncovered.
    pub shortfall: u64,
}

/// API request to allocate donations to a lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocateDonationsRequest {
    /// The lead to fund.
    pub lead_id: i64,
    /// Selected donations, drawn from in this order.
    pub donation_ids: Vec<i64>,
    /// Timestamp recorded on every allocation.
    pub allocated_at: OffsetDateTime,
}

/// One draw made by an allocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocatedDonationInfo {
    /// The source donation.
    pub donation_id: i64,
    /// The amount drawn.
    pub amount: u64,
    /// What the donation has left afterwards.
    pub available_after: u64,
}

/// API response for an allocation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AllocateDonationsResponse {
    /// The funded lead.
    pub lead_id: i64,
    /// The audit event, absent when nothing was allocated.
    pub event_id: Option<i64>,
    /// Draws made, in selection order.
    pub allocations: Vec<AllocatedDonationInfo>,
    /// Sum of the draws.
    pub total_allocated: u64,
    /// The lead's `help_given` afterwards.
    pub help_given: u64,
    /// What the lead still needs.
    pub needed_amount: u64,
    /// Load, compute and persist cycles used.
    pub attempts: u32,
    /// A summary message.
    pub message: String,
}

/// An audit event.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEventInfo {
    /// The event identifier.
    pub event_id: i64,
    /// The lead the event concerns.
    pub lead_id: Option<i64>,
    /// The donation the event concerns.
    pub donation_id: Option<i64>,
    /// The acting user.
    pub actor_id: String,
    /// The kind of actor.
    pub actor_type: String,
    /// The cause identifier.
    pub cause_id: String,
    /// The cause description.
    pub cause_description: String,
    /// The action name.
    pub action_name: String,
    /// Action details.
    pub action_details: Option<String>,
    /// State before the action.
    pub before_snapshot: String,
    /// State after the action.
    pub after_snapshot: String,
}
