// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each write handler loads the records it needs, applies a core command,
//! and persists the resulting transition. Reads translate persisted records
//! into response DTOs.

use num_traits::ToPrimitive;
use relief_ledger::{Command, LedgerChange, State, TransitionResult, apply};
use relief_ledger_audit::{Actor, AuditEvent, Cause};
use relief_ledger_domain::{
    AllocationOutcome, AllocationPreview, Amount, DEFAULT_PER_PAGE, DomainError, Donation,
    DonationQuery, DonationSnapshot, DonationSortKey, DonationStatus, FundingStatus, Lead,
    LeadQuery, LeadSnapshot, LeadSortKey, Page, PageRequest, SortDirection, preview_allocation,
};
use relief_ledger_persistence::{AllocationRecord, PersistTransitionResult, Persistence};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AllocateDonationsRequest, AllocateDonationsResponse, AllocatedDonationInfo,
    AllocationPreviewResponse, AuditEventInfo, DonationAllocationInfo, DonationInfo,
    DonationStatusResponse, LeadAllocationInfo, LeadDetailResponse, LeadInfo,
    ListDonationsRequest, ListDonationsResponse, ListLeadsRequest, ListLeadsResponse,
    OpenLeadRequest, OpenLeadResponse, PreviewAllocationRequest, RecordDonationRequest,
    RecordDonationResponse, RejectDonationRequest, ReviseHelpRequestedRequest,
    ReviseHelpRequestedResponse,
};
use crate::retry::retry_on_conflict;
use crate::ActingUser;

/// Message reported when a lead needs nothing more.
pub const ALLOCATION_ALREADY_COMPLETE: &str = "Allocation already complete";

// ============================================================================
// Conversions
// ============================================================================

fn format_timestamp(timestamp: OffsetDateTime) -> Result<String, ApiError> {
    timestamp.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn to_u64(value: usize) -> Result<u64, ApiError> {
    value.to_u64().ok_or_else(|| ApiError::Internal {
        message: format!("Count {value} does not fit in u64"),
    })
}

fn require_id(id: Option<i64>, entity: &'static str) -> Result<i64, ApiError> {
    id.ok_or_else(|| translate_domain_error(DomainError::MissingIdentifier { entity }))
}

fn require_event_id(event_id: Option<i64>) -> Result<i64, ApiError> {
    event_id.ok_or_else(|| ApiError::Internal {
        message: String::from("Transition was not recorded in the audit log"),
    })
}

fn donation_to_info(donation: &Donation) -> Result<DonationInfo, ApiError> {
    let allocations: Vec<DonationAllocationInfo> = donation
        .allocations
        .iter()
        .map(|allocation| {
            Ok(DonationAllocationInfo {
                lead_id: allocation.lead_id,
                amount: allocation.amount.minor_units(),
                allocated_at: format_timestamp(allocation.allocated_at)?,
                allocated_by: allocation.allocated_by.clone(),
            })
        })
        .collect::<Result<_, ApiError>>()?;

    Ok(DonationInfo {
        donation_id: require_id(donation.donation_id(), "donation")?,
        donor_name: donation.donor_name.clone(),
        amount: donation.amount.minor_units(),
        available_amount: donation
            .available_amount()
            .map_err(translate_domain_error)?
            .minor_units(),
        status: donation.status.to_string(),
        eligible_for_allocation: donation.is_eligible_for_allocation(),
        notes: donation.notes.clone(),
        recorded_at: format_timestamp(donation.recorded_at)?,
        allocations,
    })
}

fn lead_to_info(lead: &Lead) -> Result<LeadInfo, ApiError> {
    Ok(LeadInfo {
        lead_id: require_id(lead.lead_id(), "lead")?,
        beneficiary_name: lead.beneficiary_name.clone(),
        purpose: lead.purpose.clone(),
        help_requested: lead.help_requested.minor_units(),
        help_given: lead.help_given.minor_units(),
        needed_amount: lead.needed_amount().minor_units(),
        funding_status: lead.funding_status().to_string(),
        opened_at: format_timestamp(lead.opened_at)?,
    })
}

fn allocation_record_to_info(record: &AllocationRecord) -> Result<LeadAllocationInfo, ApiError> {
    Ok(LeadAllocationInfo {
        allocation_id: record.allocation_id,
        donation_id: record.donation_id,
        amount: record.amount.minor_units(),
        allocated_at: format_timestamp(record.allocated_at)?,
        allocated_by: record.allocated_by.clone(),
        audit_event_id: record.audit_event_id,
    })
}

fn audit_event_to_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: require_id(event.event_id, "audit event")?,
        lead_id: event.lead_id,
        donation_id: event.donation_id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
    })
}

fn parse_direction(direction: Option<&str>) -> Result<SortDirection, ApiError> {
    match direction {
        None | Some("asc") => Ok(SortDirection::Ascending),
        Some("desc") => Ok(SortDirection::Descending),
        Some(other) => Err(ApiError::InvalidInput {
            field: String::from("direction"),
            message: format!("Unknown sort direction '{other}', expected 'asc' or 'desc'"),
        }),
    }
}

fn parse_lead_sort_key(sort_by: Option<&str>) -> Result<LeadSortKey, ApiError> {
    match sort_by {
        None | Some("opened_at") => Ok(LeadSortKey::OpenedAt),
        Some("help_requested") => Ok(LeadSortKey::HelpRequested),
        Some("needed_amount") => Ok(LeadSortKey::NeededAmount),
        Some("beneficiary_name") => Ok(LeadSortKey::BeneficiaryName),
        Some(other) => Err(ApiError::InvalidInput {
            field: String::from("sort_by"),
            message: format!("Unknown lead sort key '{other}'"),
        }),
    }
}

fn parse_donation_sort_key(sort_by: Option<&str>) -> Result<DonationSortKey, ApiError> {
    match sort_by {
        None | Some("recorded_at") => Ok(DonationSortKey::RecordedAt),
        Some("amount") => Ok(DonationSortKey::Amount),
        Some("available_amount") => Ok(DonationSortKey::AvailableAmount),
        Some("donor_name") => Ok(DonationSortKey::DonorName),
        Some(other) => Err(ApiError::InvalidInput {
            field: String::from("sort_by"),
            message: format!("Unknown donation sort key '{other}'"),
        }),
    }
}

fn page_request(page: Option<u32>, per_page: Option<u32>) -> PageRequest {
    PageRequest {
        page: page.unwrap_or(1),
        per_page: per_page.unwrap_or(DEFAULT_PER_PAGE),
    }
}

/// Loads donations in the requested order, failing on the first unknown ID.
///
/// Repeated IDs are kept so the engine can reject them.
fn load_donations(
    persistence: &mut Persistence,
    donation_ids: &[i64],
) -> Result<Vec<Donation>, ApiError> {
    let loaded: Vec<Donation> = persistence
        .get_donations(donation_ids)
        .map_err(translate_persistence_error)?;

    donation_ids
        .iter()
        .map(|id| {
            loaded
                .iter()
                .find(|donation| donation.donation_id() == Some(*id))
                .cloned()
                .ok_or_else(|| translate_domain_error(DomainError::DonationNotFound(*id)))
        })
        .collect()
}

fn persist(
    persistence: &mut Persistence,
    transition: &TransitionResult,
) -> Result<PersistTransitionResult, ApiError> {
    persistence
        .persist_transition(transition)
        .map_err(translate_persistence_error)
}

// ============================================================================
// Donations
// ============================================================================

/// Records a new donation awaiting verification.
///
/// # Errors
///
/// Returns an error if:
/// - The donor name is blank
/// - The amount is zero
/// - The donation cannot be persisted
pub fn record_donation(
    persistence: &mut Persistence,
    request: RecordDonationRequest,
    acting_user: &ActingUser,
    cause: Cause,
) -> Result<RecordDonationResponse, ApiError> {
    let command: Command = Command::RecordDonation {
        donor_name: request.donor_name,
        amount: Amount::new(request.amount),
        recorded_at: request.recorded_at,
        notes: request.notes,
    };

    let transition: TransitionResult = apply(
        &State::new(),
        command,
        acting_user.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persist(persistence, &transition)?;
    let donation_id: i64 = require_id(persisted.created_id, "donation")?;
    let event_id: i64 = require_event_id(persisted.event_id)?;

    info!(donation_id, event_id, "Recorded donation");

    Ok(RecordDonationResponse {
        donation_id,
        event_id,
        message: format!(
            "Recorded donation {donation_id} of {}",
            Amount::new(request.amount)
        ),
    })
}

fn change_donation_status(
    persistence: &mut Persistence,
    donation_id: i64,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<DonationStatusResponse, ApiError> {
    let donation: Donation = persistence
        .get_donation(donation_id)
        .map_err(translate_persistence_error)?;
    let state: State = State::with_records(Vec::new(), vec![donation]);

    let transition: TransitionResult =
        apply(&state, command, actor, cause).map_err(translate_core_error)?;
    let status: DonationStatus = match &transition.change {
        LedgerChange::DonationStatusChanged { to, .. } => *to,
        other => {
            return Err(ApiError::Internal {
                message: format!("Unexpected ledger change {other:?}"),
            });
        }
    };

    let event_id: i64 = require_event_id(persist(persistence, &transition)?.event_id)?;

    info!(donation_id, event_id, status = %status, "Changed donation status");

    Ok(DonationStatusResponse {
        donation_id,
        status: status.to_string(),
        event_id,
        message: format!("Donation {donation_id} is now {status}"),
    })
}

/// Marks a pending donation as verified, making it available for allocation.
///
/// # Errors
///
/// Returns an error if the donation does not exist, is not pending, or was
/// changed concurrently.
pub fn verify_donation(
    persistence: &mut Persistence,
    donation_id: i64,
    acting_user: &ActingUser,
    cause: Cause,
) -> Result<DonationStatusResponse, ApiError> {
    change_donation_status(
        persistence,
        donation_id,
        Command::VerifyDonation { donation_id },
        acting_user.to_audit_actor(),
        cause,
    )
}

/// Marks a pending donation as failed or incomplete.
///
/// # Errors
///
/// Returns an error if the reason is blank, the donation does not exist,
/// is not pending, or was changed concurrently.
pub fn reject_donation(
    persistence: &mut Persistence,
    request: RejectDonationRequest,
    acting_user: &ActingUser,
    cause: Cause,
) -> Result<DonationStatusResponse, ApiError> {
    if request.reason.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("reason"),
            message: String::from("A rejection reason is required"),
        });
    }

    change_donation_status(
        persistence,
        request.donation_id,
        Command::RejectDonation {
            donation_id: request.donation_id,
            reason: request.reason,
        },
        acting_user.to_audit_actor(),
        cause,
    )
}

/// Retrieves a donation with its allocations.
///
/// # Errors
///
/// Returns an error if the donation does not exist.
pub fn get_donation(
    persistence: &mut Persistence,
    donation_id: i64,
) -> Result<DonationInfo, ApiError> {
    let donation: Donation = persistence
        .get_donation(donation_id)
        .map_err(translate_persistence_error)?;
    donation_to_info(&donation)
}

/// Filters, sorts and paginates donations.
///
/// # Errors
///
/// Returns an error if a filter, sort key or page is invalid.
pub fn list_donations(
    persistence: &mut Persistence,
    request: &ListDonationsRequest,
) -> Result<ListDonationsResponse, ApiError> {
    let query: DonationQuery = DonationQuery {
        status: request
            .status
            .as_deref()
            .map(DonationStatus::from_str)
            .transpose()
            .map_err(translate_domain_error)?,
        eligible_only: request.eligible_only,
        search: request.search.clone(),
        sort_by: parse_donation_sort_key(request.sort_by.as_deref())?,
        direction: parse_direction(request.direction.as_deref())?,
        page: page_request(request.page, request.per_page),
    };

    let donations: Vec<Donation> = persistence
        .list_donations()
        .map_err(translate_persistence_error)?;
    let page: Page<Donation> =
        relief_ledger_domain::list_donations(&donations, &query).map_err(translate_domain_error)?;

    debug!(
        total_items = page.total_items,
        page = page.page,
        "Listed donations"
    );

    Ok(ListDonationsResponse {
        donations: page
            .items
            .iter()
            .map(donation_to_info)
            .collect::<Result<_, _>>()?,
        page: page.page,
        per_page: page.per_page,
        total_items: to_u64(page.total_items)?,
        total_pages: to_u64(page.total_pages)?,
    })
}

// ============================================================================
// Leads
// ============================================================================

/// Opens a new lead with nothing given yet.
///
/// # Errors
///
/// Returns an error if:
/// - The beneficiary name is blank
/// - The requested amount is zero
/// - The lead cannot be persisted
pub fn open_lead(
    persistence: &mut Persistence,
    request: OpenLeadRequest,
    acting_user: &ActingUser,
    cause: Cause,
) -> Result<OpenLeadResponse, ApiError> {
    let beneficiary_name: String = request.beneficiary_name.clone();
    let command: Command = Command::OpenLead {
        beneficiary_name: request.beneficiary_name,
        purpose: request.purpose,
        help_requested: Amount::new(request.help_requested),
        opened_at: request.opened_at,
    };

    let transition: TransitionResult = apply(
        &State::new(),
        command,
        acting_user.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persist(persistence, &transition)?;
    let lead_id: i64 = require_id(persisted.created_id, "lead")?;
    let event_id: i64 = require_event_id(persisted.event_id)?;

    info!(lead_id, event_id, "Opened lead");

    Ok(OpenLeadResponse {
        lead_id,
        event_id,
        message: format!("Opened lead {lead_id} for {beneficiary_name}"),
    })
}

/// Changes a lead's requested amount.
///
/// # Errors
///
/// Returns an error if the lead does not exist, the new amount is zero or
/// below what was already given, or the lead changed concurrently.
pub fn revise_help_requested(
    persistence: &mut Persistence,
    request: ReviseHelpRequestedRequest,
    acting_user: &ActingUser,
    cause: Cause,
) -> Result<ReviseHelpRequestedResponse, ApiError> {
    let lead: Lead = persistence
        .get_lead(request.lead_id)
        .map_err(translate_persistence_error)?;
    let help_given: Amount = lead.help_given;
    let state: State = State::with_records(vec![lead], Vec::new());

    let help_requested: Amount = Amount::new(request.help_requested);
    let transition: TransitionResult = apply(
        &state,
        Command::ReviseHelpRequested {
            lead_id: request.lead_id,
            help_requested,
        },
        acting_user.to_audit_actor(),
        cause,
    )
    .map_err(translate_core_error)?;

    let event_id: i64 = require_event_id(persist(persistence, &transition)?.event_id)?;

    info!(lead_id = request.lead_id, event_id, "Revised help requested");

    Ok(ReviseHelpRequestedResponse {
        lead_id: request.lead_id,
        help_requested: help_requested.minor_units(),
        help_given: help_given.minor_units(),
        event_id,
        message: format!(
            "Lead {} now requests {help_requested}",
            request.lead_id
        ),
    })
}

/// Retrieves a lead with the allocations it has received.
///
/// # Errors
///
/// Returns an error if the lead does not exist.
pub fn get_lead(persistence: &mut Persistence, lead_id: i64) -> Result<LeadDetailResponse, ApiError> {
    let lead: Lead = persistence
        .get_lead(lead_id)
        .map_err(translate_persistence_error)?;
    let records: Vec<AllocationRecord> = persistence
        .get_lead_allocations(lead_id)
        .map_err(translate_persistence_error)?;

    Ok(LeadDetailResponse {
        lead: lead_to_info(&lead)?,
        allocations: records
            .iter()
            .map(allocation_record_to_info)
            .collect::<Result<_, _>>()?,
    })
}

/// Filters, sorts and paginates leads.
///
/// # Errors
///
/// Returns an error if a filter, sort key or page is invalid.
pub fn list_leads(
    persistence: &mut Persistence,
    request: &ListLeadsRequest,
) -> Result<ListLeadsResponse, ApiError> {
    let query: LeadQuery = LeadQuery {
        funding_status: request
            .funding_status
            .as_deref()
            .map(FundingStatus::from_str)
            .transpose()
            .map_err(translate_domain_error)?,
        search: request.search.clone(),
        sort_by: parse_lead_sort_key(request.sort_by.as_deref())?,
        direction: parse_direction(request.direction.as_deref())?,
        page: page_request(request.page, request.per_page),
    };

    let leads: Vec<Lead> = persistence
        .list_leads()
        .map_err(translate_persistence_error)?;
    let page: Page<Lead> =
        relief_ledger_domain::list_leads(&leads, &query).map_err(translate_domain_error)?;

    debug!(total_items = page.total_items, page = page.page, "Listed leads");

    Ok(ListLeadsResponse {
        leads: page
            .items
            .iter()
            .map(lead_to_info)
            .collect::<Result<_, _>>()?,
        page: page.page,
        per_page: page.per_page,
        total_items: to_u64(page.total_items)?,
        total_pages: to_u64(page.total_pages)?,
    })
}

// ============================================================================
// Allocation
// ============================================================================

/// Summarizes what allocating the selected donations would do.
///
/// Nothing is written.
///
/// # Errors
///
/// Returns an error if the lead or a donation does not exist, or a selected
/// donation is not verified.
pub fn preview_lead_allocation(
    persistence: &mut Persistence,
    request: &PreviewAllocationRequest,
) -> Result<AllocationPreviewResponse, ApiError> {
    let lead: LeadSnapshot = persistence
        .get_lead(request.lead_id)
        .map_err(translate_persistence_error)?
        .snapshot()
        .map_err(translate_domain_error)?;

    // load_donations yields exactly one donation per requested id, in order
    let donations: Vec<DonationSnapshot> = load_donations(persistence, &request.donation_ids)?
        .iter()
        .zip(&request.donation_ids)
        .map(|(donation, &donation_id)| {
            if donation.status != DonationStatus::Verified {
                return Err(DomainError::DonationNotEligible {
                    donation_id,
                    status: donation.status,
                });
            }
            donation.snapshot()
        })
        .collect::<Result<_, _>>()
        .map_err(translate_domain_error)?;

    let preview: AllocationPreview =
        preview_allocation(&lead, &donations).map_err(translate_domain_error)?;

    Ok(AllocationPreviewResponse {
        lead_id: request.lead_id,
        needed_amount: preview.needed_amount.minor_units(),
        total_selected_available: preview.total_selected_available.minor_units(),
        final_allocation_amount: preview.final_allocation_amount.minor_units(),
        shortfall: preview.shortfall.minor_units(),
    })
}

/// Runs one load, compute and persist cycle.
fn allocate_once(
    persistence: &mut Persistence,
    request: &AllocateDonationsRequest,
    actor: Actor,
    cause: Cause,
) -> Result<(TransitionResult, PersistTransitionResult), ApiError> {
    let lead: Lead = persistence
        .get_lead(request.lead_id)
        .map_err(translate_persistence_error)?;
    let donations: Vec<Donation> = load_donations(persistence, &request.donation_ids)?;
    let state: State = State::with_records(vec![lead], donations);

    let transition: TransitionResult = apply(
        &state,
        Command::AllocateDonations {
            lead_id: request.lead_id,
            donation_ids: request.donation_ids.clone(),
            allocated_at: request.allocated_at,
        },
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let persisted: PersistTransitionResult = persist(persistence, &transition)?;
    Ok((transition, persisted))
}

/// Allocates the selected donations to a lead.
///
/// Donations are drawn from in the order given until the lead's need is met.
/// If another writer changes a lead or donation between loading and
/// persisting, the whole cycle is repeated up to `max_attempts` times.
///
/// A lead that is already fully funded succeeds with no allocations and the
/// message "Allocation already complete".
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The lead, the ordered selection, and the allocation time
/// * `acting_user` - Recorded on every allocation and on the audit event
/// * `cause` - The cause or reason for this action
/// * `max_attempts` - Upper bound on load, compute and persist cycles
///
/// # Errors
///
/// Returns an error if:
/// - The lead or a donation does not exist
/// - A selected donation is not verified or has nothing left
/// - The selection is empty or repeats a donation
/// - The records kept changing for `max_attempts` cycles
pub fn allocate_donations(
    persistence: &mut Persistence,
    request: &AllocateDonationsRequest,
    acting_user: &ActingUser,
    cause: &Cause,
    max_attempts: u32,
) -> Result<AllocateDonationsResponse, ApiError> {
    let ((transition, persisted), attempts) = retry_on_conflict(max_attempts, |attempt| {
        debug!(lead_id = request.lead_id, attempt, "Attempting allocation");
        allocate_once(
            persistence,
            request,
            acting_user.to_audit_actor(),
            cause.clone(),
        )
    })?;

    match transition.change {
        LedgerChange::Allocated { outcome, .. } => {
            allocation_response(&outcome, persisted.event_id, attempts)
        }
        LedgerChange::NothingToAllocate { lead_id } => {
            let lead: Lead = persistence
                .get_lead(lead_id)
                .map_err(translate_persistence_error)?;
            info!(lead_id, "Lead already fully funded");
            Ok(AllocateDonationsResponse {
                lead_id,
                event_id: None,
                allocations: Vec::new(),
                total_allocated: 0,
                help_given: lead.help_given.minor_units(),
                needed_amount: 0,
                attempts,
                message: String::from(ALLOCATION_ALREADY_COMPLETE),
            })
        }
        other => Err(ApiError::Internal {
            message: format!("Unexpected ledger change {other:?}"),
        }),
    }
}

fn allocation_response(
    outcome: &AllocationOutcome,
    event_id: Option<i64>,
    attempts: u32,
) -> Result<AllocateDonationsResponse, ApiError> {
    let shortfall: Amount = outcome.shortfall();

    info!(
        lead_id = outcome.lead_id,
        event_id,
        total_allocated = outcome.total_allocated.minor_units(),
        shortfall = shortfall.minor_units(),
        attempts,
        "Allocated donations"
    );

    let message: String = if shortfall.is_zero() {
        format!(
            "Allocated {} to lead {}; the lead is fully funded",
            outcome.total_allocated, outcome.lead_id
        )
    } else {
        format!(
            "Allocated {} to lead {}; {shortfall} still needed",
            outcome.total_allocated, outcome.lead_id
        )
    };

    Ok(AllocateDonationsResponse {
        lead_id: outcome.lead_id,
        event_id: Some(require_event_id(event_id)?),
        allocations: outcome
            .allocations
            .iter()
            .map(|allocation| AllocatedDonationInfo {
                donation_id: allocation.donation_id,
                amount: allocation.amount.minor_units(),
                available_after: allocation.available_after().minor_units(),
            })
            .collect(),
        total_allocated: outcome.total_allocated.minor_units(),
        help_given: outcome.new_help_given.minor_units(),
        needed_amount: shortfall.minor_units(),
        attempts,
        message,
    })
}

// ============================================================================
// Audit
// ============================================================================

/// Retrieves the audit timeline for a lead, oldest first.
///
/// # Errors
///
/// Returns an error if the lead does not exist.
pub fn get_lead_audit_timeline(
    persistence: &mut Persistence,
    lead_id: i64,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    persistence
        .get_lead(lead_id)
        .map_err(translate_persistence_error)?;
    persistence
        .get_lead_audit_timeline(lead_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(audit_event_to_info)
        .collect()
}

/// Retrieves the audit timeline for a donation, oldest first.
///
/// # Errors
///
/// Returns an error if the donation does not exist.
pub fn get_donation_audit_timeline(
    persistence: &mut Persistence,
    donation_id: i64,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    persistence
        .get_donation(donation_id)
        .map_err(translate_persistence_error)?;
    persistence
        .get_donation_audit_timeline(donation_id)
        .map_err(translate_persistence_error)?
        .iter()
        .map(audit_event_to_info)
        .collect()
}

/// Retrieves a single audit event.
///
/// # Errors
///
/// Returns an error if the event does not exist.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    let event: AuditEvent = persistence
        .get_audit_event(event_id)
        .map_err(translate_persistence_error)?;
    audit_event_to_info(&event)
}
