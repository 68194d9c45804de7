// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LedgerChange, State, TransitionResult};
use relief_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use relief_ledger_domain::{
    AllocationOutcome, AllocationRequest, Amount, DomainError, Donation, DonationSnapshot,
    DonationStatus, Lead, LeadSnapshot, allocate, validate_donation_fields,
    validate_help_requested_revision, validate_lead_fields,
};
use time::OffsetDateTime;

/// Applies a command to the loaded records, producing a ledger change and
/// its audit event.
///
/// The acting user recorded on allocations is `actor.id`.
///
/// # Arguments
///
/// * `state` - The records the command touches (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A referenced lead or donation is not loaded
/// - The command violates domain rules
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::RecordDonation {
            donor_name,
            amount,
            recorded_at,
            notes,
        } => record_donation(donor_name, amount, recorded_at, notes, actor, cause),
        Command::VerifyDonation { donation_id } => change_donation_status(
            state,
            donation_id,
            DonationStatus::Verified,
            Action::new(String::from("VerifyDonation"), None),
            actor,
            cause,
        ),
        Command::RejectDonation {
            donation_id,
            reason,
        } => change_donation_status(
            state,
            donation_id,
            DonationStatus::FailedIncomplete,
            Action::new(String::from("RejectDonation"), Some(reason)),
            actor,
            cause,
        ),
        Command::OpenLead {
            beneficiary_name,
            purpose,
            help_requested,
            opened_at,
        } => open_lead(
            Lead::new(beneficiary_name, purpose, help_requested, opened_at),
            actor,
            cause,
        ),
        Command::ReviseHelpRequested {
            lead_id,
            help_requested,
        } => revise_help_requested(state, lead_id, help_requested, actor, cause),
        Command::AllocateDonations {
            lead_id,
            donation_ids,
            allocated_at,
        } => allocate_donations(state, lead_id, &donation_ids, allocated_at, actor, cause),
    }
}

fn record_donation(
    donor_name: String,
    amount: Amount,
    recorded_at: OffsetDateTime,
    notes: Option<String>,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let donation: Donation = Donation::new(donor_name, amount, recorded_at, notes);
    validate_donation_fields(&donation)?;

    let action: Action = Action::new(
        String::from("RecordDonation"),
        Some(format!(
            "Recorded donation of {} from {}",
            donation.amount, donation.donor_name
        )),
    );
    let before: StateSnapshot = StateSnapshot::new(String::from("donation=none"));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "amount={},status={}",
        donation.amount, donation.status
    ));

    // The donation id is attached once storage assigns it
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionResult {
        change: LedgerChange::DonationRecorded(donation),
        audit_event,
    })
}

fn change_donation_status(
    state: &State,
    donation_id: i64,
    to: DonationStatus,
    action: Action,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let donation: &Donation = state.find_donation(donation_id)?;
    let from: DonationStatus = donation.status;
    from.validate_transition(to)?;

    let before: StateSnapshot = StateSnapshot::new(format!("status={from}"));
    let after: StateSnapshot = StateSnapshot::new(format!("status={to}"));
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).for_donation(donation_id);

    Ok(TransitionResult {
        change: LedgerChange::DonationStatusChanged {
            donation_id,
            from,
            to,
        },
        audit_event,
    })
}

fn open_lead(lead: Lead, actor: Actor, cause: Cause) -> Result<TransitionResult, CoreError> {
    validate_lead_fields(&lead)?;

    let action: Action = Action::new(
        String::from("OpenLead"),
        Some(format!(
            "Opened lead for {} requesting {}",
            lead.beneficiary_name, lead.help_requested
        )),
    );
    let before: StateSnapshot = StateSnapshot::new(String::from("lead=none"));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "help_requested={},help_given={}",
        lead.help_requested, lead.help_given
    ));
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionResult {
        change: LedgerChange::LeadOpened(lead),
        audit_event,
    })
}

fn revise_help_requested(
    state: &State,
    lead_id: i64,
    help_requested: Amount,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let lead: &Lead = state.find_lead(lead_id)?;
    validate_help_requested_revision(lead, help_requested)?;

    let action: Action = Action::new(
        String::from("ReviseHelpRequested"),
        Some(format!(
            "Changed requested help from {} to {help_requested}",
            lead.help_requested
        )),
    );
    let before: StateSnapshot = StateSnapshot::new(format!(
        "help_requested={},help_given={}",
        lead.help_requested, lead.help_given
    ));
    let after: StateSnapshot = StateSnapshot::new(format!(
        "help_requested={help_requested},help_given={}",
        lead.help_given
    ));
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).for_lead(lead_id);

    Ok(TransitionResult {
        change: LedgerChange::HelpRequestedRevised {
            lead_id,
            from: lead.help_requested,
            to: help_requested,
            help_given: lead.help_given,
        },
        audit_event,
    })
}

fn allocate_donations(
    state: &State,
    lead_id: i64,
    donation_ids: &[i64],
    allocated_at: OffsetDateTime,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let lead: LeadSnapshot = state.find_lead(lead_id)?.snapshot()?;

    let before: StateSnapshot = StateSnapshot::new(format!(
        "help_given={},needed={}",
        lead.help_given,
        lead.needed_amount()
    ));

    if lead.needed_amount().is_zero() {
        let action: Action = Action::new(
            String::from("AllocateDonations"),
            Some(String::from("Allocation already complete")),
        );
        let after: StateSnapshot = before.clone();
        let audit_event: AuditEvent =
            AuditEvent::new(actor, cause, action, before, after).for_lead(lead_id);
        return Ok(TransitionResult {
            change: LedgerChange::NothingToAllocate { lead_id },
            audit_event,
        });
    }

    // Only verified donations may be offered to the engine
    let mut donations: Vec<DonationSnapshot> = Vec::with_capacity(donation_ids.len());
    for donation_id in donation_ids {
        let donation: &Donation = state.find_donation(*donation_id)?;
        if donation.status != DonationStatus::Verified {
            return Err(CoreError::DomainViolation(
                DomainError::DonationNotEligible {
                    donation_id: *donation_id,
                    status: donation.status,
                },
            ));
        }
        donations.push(donation.snapshot()?);
    }

    let request: AllocationRequest = AllocationRequest {
        lead,
        donations,
        acting_user_id: actor.id.clone(),
        allocated_at,
    };
    let outcome: AllocationOutcome = allocate(&request)?;

    let action: Action = Action::new(
        String::from("AllocateDonations"),
        Some(format!(
            "Allocated {} from {} donation(s); shortfall {}",
            outcome.total_allocated,
            outcome.allocations.len(),
            outcome.shortfall()
        )),
    );
    let after: StateSnapshot = StateSnapshot::new(format!(
        "help_given={},needed={}",
        outcome.new_help_given,
        outcome.shortfall()
    ));
    let audit_event: AuditEvent =
        AuditEvent::new(actor, cause, action, before, after).for_lead(lead_id);

    Ok(TransitionResult {
        change: LedgerChange::Allocated {
            outcome,
            expected_help_given: lead.help_given,
        },
        audit_event,
    })
}
