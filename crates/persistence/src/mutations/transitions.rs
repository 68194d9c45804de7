// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition orchestration.
//!
//! Turns a core `TransitionResult` into row writes. Each transition is
//! applied inside a single database transaction together with its audit
//! event, so a failed check leaves no partial allocation behind.
//!
//! An allocation claims each source donation with a compare-and-swap on
//! `donations.allocated_total` and then updates the lead the same way. On
//! `MySQL` the claim's row lock makes a concurrent claim wait and then match
//! no rows; on `SQLite` the whole transaction runs under the write lock.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger::{LedgerChange, TransitionResult};
use relief_ledger_audit::AuditEvent;
use relief_ledger_domain::{Allocation, Amount, DonationStatus};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
use crate::mutations::donations::{
    claim_donation_amount_mysql, claim_donation_amount_sqlite, insert_allocation_mysql,
    insert_allocation_sqlite, insert_donation_mysql, insert_donation_sqlite,
    update_donation_status_mysql, update_donation_status_sqlite,
};
use crate::mutations::leads::{
    insert_lead_mysql, insert_lead_sqlite, update_help_given_mysql, update_help_given_sqlite,
    update_help_requested_mysql, update_help_requested_sqlite,
};
use crate::queries::donations::{
    DonationBalance, get_donation_balance_mysql, get_donation_balance_sqlite,
};

/// Identifiers assigned while persisting a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistTransitionResult {
    /// The persisted audit event, if anything was written.
    pub event_id: Option<i64>,
    /// The new donation or lead, for record and open transitions.
    pub created_id: Option<i64>,
}

/// Applies a transition's ledger change and audit event in one transaction - ``SQLite`` version.
///
/// Every row update is conditional on the values the transition was computed
/// from. If another writer got there first the whole transaction is rolled
/// back and `PersistenceError::ConcurrentModification` is returned.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The audit event ID and, for inserts, the new record's ID. A transition
/// that changes nothing writes nothing and returns no event ID.
///
/// # Errors
///
/// Returns an error if persistence fails or a snapshot is stale.
pub fn persist_transition_sqlite(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    if result.change.is_noop() {
        debug!(action = %result.audit_event.action.name, "Nothing to persist");
        return Ok(PersistTransitionResult::default());
    }

    let created_at: OffsetDateTime = OffsetDateTime::now_utc();

    // BEGIN IMMEDIATE takes the write lock before the re-checks run, so a
    // second process cannot commit between our reads and our writes
    let persisted: PersistTransitionResult =
        conn.immediate_transaction::<_, PersistenceError, _>(|conn| match &result.change {
            LedgerChange::DonationRecorded(donation) => {
                let donation_id: i64 = insert_donation_sqlite(conn, donation)?;
                let event: AuditEvent = result.audit_event.clone().for_donation(donation_id);
                let event_id: i64 = persist_audit_event_sqlite(conn, &event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: Some(donation_id),
                })
            }
            LedgerChange::LeadOpened(lead) => {
                let lead_id: i64 = insert_lead_sqlite(conn, lead)?;
                let event: AuditEvent = result.audit_event.clone().for_lead(lead_id);
                let event_id: i64 = persist_audit_event_sqlite(conn, &event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: Some(lead_id),
                })
            }
            LedgerChange::DonationStatusChanged {
                donation_id,
                from,
                to,
            } => {
                update_donation_status_sqlite(conn, *donation_id, *from, *to)?;
                let event_id: i64 =
                    persist_audit_event_sqlite(conn, &result.audit_event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::HelpRequestedRevised {
                lead_id,
                from,
                to,
                help_given,
            } => {
                update_help_requested_sqlite(conn, *lead_id, *from, *help_given, *to)?;
                let event_id: i64 =
                    persist_audit_event_sqlite(conn, &result.audit_event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::Allocated {
                outcome,
                expected_help_given,
            } => {
                // Claim every donation first: the claim is what makes two
                // writers drawing on one donation conflict
                for allocation in &outcome.allocations {
                    claim_donation_sqlite(conn, allocation)?;
                }

                let event_id: i64 =
                    persist_audit_event_sqlite(conn, &result.audit_event, created_at)?;

                for allocation in &outcome.allocations {
                    insert_allocation_sqlite(conn, allocation, event_id)?;
                }

                let expected_help_requested: Amount = expected_help_given
                    .checked_add(outcome.needed_amount)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
                update_help_given_sqlite(
                    conn,
                    outcome.lead_id,
                    expected_help_requested,
                    *expected_help_given,
                    outcome.new_help_given,
                )?;

                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::NothingToAllocate { .. } => Ok(PersistTransitionResult::default()),
        })?;

    info!(
        event_id = persisted.event_id,
        action = %result.audit_event.action.name,
        "Persisted transition"
    );

    Ok(persisted)
}

/// Re-checks a donation against the balance an allocation was computed
/// from, then claims the drawn amount on the donation row - ``SQLite`` version.
fn claim_donation_sqlite(
    conn: &mut SqliteConnection,
    allocation: &Allocation,
) -> Result<(), PersistenceError> {
    let balance: DonationBalance = get_donation_balance_sqlite(conn, allocation.donation_id)?;
    check_donation_balance(&balance, allocation)?;

    let new_total: Amount = claim_donation_amount_sqlite(
        conn,
        allocation.donation_id,
        balance.amount,
        balance.allocated,
        allocation.amount,
    )?;
    if new_total >= balance.amount {
        debug!(donation_id = allocation.donation_id, "Donation fully allocated");
    }
    Ok(())
}

/// Applies a transition's ledger change and audit event in one transaction - ``MySQL`` version.
///
/// Every row update is conditional on the values the transition was computed
/// from. If another writer got there first the whole transaction is rolled
/// back and `PersistenceError::ConcurrentModification` is returned.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `result` - The transition result to persist
///
/// # Returns
///
/// The audit event ID and, for inserts, the new record's ID. A transition
/// that changes nothing writes nothing and returns no event ID.
///
/// # Errors
///
/// Returns an error if persistence fails or a snapshot is stale.
pub fn persist_transition_mysql(
    conn: &mut MysqlConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    if result.change.is_noop() {
        debug!(action = %result.audit_event.action.name, "Nothing to persist");
        return Ok(PersistTransitionResult::default());
    }

    let created_at: OffsetDateTime = OffsetDateTime::now_utc();

    let persisted: PersistTransitionResult =
        conn.transaction::<_, PersistenceError, _>(|conn| match &result.change {
            LedgerChange::DonationRecorded(donation) => {
                let donation_id: i64 = insert_donation_mysql(conn, donation)?;
                let event: AuditEvent = result.audit_event.clone().for_donation(donation_id);
                let event_id: i64 = persist_audit_event_mysql(conn, &event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: Some(donation_id),
                })
            }
            LedgerChange::LeadOpened(lead) => {
                let lead_id: i64 = insert_lead_mysql(conn, lead)?;
                let event: AuditEvent = result.audit_event.clone().for_lead(lead_id);
                let event_id: i64 = persist_audit_event_mysql(conn, &event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: Some(lead_id),
                })
            }
            LedgerChange::DonationStatusChanged {
                donation_id,
                from,
                to,
            } => {
                update_donation_status_mysql(conn, *donation_id, *from, *to)?;
                let event_id: i64 =
                    persist_audit_event_mysql(conn, &result.audit_event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::HelpRequestedRevised {
                lead_id,
                from,
                to,
                help_given,
            } => {
                update_help_requested_mysql(conn, *lead_id, *from, *help_given, *to)?;
                let event_id: i64 =
                    persist_audit_event_mysql(conn, &result.audit_event, created_at)?;
                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::Allocated {
                outcome,
                expected_help_given,
            } => {
                // Claim every donation first: the claim is what makes two
                // writers drawing on one donation conflict
                for allocation in &outcome.allocations {
                    claim_donation_mysql(conn, allocation)?;
                }

                let event_id: i64 =
                    persist_audit_event_mysql(conn, &result.audit_event, created_at)?;

                for allocation in &outcome.allocations {
                    insert_allocation_mysql(conn, allocation, event_id)?;
                }

                let expected_help_requested: Amount = expected_help_given
                    .checked_add(outcome.needed_amount)
                    .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
                update_help_given_mysql(
                    conn,
                    outcome.lead_id,
                    expected_help_requested,
                    *expected_help_given,
                    outcome.new_help_given,
                )?;

                Ok(PersistTransitionResult {
                    event_id: Some(event_id),
                    created_id: None,
                })
            }
            LedgerChange::NothingToAllocate { .. } => Ok(PersistTransitionResult::default()),
        })?;

    info!(
        event_id = persisted.event_id,
        action = %result.audit_event.action.name,
        "Persisted transition"
    );

    Ok(persisted)
}

/// Re-checks a donation against the balance an allocation was computed
/// from, then claims the drawn amount on the donation row - ``MySQL`` version.
fn claim_donation_mysql(
    conn: &mut MysqlConnection,
    allocation: &Allocation,
) -> Result<(), PersistenceError> {
    let balance: DonationBalance = get_donation_balance_mysql(conn, allocation.donation_id)?;
    check_donation_balance(&balance, allocation)?;

    let new_total: Amount = claim_donation_amount_mysql(
        conn,
        allocation.donation_id,
        balance.amount,
        balance.allocated,
        allocation.amount,
    )?;
    if new_total >= balance.amount {
        debug!(donation_id = allocation.donation_id, "Donation fully allocated");
    }
    Ok(())
}

fn check_donation_balance(
    balance: &DonationBalance,
    allocation: &Allocation,
) -> Result<(), PersistenceError> {
    if balance.status != DonationStatus::Verified {
        return Err(PersistenceError::ConcurrentModification {
            entity: "donation",
            id: allocation.donation_id,
            reason: format!("status is now {}", balance.status),
        });
    }

    if balance.available() != allocation.available_before {
        return Err(PersistenceError::ConcurrentModification {
            entity: "donation",
            id: allocation.donation_id,
            reason: format!(
                "available amount is {}, expected {}",
                balance.available(),
                allocation.available_before
            ),
        });
    }

    Ok(())
}
