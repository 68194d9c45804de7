// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

use crate::data_models::{ActionData, ActorData, CauseData, StateSnapshotData};
use crate::diesel_schema::{allocations, audit_events};
use crate::error::PersistenceError;

/// Diesel Queryable struct for full audit event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    lead_id: Option<i64>,
    donation_id: Option<i64>,
    actor_json: String,
    cause_json: String,
    action_json: String,
    before_snapshot_json: String,
    after_snapshot_json: String,
}

fn to_audit_event(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let before_data: StateSnapshotData = serde_json::from_str(&row.before_snapshot_json)?;
    let after_data: StateSnapshotData = serde_json::from_str(&row.after_snapshot_json)?;

    Ok(AuditEvent::with_id(
        row.event_id,
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        StateSnapshot::new(before_data.data),
        StateSnapshot::new(after_data.data),
        row.lead_id,
        row.donation_id,
    ))
}

backend_fn! {
/// Retrieves an audit event by ID.
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    to_audit_event(row)
}
}

backend_fn! {
/// Retrieves every audit event tied to a lead, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_lead_audit_timeline(
    conn: &mut _,
    lead_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::lead_id.eq(lead_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(to_audit_event)
        .collect()
}
}

backend_fn! {
/// Retrieves every audit event tied to a donation, oldest first.
///
/// Includes the allocation events that drew from the donation, which are
/// recorded against the funded lead.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_donation_audit_timeline(
    conn: &mut _,
    donation_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut rows: Vec<AuditEventRow> = audit_events::table
        .filter(audit_events::donation_id.eq(donation_id))
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?;

    let allocation_event_ids: Vec<i64> = allocations::table
        .filter(allocations::donation_id.eq(donation_id))
        .select(allocations::audit_event_id)
        .load::<i64>(conn)?;

    if !allocation_event_ids.is_empty() {
        rows.extend(
            audit_events::table
                .filter(audit_events::event_id.eq_any(&allocation_event_ids))
                .select(AuditEventRow::as_select())
                .load::<AuditEventRow>(conn)?,
        );
    }

    rows.sort_by_key(|row| row.event_id);
    rows.dedup_by_key(|row| row.event_id);
    rows.into_iter().map(to_audit_event).collect()
}
}
