// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger_domain::Lead;

use crate::data_models::{AllocationRecord, amount_from_db, timestamp_from_db};
use crate::diesel_schema::{allocations, leads};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = leads)]
struct LeadRow {
    lead_id: i64,
    beneficiary_name: String,
    purpose: String,
    help_requested: i64,
    help_given: i64,
    opened_at: String,
}

impl TryFrom<LeadRow> for Lead {
    type Error = PersistenceError;

    fn try_from(row: LeadRow) -> Result<Self, Self::Error> {
        Ok(Self::with_id(
            row.lead_id,
            row.beneficiary_name,
            row.purpose,
            amount_from_db(row.help_requested)?,
            amount_from_db(row.help_given)?,
            timestamp_from_db(&row.opened_at)?,
        ))
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = allocations)]
struct AllocationRow {
    allocation_id: i64,
    donation_id: i64,
    lead_id: i64,
    audit_event_id: i64,
    amount: i64,
    allocated_at: String,
    allocated_by: String,
}

backend_fn! {
/// Retrieves a lead.
///
/// # Errors
///
/// Returns `PersistenceError::LeadNotFound` if no such lead exists.
pub fn get_lead(conn: &mut _, lead_id: i64) -> Result<Lead, PersistenceError> {
    leads::table
        .filter(leads::lead_id.eq(lead_id))
        .select(LeadRow::as_select())
        .first::<LeadRow>(conn)
        .optional()?
        .ok_or(PersistenceError::LeadNotFound(lead_id))?
        .try_into()
}
}

backend_fn! {
/// Retrieves every lead, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_leads(conn: &mut _) -> Result<Vec<Lead>, PersistenceError> {
    leads::table
        .order(leads::lead_id.asc())
        .select(LeadRow::as_select())
        .load::<LeadRow>(conn)?
        .into_iter()
        .map(Lead::try_from)
        .collect()
}
}

backend_fn! {
/// Retrieves the allocations made to a lead, in the order they were made.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn get_lead_allocations(
    conn: &mut _,
    lead_id: i64,
) -> Result<Vec<AllocationRecord>, PersistenceError> {
    allocations::table
        .filter(allocations::lead_id.eq(lead_id))
        .order(allocations::allocation_id.asc())
        .select(AllocationRow::as_select())
        .load::<AllocationRow>(conn)?
        .into_iter()
        .map(|row| {
            Ok(AllocationRecord {
                allocation_id: row.allocation_id,
                donation_id: row.donation_id,
                lead_id: row.lead_id,
                audit_event_id: row.audit_event_id,
                amount: amount_from_db(row.amount)?,
                allocated_at: timestamp_from_db(&row.allocated_at)?,
                allocated_by: row.allocated_by,
            })
        })
        .collect()
}
}
