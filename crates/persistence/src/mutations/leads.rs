// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lead row mutations.
//!
//! Updates are compare-and-swap: they only apply if the amounts still
//! match what the caller computed against.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger_domain::{Amount, Lead};

use crate::backend::PersistenceBackend;
use crate::data_models::{amount_to_db, timestamp_to_db};
use crate::diesel_schema::leads;
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new lead and returns its identifier.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_lead(conn: &mut _, lead: &Lead) -> Result<i64, PersistenceError> {
    diesel::insert_into(leads::table)
        .values((
            leads::beneficiary_name.eq(&lead.beneficiary_name),
            leads::purpose.eq(&lead.purpose),
            leads::help_requested.eq(amount_to_db(lead.help_requested)?),
            leads::help_given.eq(amount_to_db(lead.help_given)?),
            leads::opened_at.eq(timestamp_to_db(lead.opened_at)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Replaces a lead's requested amount.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the requested or
/// given amount changed since it was read.
pub fn update_help_requested(
    conn: &mut _,
    lead_id: i64,
    expected_help_requested: Amount,
    expected_help_given: Amount,
    help_requested: Amount,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        leads::table
            .filter(leads::lead_id.eq(lead_id))
            .filter(leads::help_requested.eq(amount_to_db(expected_help_requested)?))
            .filter(leads::help_given.eq(amount_to_db(expected_help_given)?)),
    )
    .set(leads::help_requested.eq(amount_to_db(help_requested)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ConcurrentModification {
            entity: "lead",
            id: lead_id,
            reason: String::from("requested or given amount changed"),
        });
    }
    Ok(())
}
}

backend_fn! {
/// Sets a lead's `help_given` after an allocation.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the requested or
/// given amount changed since it was read.
pub fn update_help_given(
    conn: &mut _,
    lead_id: i64,
    expected_help_requested: Amount,
    expected_help_given: Amount,
    help_given: Amount,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        leads::table
            .filter(leads::lead_id.eq(lead_id))
            .filter(leads::help_requested.eq(amount_to_db(expected_help_requested)?))
            .filter(leads::help_given.eq(amount_to_db(expected_help_given)?)),
    )
    .set(leads::help_given.eq(amount_to_db(help_given)?))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ConcurrentModification {
            entity: "lead",
            id: lead_id,
            reason: format!("help_given is no longer {expected_help_given}"),
        });
    }
    Ok(())
}
}
