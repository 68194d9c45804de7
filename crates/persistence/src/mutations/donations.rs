// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation and allocation row mutations.
//!
//! Status updates are conditional on the status the caller read, so a
//! concurrent change is reported rather than overwritten. Every draw on a
//! donation goes through `claim_donation_amount`, which writes the donation
//! row itself. Two transactions drawing on one donation therefore always
//! contend for that row, even when neither exhausts it.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger_domain::{Allocation, Amount, Donation, DonationStatus};

use crate::backend::PersistenceBackend;
use crate::data_models::{amount_to_db, timestamp_to_db};
use crate::diesel_schema::{allocations, donations};
use crate::error::PersistenceError;

backend_fn! {
/// Inserts a new donation and returns its identifier.
///
/// Existing allocations on `donation` are not written.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_donation(conn: &mut _, donation: &Donation) -> Result<i64, PersistenceError> {
    diesel::insert_into(donations::table)
        .values((
            donations::donor_name.eq(&donation.donor_name),
            donations::amount.eq(amount_to_db(donation.amount)?),
            donations::status.eq(donation.status.as_str()),
            donations::notes.eq(donation.notes.as_deref()),
            donations::recorded_at.eq(timestamp_to_db(donation.recorded_at)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
}

backend_fn! {
/// Moves a donation from `from` to `to`.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if the donation is no
/// longer in `from`.
pub fn update_donation_status(
    conn: &mut _,
    donation_id: i64,
    from: DonationStatus,
    to: DonationStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        donations::table
            .filter(donations::donation_id.eq(donation_id))
            .filter(donations::status.eq(from.as_str())),
    )
    .set(donations::status.eq(to.as_str()))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ConcurrentModification {
            entity: "donation",
            id: donation_id,
            reason: format!("status is no longer {from}"),
        });
    }
    Ok(())
}
}

backend_fn! {
/// Inserts one allocation row linked to the audit event that recorded it.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_allocation(
    conn: &mut _,
    allocation: &Allocation,
    audit_event_id: i64,
) -> Result<(), PersistenceError> {
    diesel::insert_into(allocations::table)
        .values((
            allocations::donation_id.eq(allocation.donation_id),
            allocations::lead_id.eq(allocation.lead_id),
            allocations::audit_event_id.eq(audit_event_id),
            allocations::amount.eq(amount_to_db(allocation.amount)?),
            allocations::allocated_at.eq(timestamp_to_db(allocation.allocated_at)?),
            allocations::allocated_by.eq(&allocation.allocated_by),
        ))
        .execute(conn)?;
    Ok(())
}
}

backend_fn! {
/// Adds `drawn` to a verified donation's `allocated_total`.
///
/// The update only matches while the donation is still `Verified` and its
/// total is still `expected_total`. When the new total reaches `amount` the
/// donation moves to `Allocated` in the same statement.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if another writer
/// changed the donation first.
pub fn claim_donation_amount(
    conn: &mut _,
    donation_id: i64,
    amount: Amount,
    expected_total: Amount,
    drawn: Amount,
) -> Result<Amount, PersistenceError> {
    let new_total: Amount = expected_total
        .checked_add(drawn)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;
    let status: DonationStatus = if new_total >= amount {
        DonationStatus::Allocated
    } else {
        DonationStatus::Verified
    };

    let updated: usize = diesel::update(
        donations::table
            .filter(donations::donation_id.eq(donation_id))
            .filter(donations::status.eq(DonationStatus::Verified.as_str()))
            .filter(donations::allocated_total.eq(amount_to_db(expected_total)?)),
    )
    .set((
        donations::allocated_total.eq(amount_to_db(new_total)?),
        donations::status.eq(status.as_str()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::ConcurrentModification {
            entity: "donation",
            id: donation_id,
            reason: format!("allocated total is no longer {expected_total}"),
        });
    }
    Ok(new_total)
}
}
