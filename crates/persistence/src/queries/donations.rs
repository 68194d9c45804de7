// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Donation queries.
//!
//! A donation is always loaded together with its allocations. The
//! allocation transaction re-checks the `allocated_total` column, which is
//! written in the same transaction as every allocation row and so always
//! equals their sum.

use std::collections::HashMap;
use std::str::FromStr;

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use relief_ledger_domain::{Amount, Donation, DonationAllocation, DonationStatus};

use crate::data_models::{amount_from_db, timestamp_from_db};
use crate::diesel_schema::{allocations, donations};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = donations)]
struct DonationRow {
    donation_id: i64,
    donor_name: String,
    amount: i64,
    status: String,
    notes: Option<String>,
    recorded_at: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = allocations)]
struct DonationAllocationRow {
    donation_id: i64,
    lead_id: i64,
    amount: i64,
    allocated_at: String,
    allocated_by: String,
}

/// The columns the allocation transaction re-reads for one donation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DonationBalance {
    pub status: DonationStatus,
    pub amount: Amount,
    pub allocated: Amount,
}

impl DonationBalance {
    #[must_use]
    pub const fn available(&self) -> Amount {
        self.amount.saturating_sub(self.allocated)
    }
}

fn to_allocation(row: DonationAllocationRow) -> Result<DonationAllocation, PersistenceError> {
    Ok(DonationAllocation {
        lead_id: row.lead_id,
        amount: amount_from_db(row.amount)?,
        allocated_at: timestamp_from_db(&row.allocated_at)?,
        allocated_by: row.allocated_by,
    })
}

fn to_donation(
    row: DonationRow,
    allocations: Vec<DonationAllocation>,
) -> Result<Donation, PersistenceError> {
    let status: DonationStatus = DonationStatus::from_str(&row.status)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
    Ok(Donation::with_id(
        row.donation_id,
        row.donor_name,
        amount_from_db(row.amount)?,
        status,
        allocations,
        timestamp_from_db(&row.recorded_at)?,
        row.notes,
    ))
}

/// Groups allocation rows by donation, keeping insertion order.
fn group_allocations(
    rows: Vec<DonationAllocationRow>,
) -> Result<HashMap<i64, Vec<DonationAllocation>>, PersistenceError> {
    let mut grouped: HashMap<i64, Vec<DonationAllocation>> = HashMap::new();
    for row in rows {
        let donation_id: i64 = row.donation_id;
        grouped
            .entry(donation_id)
            .or_default()
            .push(to_allocation(row)?);
    }
    Ok(grouped)
}

backend_fn! {
/// Retrieves a donation with its allocations.
///
/// # Errors
///
/// Returns `PersistenceError::DonationNotFound` if no such donation exists.
pub fn get_donation(conn: &mut _, donation_id: i64) -> Result<Donation, PersistenceError> {
    let row: DonationRow = donations::table
        .filter(donations::donation_id.eq(donation_id))
        .select(DonationRow::as_select())
        .first::<DonationRow>(conn)
        .optional()?
        .ok_or(PersistenceError::DonationNotFound(donation_id))?;

    let allocation_rows: Vec<DonationAllocationRow> = allocations::table
        .filter(allocations::donation_id.eq(donation_id))
        .order(allocations::allocation_id.asc())
        .select(DonationAllocationRow::as_select())
        .load::<DonationAllocationRow>(conn)?;

    let allocations: Vec<DonationAllocation> = allocation_rows
        .into_iter()
        .map(to_allocation)
        .collect::<Result<_, _>>()?;

    to_donation(row, allocations)
}
}

backend_fn! {
/// Retrieves the given donations with their allocations.
///
/// Identifiers with no matching donation are skipped. The result follows
/// the order of `donation_ids`.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn get_donations(conn: &mut _, donation_ids: &[i64]) -> Result<Vec<Donation>, PersistenceError> {
    if donation_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<DonationRow> = donations::table
        .filter(donations::donation_id.eq_any(donation_ids))
        .select(DonationRow::as_select())
        .load::<DonationRow>(conn)?;

    let allocation_rows: Vec<DonationAllocationRow> = allocations::table
        .filter(allocations::donation_id.eq_any(donation_ids))
        .order(allocations::allocation_id.asc())
        .select(DonationAllocationRow::as_select())
        .load::<DonationAllocationRow>(conn)?;
    let mut grouped: HashMap<i64, Vec<DonationAllocation>> = group_allocations(allocation_rows)?;

    let mut by_id: HashMap<i64, DonationRow> =
        rows.into_iter().map(|row| (row.donation_id, row)).collect();

    let mut result: Vec<Donation> = Vec::with_capacity(by_id.len());
    for donation_id in donation_ids {
        if let Some(row) = by_id.remove(donation_id) {
            let allocations: Vec<DonationAllocation> =
                grouped.remove(donation_id).unwrap_or_default();
            result.push(to_donation(row, allocations)?);
        }
    }
    Ok(result)
}
}

backend_fn! {
/// Retrieves every donation with its allocations, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be reconstructed.
pub fn list_donations(conn: &mut _) -> Result<Vec<Donation>, PersistenceError> {
    let rows: Vec<DonationRow> = donations::table
        .order(donations::donation_id.asc())
        .select(DonationRow::as_select())
        .load::<DonationRow>(conn)?;

    let allocation_rows: Vec<DonationAllocationRow> = allocations::table
        .order(allocations::allocation_id.asc())
        .select(DonationAllocationRow::as_select())
        .load::<DonationAllocationRow>(conn)?;
    let mut grouped: HashMap<i64, Vec<DonationAllocation>> = group_allocations(allocation_rows)?;

    rows.into_iter()
        .map(|row| {
            let allocations: Vec<DonationAllocation> =
                grouped.remove(&row.donation_id).unwrap_or_default();
            to_donation(row, allocations)
        })
        .collect()
}
}

backend_fn! {
/// Reads a donation's status, amount and `allocated_total`.
///
/// Called inside the allocation transaction before the donation is claimed,
/// so a stale snapshot is reported with the balance that replaced it.
///
/// # Errors
///
/// Returns `PersistenceError::DonationNotFound` if no such donation exists.
pub fn get_donation_balance(
    conn: &mut _,
    donation_id: i64,
) -> Result<DonationBalance, PersistenceError> {
    let (amount, status, allocated): (i64, String, i64) = donations::table
        .filter(donations::donation_id.eq(donation_id))
        .select((donations::amount, donations::status, donations::allocated_total))
        .first::<(i64, String, i64)>(conn)
        .optional()?
        .ok_or(PersistenceError::DonationNotFound(donation_id))?;

    Ok(DonationBalance {
        status: DonationStatus::from_str(&status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        amount: amount_from_db(amount)?,
        allocated: amount_from_db(allocated)?,
    })
}
}
