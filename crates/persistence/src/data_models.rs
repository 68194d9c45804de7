// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use num_traits::ToPrimitive;
use relief_ledger_domain::Amount;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// A stored allocation row, as shown on a lead's funding history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRecord {
    /// Storage identifier.
    pub allocation_id: i64,
    /// The source donation.
    pub donation_id: i64,
    /// The funded lead.
    pub lead_id: i64,
    /// The audit event that recorded the allocation.
    pub audit_event_id: i64,
    /// The amount drawn.
    pub amount: Amount,
    /// When the allocation was made.
    pub allocated_at: OffsetDateTime,
    /// The acting user.
    pub allocated_by: String,
}

/// Converts an amount to its column value.
///
/// # Errors
///
/// Returns an error if the amount does not fit in a BIGINT column.
pub fn amount_to_db(amount: Amount) -> Result<i64, PersistenceError> {
    amount.minor_units().to_i64().ok_or_else(|| {
        PersistenceError::SerializationError(format!("Amount {amount} does not fit in BIGINT"))
    })
}

/// Converts a column value back to an amount.
///
/// # Errors
///
/// Returns an error if the stored value is negative.
pub fn amount_from_db(value: i64) -> Result<Amount, PersistenceError> {
    value.to_u64().map(Amount::new).ok_or_else(|| {
        PersistenceError::ReconstructionError(format!("Negative amount {value} in storage"))
    })
}

/// Formats a timestamp for storage.
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted as RFC 3339.
pub fn timestamp_to_db(timestamp: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(timestamp.format(&Rfc3339)?)
}

/// Parses a stored timestamp.
///
/// # Errors
///
/// Returns an error if the stored value is not RFC 3339.
pub fn timestamp_from_db(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    Ok(OffsetDateTime::parse(value, &Rfc3339)?)
}
