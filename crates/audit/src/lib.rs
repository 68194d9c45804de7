// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

#[cfg(test)]
mod tests;

/// Who made a ledger change. For allocations `id` is also the acting user
/// stamped on every allocation row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The kind of actor, currently always `"operator"`.
    pub actor_type: String,
}

impl Actor {
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Why an action was performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// Identifier of the trigger (request ID, receipt number).
    pub id: String,
    /// Human-readable description.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// What was done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The action name (e.g., "`VerifyDonation`", "`AllocateDonations`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A rendering of the affected records at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Serialized state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable record of one ledger change.
///
/// Every successful change produces exactly one audit event, capturing
/// who acted, why, what they did, and the affected state before and after.
/// An event may be tied to a lead, a donation, or both; allocations are tied
/// to the funded lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Storage identifier. `None` until persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this change.
    pub actor: Actor,
    /// The cause or reason for this change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the change.
    pub before: StateSnapshot,
    /// The state after the change.
    pub after: StateSnapshot,
    /// The lead this event concerns, if any.
    pub lead_id: Option<i64>,
    /// The donation this event concerns, if any.
    pub donation_id: Option<i64>,
}

impl AuditEvent {
    /// Creates an event not yet tied to a lead or donation.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the change
    /// * `after` - The state after the change
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            before,
            after,
            lead_id: None,
            donation_id: None,
        }
    }

    /// Ties the event to a lead.
    #[must_use]
    pub const fn for_lead(mut self, lead_id: i64) -> Self {
        self.lead_id = Some(lead_id);
        self
    }

    /// Ties the event to a donation.
    #[must_use]
    pub const fn for_donation(mut self, donation_id: i64) -> Self {
        self.donation_id = Some(donation_id);
        self
    }

    /// Rebuilds a persisted event.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        event_id: i64,
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
        lead_id: Option<i64>,
        donation_id: Option<i64>,
    ) -> Self {
        Self {
            event_id: Some(event_id),
            actor,
            cause,
            action,
            before,
            after,
            lead_id,
            donation_id,
        }
    }
}
