// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::amount::Amount;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// How far a lead has been funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundingStatus {
    /// Nothing given yet.
    Open,
    /// Some help given, some still needed.
    PartiallyFunded,
    /// Help given has reached the requested amount.
    Funded,
}

impl FundingStatus {
    /// Returns the string representation used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::PartiallyFunded => "partially_funded",
            Self::Funded => "funded",
        }
    }
}

impl FromStr for FundingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "partially_funded" => Ok(Self::PartiallyFunded),
            "funded" => Ok(Self::Funded),
            _ => Err(DomainError::InvalidFundingStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for FundingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A help request for a beneficiary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lead {
    /// The numeric identifier assigned by storage.
    /// `None` indicates the lead has not been persisted yet.
    lead_id: Option<i64>,
    /// Who the help is for.
    pub beneficiary_name: String,
    /// What the help is for.
    pub purpose: String,
    /// Total amount needed.
    pub help_requested: Amount,
    /// Cumulative amount allocated so far.
    pub help_given: Amount,
    /// When the lead was opened.
    pub opened_at: OffsetDateTime,
}

impl Lead {
    /// Creates a new, unpersisted lead with nothing given yet.
    #[must_use]
    pub const fn new(
        beneficiary_name: String,
        purpose: String,
        help_requested: Amount,
        opened_at: OffsetDateTime,
    ) -> Self {
        Self {
            lead_id: None,
            beneficiary_name,
            purpose,
            help_requested,
            help_given: Amount::ZERO,
            opened_at,
        }
    }

    /// Rebuilds a persisted lead.
    #[must_use]
    pub const fn with_id(
        lead_id: i64,
        beneficiary_name: String,
        purpose: String,
        help_requested: Amount,
        help_given: Amount,
        opened_at: OffsetDateTime,
    ) -> Self {
        Self {
            lead_id: Some(lead_id),
            beneficiary_name,
            purpose,
            help_requested,
            help_given,
            opened_at,
        }
    }

    /// Returns the storage identifier if persisted.
    #[must_use]
    pub const fn lead_id(&self) -> Option<i64> {
        self.lead_id
    }

    /// Returns `help_requested - help_given`, clamped at zero.
    #[must_use]
    pub const fn needed_amount(&self) -> Amount {
        self.help_requested.saturating_sub(self.help_given)
    }

    /// Derives the funding status from the amounts.
    #[must_use]
    pub const fn funding_status(&self) -> FundingStatus {
        if self.needed_amount().is_zero() {
            FundingStatus::Funded
        } else if self.help_given.is_zero() {
            FundingStatus::Open
        } else {
            FundingStatus::PartiallyFunded
        }
    }

    /// Builds the view the allocation engine works from.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingIdentifier` if the lead is unpersisted.
    pub fn snapshot(&self) -> Result<LeadSnapshot, DomainError> {
        let lead_id: i64 = self
            .lead_id
            .ok_or(DomainError::MissingIdentifier { entity: "lead" })?;
        Ok(LeadSnapshot {
            lead_id,
            help_requested: self.help_requested,
            help_given: self.help_given,
        })
    }
}

/// The allocation-relevant subset of a lead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadSnapshot {
    /// The lead identifier.
    pub lead_id: i64,
    /// Total amount needed.
    pub help_requested: Amount,
    /// Amount received so far.
    pub help_given: Amount,
}

impl LeadSnapshot {
    /// Returns `help_requested - help_given`, clamped at zero.
    #[must_use]
    pub const fn needed_amount(&self) -> Amount {
        self.help_requested.saturating_sub(self.help_given)
    }
}
