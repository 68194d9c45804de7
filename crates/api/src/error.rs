// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use relief_ledger::CoreError;
use relief_ledger_domain::{AllocationInputError, DomainError};
use relief_ledger_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The records changed while the request was being processed.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidAmount(msg) => ApiError::InvalidInput {
            field: String::from("amount"),
            message: msg,
        },
        DomainError::AmountOverflow { operation } => ApiError::InvalidInput {
            field: String::from("amount"),
            message: format!("Amount overflow while {operation}"),
        },
        DomainError::InvalidDonorName(msg) => ApiError::InvalidInput {
            field: String::from("donor_name"),
            message: msg,
        },
        DomainError::InvalidBeneficiaryName(msg) => ApiError::InvalidInput {
            field: String::from("beneficiary_name"),
            message: msg,
        },
        DomainError::InvalidDonationStatus { status } => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown donation status '{status}'"),
        },
        DomainError::InvalidFundingStatus { status } => ApiError::InvalidInput {
            field: String::from("funding_status"),
            message: format!("Unknown funding status '{status}'"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("donation_status_transition"),
                message: format!("Cannot move donation from {from} to {to}: {reason}"),
            }
        }
        DomainError::HelpRequestedBelowGiven {
            help_requested,
            help_given,
        } => ApiError::DomainRuleViolation {
            rule: String::from("help_requested_covers_given"),
            message: format!(
                "Requested help {help_requested} is below the {help_given} already given"
            ),
        },
        err @ DomainError::OverAllocatedDonation { .. } => ApiError::Internal {
            message: err.to_string(),
        },
        DomainError::InvalidAllocationInput(reason) => translate_allocation_input_error(&reason),
        DomainError::DonationNotEligible {
            donation_id,
            status,
        } => ApiError::DomainRuleViolation {
            rule: String::from("donation_verified"),
            message: format!("Donation {donation_id} is {status} and cannot be allocated"),
        },
        DomainError::DonationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Donation"),
            message: format!("Donation {id} does not exist"),
        },
        DomainError::LeadNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Lead"),
            message: format!("Lead {id} does not exist"),
        },
        DomainError::MissingIdentifier { entity } => ApiError::Internal {
            message: format!("The {entity} has not been persisted yet"),
        },
        DomainError::InvalidPageRequest { reason } => ApiError::InvalidInput {
            field: String::from("page"),
            message: reason,
        },
    }
}

fn translate_allocation_input_error(err: &AllocationInputError) -> ApiError {
    match err {
        AllocationInputError::NoDonationsSelected | AllocationInputError::DuplicateDonation { .. } => {
            ApiError::InvalidInput {
                field: String::from("donation_ids"),
                message: err.to_string(),
            }
        }
        AllocationInputError::DonationExhausted { .. } => ApiError::DomainRuleViolation {
            rule: String::from("donation_has_available_amount"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Missing records become `ResourceNotFound`. Lost races and lock
/// contention become `Conflict`, which the allocation retry loop reruns.
/// Everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::LeadNotFound(id) => translate_domain_error(DomainError::LeadNotFound(id)),
        PersistenceError::DonationNotFound(id) => {
            translate_domain_error(DomainError::DonationNotFound(id))
        }
        PersistenceError::EventNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {id} does not exist"),
        },
        err @ (PersistenceError::ConcurrentModification { .. }
        | PersistenceError::WriteContention(_)) => ApiError::Conflict {
            message: err.to_string(),
        },
        other => ApiError::Internal {
            message: format!("Persistence error: {other}"),
        },
    }
}
