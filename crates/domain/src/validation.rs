// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::amount::Amount;
use crate::donation::Donation;
use crate::error::DomainError;
use crate::lead::Lead;

/// Validates that a donation's basic field constraints are met.
///
/// # Arguments
///
/// * `donation` - The donation to validate
///
/// # Errors
///
/// Returns an error if:
/// - The donor name is blank
/// - The amount is zero
/// - The allocations exceed the amount
pub fn validate_donation_fields(donation: &Donation) -> Result<(), DomainError> {
    if donation.donor_name.trim().is_empty() {
        return Err(DomainError::InvalidDonorName(String::from(
            "Donor name cannot be empty",
        )));
    }

    if donation.amount.is_zero() {
        return Err(DomainError::InvalidAmount(String::from(
            "Donation amount must be greater than zero",
        )));
    }

    let allocated: Amount = donation.allocated_total()?;
    if allocated > donation.amount {
        return Err(DomainError::OverAllocatedDonation {
            donation_id: donation.donation_id(),
            amount: donation.amount,
            allocated,
        });
    }

    Ok(())
}

/// Validates that a lead's basic field constraints are met.
///
/// # Arguments
///
/// * `lead` - The lead to validate
///
/// # Errors
///
/// Returns an error if:
/// - The beneficiary name is blank
/// - The requested amount is zero
/// - More help was given than requested
pub fn validate_lead_fields(lead: &Lead) -> Result<(), DomainError> {
    if lead.beneficiary_name.trim().is_empty() {
        return Err(DomainError::InvalidBeneficiaryName(String::from(
            "Beneficiary name cannot be empty",
        )));
    }

    if lead.help_requested.is_zero() {
        return Err(DomainError::InvalidAmount(String::from(
            "Requested help must be greater than zero",
        )));
    }

    validate_help_requested_revision(lead, lead.help_requested)
}

/// Validates a new requested amount for an existing lead.
///
/// # Errors
///
/// Returns an error if the amount is zero or below what was already given.
pub fn validate_help_requested_revision(
    lead: &Lead,
    help_requested: Amount,
) -> Result<(), DomainError> {
    if help_requested.is_zero() {
        return Err(DomainError::InvalidAmount(String::from(
            "Requested help must be greater than zero",
        )));
    }

    if help_requested < lead.help_given {
        return Err(DomainError::HelpRequestedBelowGiven {
            help_requested,
            help_given: lead.help_given,
        });
    }

    Ok(())
}
