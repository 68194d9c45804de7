// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, create_test_donation};
use crate::{Command, CoreError, LedgerChange, State, TransitionResult, apply};
use relief_ledger_domain::{DomainError, DonationStatus};

fn state_with(status: DonationStatus) -> State {
    State::with_records(Vec::new(), vec![create_test_donation(7, 1000, 0, status)])
}

#[test]
fn test_pending_donation_can_be_verified() {
    let result: TransitionResult = apply(
        &state_with(DonationStatus::PendingVerification),
        Command::VerifyDonation { donation_id: 7 },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(
        result.change,
        LedgerChange::DonationStatusChanged {
            donation_id: 7,
            from: DonationStatus::PendingVerification,
            to: DonationStatus::Verified,
        }
    );
    assert_eq!(result.audit_event.action.name, "VerifyDonation");
    assert_eq!(result.audit_event.donation_id, Some(7));
    assert_eq!(result.audit_event.before.data, "status=pending_verification");
    assert_eq!(result.audit_event.after.data, "status=verified");
}

#[test]
fn test_pending_donation_can_be_rejected_with_reason() {
    let result: TransitionResult = apply(
        &state_with(DonationStatus::PendingVerification),
        Command::RejectDonation {
            donation_id: 7,
            reason: String::from("Receipt missing"),
        },
        create_test_actor(),
        create_test_cause(),
    )
    .unwrap();

    assert!(matches!(
        result.change,
        LedgerChange::DonationStatusChanged {
            to: DonationStatus::FailedIncomplete,
            ..
        }
    ));
    assert_eq!(result.audit_event.action.name, "RejectDonation");
    assert_eq!(
        result.audit_event.action.details.as_deref(),
        Some("Receipt missing")
    );
}

#[test]
fn test_verified_donation_cannot_be_verified_again() {
    let result: Result<TransitionResult, CoreError> = apply(
        &state_with(DonationStatus::Verified),
        Command::VerifyDonation { donation_id: 7 },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidStatusTransition { .. }
        ))
    ));
}

#[test]
fn test_rejected_donation_is_terminal() {
    for command in [
        Command::VerifyDonation { donation_id: 7 },
        Command::RejectDonation {
            donation_id: 7,
            reason: String::from("again"),
        },
    ] {
        let result: Result<TransitionResult, CoreError> = apply(
            &state_with(DonationStatus::FailedIncomplete),
            command,
            create_test_actor(),
            create_test_cause(),
        );
        assert!(result.is_err());
    }
}

#[test]
fn test_unknown_donation_is_reported() {
    let result: Result<TransitionResult, CoreError> = apply(
        &State::new(),
        Command::VerifyDonation { donation_id: 7 },
        create_test_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::DonationNotFound(7))
    );
}
