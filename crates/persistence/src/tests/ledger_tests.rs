// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use relief_ledger::{Command, LedgerChange, State, TransitionResult};
use relief_ledger_domain::{Amount, DonationStatus};

use super::{apply_command, open_lead, record_donation, record_verified_donation, test_time};
use crate::{Persistence, PersistenceError};

#[test]
fn test_record_donation_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let result: TransitionResult = apply_command(
        &State::new(),
        Command::RecordDonation {
            donor_name: String::from("Asha Trust"),
            amount: Amount::new(12_550),
            recorded_at: test_time(),
            notes: Some(String::from("Bank transfer")),
        },
    );
    let persisted = persistence.persist_transition(&result).unwrap();
    let donation_id: i64 = persisted.created_id.unwrap();
    assert!(persisted.event_id.is_some());

    let donation = persistence.get_donation(donation_id).unwrap();
    assert_eq!(donation.donation_id(), Some(donation_id));
    assert_eq!(donation.donor_name, "Asha Trust");
    assert_eq!(donation.amount, Amount::new(12_550));
    assert_eq!(donation.status, DonationStatus::PendingVerification);
    assert_eq!(donation.notes.as_deref(), Some("Bank transfer"));
    assert_eq!(donation.recorded_at, test_time());
    assert!(donation.allocations.is_empty());
}

#[test]
fn test_open_lead_round_trip() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let lead_id: i64 = open_lead(&mut persistence, "Meera Das", 250);

    let lead = persistence.get_lead(lead_id).unwrap();
    assert_eq!(lead.lead_id(), Some(lead_id));
    assert_eq!(lead.beneficiary_name, "Meera Das");
    assert_eq!(lead.purpose, "Medical treatment");
    assert_eq!(lead.help_requested, Amount::from_major(250));
    assert_eq!(lead.help_given, Amount::ZERO);
    assert_eq!(lead.opened_at, test_time());
}

#[test]
fn test_unknown_records_are_not_found() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    assert!(matches!(
        persistence.get_lead(42),
        Err(PersistenceError::LeadNotFound(42))
    ));
    assert!(matches!(
        persistence.get_donation(42),
        Err(PersistenceError::DonationNotFound(42))
    ));
    assert!(matches!(
        persistence.get_audit_event(42),
        Err(PersistenceError::EventNotFound(42))
    ));
}

#[test]
fn test_get_donations_follows_requested_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let first: i64 = record_donation(&mut persistence, "First", 10);
    let second: i64 = record_donation(&mut persistence, "Second", 20);
    let third: i64 = record_donation(&mut persistence, "Third", 30);

    let donations = persistence.get_donations(&[third, first, second]).unwrap();
    let ids: Vec<Option<i64>> = donations.iter().map(|d| d.donation_id()).collect();

    assert_eq!(ids, vec![Some(third), Some(first), Some(second)]);
}

#[test]
fn test_get_donations_skips_unknown_ids() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let known: i64 = record_donation(&mut persistence, "Known", 10);

    let donations = persistence.get_donations(&[known, 999]).unwrap();

    assert_eq!(donations.len(), 1);
    assert!(persistence.get_donations(&[]).unwrap().is_empty());
}

#[test]
fn test_verify_donation_updates_status() {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let donation_id: i64 = record_verified_donation(&mut persistence, "Asha Trust", 100);

    let donation = persistence.get_donation(donation_id).unwrap();
    assert_eq!(donation.status, DonationStatus::Verified);
}

#[test]
fn test_reject_donation_updates_status() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let donation_id: i64 = record_donation(&mut persistence, "Asha Trust", 100);
    let state = State::with_records(
        Vec::new(),
        vec![persistence.get_donation(donation_id).unwrap()],
    );

    let result = apply_command(
        &state,
        Command::RejectDonation {
            donation_id,
            reason: String::from("Missing receipt"),
        },
    );
    persistence.persist_transition(&result).unwrap();

    let donation = persistence.get_donation(donation_id).unwrap();
    assert_eq!(donation.status, DonationStatus::FailedIncomplete);
}

#[test]
fn test_stale_status_change_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let donation_id: i64 = record_donation(&mut persistence, "Asha Trust", 100);
    let state = State::with_records(
        Vec::new(),
        vec![persistence.get_donation(donation_id).unwrap()],
    );

    let verify = apply_command(&state, Command::VerifyDonation { donation_id });
    let reject = apply_command(
        &state,
        Command::RejectDonation {
            donation_id,
            reason: String::from("Duplicate entry"),
        },
    );

    persistence.persist_transition(&verify).unwrap();
    let err = persistence.persist_transition(&reject).unwrap_err();

    assert!(err.is_concurrent_modification());
    let donation = persistence.get_donation(donation_id).unwrap();
    assert_eq!(donation.status, DonationStatus::Verified);
    assert_eq!(
        persistence
            .get_donation_audit_timeline(donation_id)
            .unwrap()
            .len(),
        2
    );
}

#[test]
fn test_revise_help_requested() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let lead_id: i64 = open_lead(&mut persistence, "Meera Das", 100);
    let state = State::with_records(vec![persistence.get_lead(lead_id).unwrap()], Vec::new());

    let result = apply_command(
        &state,
        Command::ReviseHelpRequested {
            lead_id,
            help_requested: Amount::from_major(180),
        },
    );
    assert!(matches!(
        result.change,
        LedgerChange::HelpRequestedRevised { .. }
    ));
    persistence.persist_transition(&result).unwrap();

    let lead = persistence.get_lead(lead_id).unwrap();
    assert_eq!(lead.help_requested, Amount::from_major(180));
}

#[test]
fn test_stale_revision_is_rejected() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let lead_id: i64 = open_lead(&mut persistence, "Meera Das", 100);
    let state = State::with_records(vec![persistence.get_lead(lead_id).unwrap()], Vec::new());

    let first = apply_command(
        &state,
        Command::ReviseHelpRequested {
            lead_id,
            help_requested: Amount::from_major(150),
        },
    );
    let second = apply_command(
        &state,
        Command::ReviseHelpRequested {
            lead_id,
            help_requested: Amount::from_major(200),
        },
    );

    persistence.persist_transition(&first).unwrap();
    let err = persistence.persist_transition(&second).unwrap_err();

    assert!(matches!(
        err,
        PersistenceError::ConcurrentModification { entity: "lead", .. }
    ));
    assert_eq!(
        persistence.get_lead(lead_id).unwrap().help_requested,
        Amount::from_major(150)
    );
}

#[test]
fn test_list_leads_and_donations_in_insertion_order() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    open_lead(&mut persistence, "First", 10);
    open_lead(&mut persistence, "Second", 20);
    record_donation(&mut persistence, "Donor A", 5);
    record_donation(&mut persistence, "Donor B", 6);

    let leads = persistence.list_leads().unwrap();
    let donations = persistence.list_donations().unwrap();

    assert_eq!(leads[0].beneficiary_name, "First");
    assert_eq!(leads[1].beneficiary_name, "Second");
    assert_eq!(donations[0].donor_name, "Donor A");
    assert_eq!(donations[1].donor_name, "Donor B");
}
