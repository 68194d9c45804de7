// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod ledger_tests;

use relief_ledger::{Command, State, TransitionResult, apply};
use relief_ledger_audit::{Actor, Cause};
use relief_ledger_domain::Amount;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{PersistTransitionResult, Persistence, PersistenceError};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("operator-7"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn test_time() -> OffsetDateTime {
    datetime!(2026-03-02 14:00 UTC)
}

pub fn apply_command(state: &State, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}

/// Records a pending donation and returns its ID.
pub fn record_donation(persistence: &mut Persistence, donor_name: &str, amount: u32) -> i64 {
    let result: TransitionResult = apply_command(
        &State::new(),
        Command::RecordDonation {
            donor_name: String::from(donor_name),
            amount: Amount::from_major(amount),
            recorded_at: test_time(),
            notes: None,
        },
    );
    persistence
        .persist_transition(&result)
        .unwrap()
        .created_id
        .unwrap()
}

/// Records and verifies a donation, returning its ID.
pub fn record_verified_donation(
    persistence: &mut Persistence,
    donor_name: &str,
    amount: u32,
) -> i64 {
    let donation_id: i64 = record_donation(persistence, donor_name, amount);
    let state: State = State::with_records(
        Vec::new(),
        vec![persistence.get_donation(donation_id).unwrap()],
    );
    let result: TransitionResult = apply_command(&state, Command::VerifyDonation { donation_id });
    persistence.persist_transition(&result).unwrap();
    donation_id
}

/// Opens a lead and returns its ID.
pub fn open_lead(persistence: &mut Persistence, beneficiary_name: &str, help_requested: u32) -> i64 {
    let result: TransitionResult = apply_command(
        &State::new(),
        Command::OpenLead {
            beneficiary_name: String::from(beneficiary_name),
            purpose: String::from("Medical treatment"),
            help_requested: Amount::from_major(help_requested),
            opened_at: test_time(),
        },
    );
    persistence
        .persist_transition(&result)
        .unwrap()
        .created_id
        .unwrap()
}

/// Loads the lead and donations and computes an allocation.
pub fn compute_allocation(
    persistence: &mut Persistence,
    lead_id: i64,
    donation_ids: &[i64],
) -> TransitionResult {
    let state: State = State::with_records(
        vec![persistence.get_lead(lead_id).unwrap()],
        persistence.get_donations(donation_ids).unwrap(),
    );
    apply_command(
        &state,
        Command::AllocateDonations {
            lead_id,
            donation_ids: donation_ids.to_vec(),
            allocated_at: test_time(),
        },
    )
}

/// A database file under the temp dir, removed on drop.
pub struct TempDatabase {
    pub path: PathBuf,
}

impl TempDatabase {
    pub fn new(name: &str) -> Self {
        let path: PathBuf = std::env::temp_dir().join(format!(
            "relief_ledger_{name}_{}.sqlite3",
            std::process::id()
        ));
        Self::remove_files(&path);
        Self { path }
    }

    fn remove_files(path: &Path) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = path.as_os_str().to_owned();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        Self::remove_files(&self.path);
    }
}

/// Computes and persists an allocation.
pub fn allocate(
    persistence: &mut Persistence,
    lead_id: i64,
    donation_ids: &[i64],
) -> Result<PersistTransitionResult, PersistenceError> {
    let result: TransitionResult = compute_allocation(persistence, lead_id, donation_ids);
    persistence.persist_transition(&result)
}
