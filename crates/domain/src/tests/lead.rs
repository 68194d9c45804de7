// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::tests::test_time;
use crate::{Amount, DomainError, FundingStatus, Lead, LeadSnapshot};

fn lead_with(help_requested: u32, help_given: u32) -> Lead {
    Lead::with_id(
        3,
        String::from("Ravi Kumar"),
        String::from("School fees"),
        Amount::from_major(help_requested),
        Amount::from_major(help_given),
        test_time(),
    )
}

#[test]
fn test_new_lead_starts_open() {
    let lead: Lead = Lead::new(
        String::from("Ravi Kumar"),
        String::from("School fees"),
        Amount::from_major(5000),
        test_time(),
    );

    assert_eq!(lead.lead_id(), None);
    assert_eq!(lead.help_given, Amount::ZERO);
    assert_eq!(lead.needed_amount(), Amount::from_major(5000));
    assert_eq!(lead.funding_status(), FundingStatus::Open);
}

#[test]
fn test_funding_status_follows_amounts() {
    assert_eq!(lead_with(5000, 0).funding_status(), FundingStatus::Open);
    assert_eq!(
        lead_with(5000, 1).funding_status(),
        FundingStatus::PartiallyFunded
    );
    assert_eq!(lead_with(5000, 5000).funding_status(), FundingStatus::Funded);
}

#[test]
fn test_needed_amount_clamps_at_zero() {
    let lead: Lead = lead_with(4000, 5000);

    assert_eq!(lead.needed_amount(), Amount::ZERO);
    assert_eq!(lead.funding_status(), FundingStatus::Funded);
}

#[test]
fn test_snapshot_matches_lead() {
    let snapshot: LeadSnapshot = lead_with(5000, 1200).snapshot().unwrap();

    assert_eq!(snapshot.lead_id, 3);
    assert_eq!(snapshot.help_requested, Amount::from_major(5000));
    assert_eq!(snapshot.help_given, Amount::from_major(1200));
    assert_eq!(snapshot.needed_amount(), Amount::from_major(3800));
}

#[test]
fn test_snapshot_requires_identifier() {
    let lead: Lead = Lead::new(
        String::from("Ravi Kumar"),
        String::from("School fees"),
        Amount::from_major(5000),
        test_time(),
    );

    assert_eq!(
        lead.snapshot(),
        Err(DomainError::MissingIdentifier { entity: "lead" })
    );
}

#[test]
fn test_funding_status_parses() {
    assert_eq!(
        FundingStatus::from_str("partially_funded").unwrap(),
        FundingStatus::PartiallyFunded
    );
    assert_eq!(FundingStatus::Funded.to_string(), "funded");
    assert!(matches!(
        FundingStatus::from_str("closed"),
        Err(DomainError::InvalidFundingStatus { .. })
    ));
}
