// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{donation_with_available, lead_needing, test_time};
use crate::{
    AllocationInputError, AllocationOutcome, AllocationPreview, AllocationRequest, Amount,
    DomainError, DonationSnapshot, LeadSnapshot, allocate, preview_allocation,
};

fn request(lead: LeadSnapshot, donations: Vec<DonationSnapshot>) -> AllocationRequest {
    AllocationRequest {
        lead,
        donations,
        acting_user_id: String::from("operator-7"),
        allocated_at: test_time(),
    }
}

#[test]
fn test_draws_from_donations_in_order_until_need_is_met() {
    let req: AllocationRequest = request(
        lead_needing(5000, 0),
        vec![
            donation_with_available(11, 3000, 3000),
            donation_with_available(12, 4000, 4000),
        ],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert_eq!(outcome.allocations.len(), 2);
    assert_eq!(outcome.allocations[0].donation_id, 11);
    assert_eq!(outcome.allocations[0].amount, Amount::from_major(3000));
    assert_eq!(outcome.allocations[1].donation_id, 12);
    assert_eq!(outcome.allocations[1].amount, Amount::from_major(2000));
    assert_eq!(outcome.total_allocated, Amount::from_major(5000));
    assert_eq!(outcome.new_help_given, Amount::from_major(5000));
    // D2 keeps the rest of its balance
    assert_eq!(
        outcome.allocations[1].available_after(),
        Amount::from_major(2000)
    );
}

#[test]
fn test_partial_funding_is_not_an_error() {
    let req: AllocationRequest = request(
        lead_needing(5000, 0),
        vec![donation_with_available(11, 2000, 2000)],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert_eq!(outcome.allocations.len(), 1);
    assert_eq!(outcome.total_allocated, Amount::from_major(2000));
    assert_eq!(outcome.new_help_given, Amount::from_major(2000));
    assert_eq!(outcome.shortfall(), Amount::from_major(3000));
}

#[test]
fn test_fully_funded_lead_returns_empty_outcome() {
    let req: AllocationRequest = request(
        lead_needing(5000, 5000),
        vec![donation_with_available(11, 2000, 2000)],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.total_allocated, Amount::ZERO);
    assert_eq!(outcome.new_help_given, Amount::from_major(5000));
}

#[test]
fn test_fully_funded_lead_ignores_invalid_candidates() {
    // Nothing to allocate is checked before the candidate preconditions
    let empty: AllocationRequest = request(lead_needing(5000, 5000), Vec::new());
    assert!(allocate(&empty).unwrap().is_empty());

    let exhausted: AllocationRequest = request(
        lead_needing(5000, 5000),
        vec![donation_with_available(11, 1000, 0)],
    );
    assert!(allocate(&exhausted).unwrap().is_empty());
}

#[test]
fn test_overshot_lead_returns_empty_outcome() {
    let req: AllocationRequest = request(
        lead_needing(4000, 5000),
        vec![donation_with_available(11, 2000, 2000)],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert!(outcome.is_empty());
    assert_eq!(outcome.new_help_given, Amount::from_major(5000));
}

#[test]
fn test_empty_candidate_list_is_rejected() {
    let req: AllocationRequest = request(lead_needing(5000, 0), Vec::new());

    let result: Result<AllocationOutcome, DomainError> = allocate(&req);

    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidAllocationInput(AllocationInputError::NoDonationsSelected)
    );
}

#[test]
fn test_exhausted_candidate_is_rejected() {
    let req: AllocationRequest = request(
        lead_needing(5000, 0),
        vec![
            donation_with_available(11, 2000, 2000),
            donation_with_available(12, 1000, 0),
        ],
    );

    let result: Result<AllocationOutcome, DomainError> = allocate(&req);

    assert_eq!(
        result.unwrap_err(),
        DomainError::InvalidAllocationInput(AllocationInputError::DonationExhausted {
            donation_id: 12
        })
    );
}

#[test]
fn test_over_allocated_candidate_is_rejected_as_exhausted() {
    let donation: DonationSnapshot = DonationSnapshot {
        donation_id: 13,
        amount: Amount::from_major(1000),
        allocations: vec![Amount::from_major(800), Amount::from_major(400)],
    };
    let req: AllocationRequest = request(lead_needing(5000, 0), vec![donation]);

    assert!(matches!(
        allocate(&req),
        Err(DomainError::InvalidAllocationInput(
            AllocationInputError::DonationExhausted { donation_id: 13 }
        ))
    ));
}

#[test]
fn test_duplicate_candidate_is_rejected() {
    let req: AllocationRequest = request(
        lead_needing(5000, 0),
        vec![
            donation_with_available(11, 2000, 2000),
            donation_with_available(11, 2000, 2000),
        ],
    );

    assert!(matches!(
        allocate(&req),
        Err(DomainError::InvalidAllocationInput(
            AllocationInputError::DuplicateDonation { donation_id: 11 }
        ))
    ));
}

#[test]
fn test_stops_once_need_is_met_exactly() {
    let req: AllocationRequest = request(
        lead_needing(3000, 0),
        vec![
            donation_with_available(11, 3000, 3000),
            donation_with_available(12, 1000, 1000),
        ],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert_eq!(outcome.allocations.len(), 1);
    assert_eq!(outcome.allocations[0].donation_id, 11);
    assert!(outcome.allocations.iter().all(|a| a.donation_id != 12));
}

#[test]
fn test_caller_order_decides_which_donation_is_drawn() {
    let first: AllocationRequest = request(
        lead_needing(1000, 0),
        vec![
            donation_with_available(11, 3000, 3000),
            donation_with_available(12, 4000, 4000),
        ],
    );
    let reversed: AllocationRequest = request(
        lead_needing(1000, 0),
        vec![
            donation_with_available(12, 4000, 4000),
            donation_with_available(11, 3000, 3000),
        ],
    );

    assert_eq!(allocate(&first).unwrap().allocations[0].donation_id, 11);
    assert_eq!(allocate(&reversed).unwrap().allocations[0].donation_id, 12);
}

#[test]
fn test_identical_requests_give_identical_outcomes() {
    let req: AllocationRequest = request(
        lead_needing(5000, 1200),
        vec![
            donation_with_available(11, 3000, 1500),
            donation_with_available(12, 4000, 4000),
            donation_with_available(13, 900, 900),
        ],
    );

    assert_eq!(allocate(&req).unwrap(), allocate(&req).unwrap());
}

#[test]
fn test_existing_help_given_reduces_the_need() {
    let req: AllocationRequest = request(
        lead_needing(5000, 1000),
        vec![donation_with_available(11, 6000, 6000)],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();

    assert_eq!(outcome.needed_amount, Amount::from_major(4000));
    assert_eq!(outcome.total_allocated, Amount::from_major(4000));
    assert_eq!(outcome.new_help_given, Amount::from_major(5000));
}

#[test]
fn test_allocations_carry_actor_time_and_balance() {
    let req: AllocationRequest = request(
        lead_needing(5000, 0),
        vec![donation_with_available(11, 3000, 2500)],
    );

    let outcome: AllocationOutcome = allocate(&req).unwrap();
    let allocation = &outcome.allocations[0];

    assert_eq!(allocation.lead_id, 1);
    assert_eq!(allocation.allocated_by, "operator-7");
    assert_eq!(allocation.allocated_at, test_time());
    assert_eq!(allocation.available_before, Amount::from_major(2500));
    assert_eq!(allocation.amount, Amount::from_major(2500));
    assert_eq!(allocation.available_after(), Amount::ZERO);
}

#[test]
fn test_preview_caps_at_needed_amount() {
    let preview: AllocationPreview = preview_allocation(
        &lead_needing(5000, 0),
        &[
            donation_with_available(11, 3000, 3000),
            donation_with_available(12, 4000, 4000),
        ],
    )
    .unwrap();

    assert_eq!(preview.needed_amount, Amount::from_major(5000));
    assert_eq!(preview.total_selected_available, Amount::from_major(7000));
    assert_eq!(preview.final_allocation_amount, Amount::from_major(5000));
    assert_eq!(preview.shortfall, Amount::ZERO);
}

#[test]
fn test_preview_reports_shortfall() {
    let preview: AllocationPreview = preview_allocation(
        &lead_needing(5000, 0),
        &[donation_with_available(11, 2000, 2000)],
    )
    .unwrap();

    assert_eq!(preview.final_allocation_amount, Amount::from_major(2000));
    assert_eq!(preview.shortfall, Amount::from_major(3000));
}

#[test]
fn test_preview_of_empty_selection_is_zero() {
    let preview: AllocationPreview = preview_allocation(&lead_needing(5000, 0), &[]).unwrap();

    assert_eq!(preview.total_selected_available, Amount::ZERO);
    assert_eq!(preview.final_allocation_amount, Amount::ZERO);
    assert_eq!(preview.shortfall, Amount::from_major(5000));
}

#[test]
fn test_preview_matches_allocation_total() {
    let lead: LeadSnapshot = lead_needing(5000, 700);
    let donations: Vec<DonationSnapshot> = vec![
        donation_with_available(11, 3000, 1000),
        donation_with_available(12, 900, 900),
    ];

    let preview: AllocationPreview = preview_allocation(&lead, &donations).unwrap();
    let outcome: AllocationOutcome = allocate(&request(lead, donations)).unwrap();

    assert_eq!(preview.final_allocation_amount, outcome.total_allocated);
}
