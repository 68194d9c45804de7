// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ALLOCATION_ALREADY_COMPLETE, AllocateDonationsResponse, AllocationPreviewResponse, ApiError,
    DonationInfo, LeadDetailResponse, PreviewAllocationRequest, allocate_donations, get_donation,
    get_lead, preview_lead_allocation,
};

use super::helpers::{
    allocation_request, create_test_cause, create_test_user, open, record, record_verified, setup,
};

fn allocate(
    persistence: &mut relief_ledger_persistence::Persistence,
    lead_id: i64,
    donation_ids: Vec<i64>,
) -> Result<AllocateDonationsResponse, ApiError> {
    allocate_donations(
        persistence,
        &allocation_request(lead_id, donation_ids),
        &create_test_user(),
        &create_test_cause(),
        3,
    )
}

#[test]
fn test_single_donation_covers_lead() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 1_500);

    let response: AllocateDonationsResponse =
        allocate(&mut persistence, lead_id, vec![donation_id]).unwrap();

    assert!(response.event_id.is_some());
    assert_eq!(response.attempts, 1);
    assert_eq!(response.total_allocated, 1_000);
    assert_eq!(response.help_given, 1_000);
    assert_eq!(response.needed_amount, 0);
    assert_eq!(response.allocations.len(), 1);
    assert_eq!(response.allocations[0].amount, 1_000);
    assert_eq!(response.allocations[0].available_after, 500);

    let donation: DonationInfo = get_donation(&mut persistence, donation_id).unwrap();
    assert_eq!(donation.status, "verified");
    assert_eq!(donation.available_amount, 500);
    assert_eq!(donation.allocations.len(), 1);
    assert_eq!(donation.allocations[0].lead_id, lead_id);
    assert_eq!(donation.allocations[0].allocated_by, "operator-7");
}

#[test]
fn test_donations_are_drawn_in_caller_order() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let first: i64 = record_verified(&mut persistence, "First Donor", 300);
    let second: i64 = record_verified(&mut persistence, "Second Donor", 500);
    let third: i64 = record_verified(&mut persistence, "Third Donor", 800);

    let response: AllocateDonationsResponse =
        allocate(&mut persistence, lead_id, vec![first, second, third]).unwrap();

    let drawn: Vec<(i64, u64)> = response
        .allocations
        .iter()
        .map(|a| (a.donation_id, a.amount))
        .collect();
    assert_eq!(drawn, vec![(first, 300), (second, 500), (third, 200)]);

    assert_eq!(
        get_donation(&mut persistence, first).unwrap().status,
        "allocated"
    );
    assert_eq!(
        get_donation(&mut persistence, second).unwrap().status,
        "allocated"
    );
    let remaining: DonationInfo = get_donation(&mut persistence, third).unwrap();
    assert_eq!(remaining.status, "verified");
    assert_eq!(remaining.available_amount, 600);
}

#[test]
fn test_insufficient_donations_leave_shortfall() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 400);

    let response: AllocateDonationsResponse =
        allocate(&mut persistence, lead_id, vec![donation_id]).unwrap();

    assert_eq!(response.total_allocated, 400);
    assert_eq!(response.needed_amount, 600);

    let detail: LeadDetailResponse = get_lead(&mut persistence, lead_id).unwrap();
    assert_eq!(detail.lead.funding_status, "partially_funded");
    assert_eq!(detail.lead.help_given, 400);
    assert_eq!(detail.allocations.len(), 1);
    assert_eq!(Some(detail.allocations[0].audit_event_id), response.event_id);
}

#[test]
fn test_funded_lead_reports_already_complete() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 500);
    let first: i64 = record_verified(&mut persistence, "First Donor", 500);
    let second: i64 = record_verified(&mut persistence, "Second Donor", 500);
    allocate(&mut persistence, lead_id, vec![first]).unwrap();

    let response: AllocateDonationsResponse =
        allocate(&mut persistence, lead_id, vec![second]).unwrap();

    assert_eq!(response.message, ALLOCATION_ALREADY_COMPLETE);
    assert_eq!(response.event_id, None);
    assert!(response.allocations.is_empty());
    assert_eq!(response.total_allocated, 0);
    assert_eq!(response.help_given, 500);

    let untouched: DonationInfo = get_donation(&mut persistence, second).unwrap();
    assert_eq!(untouched.available_amount, 500);
    assert!(untouched.allocations.is_empty());
}

#[test]
fn test_pending_donation_cannot_be_allocated() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 500);
    let donation_id: i64 = record(&mut persistence, "Amina Yusuf", 500);

    let result = allocate(&mut persistence, lead_id, vec![donation_id]);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "donation_verified"
    ));
    let detail: LeadDetailResponse = get_lead(&mut persistence, lead_id).unwrap();
    assert_eq!(detail.lead.help_given, 0);
}

#[test]
fn test_fully_allocated_donation_cannot_be_reused() {
    let mut persistence = setup();
    let first_lead: i64 = open(&mut persistence, "First Lead", 500);
    let second_lead: i64 = open(&mut persistence, "Second Lead", 500);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 500);
    allocate(&mut persistence, first_lead, vec![donation_id]).unwrap();

    let result = allocate(&mut persistence, second_lead, vec![donation_id]);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "donation_verified"
    ));
}

#[test]
fn test_unknown_donation_is_not_found() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 500);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 500);

    let result = allocate(&mut persistence, lead_id, vec![donation_id, 999]);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Donation"
    ));
    let donation: DonationInfo = get_donation(&mut persistence, donation_id).unwrap();
    assert_eq!(donation.available_amount, 500);
}

#[test]
fn test_unknown_lead_is_not_found() {
    let mut persistence = setup();
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 500);

    let result = allocate(&mut persistence, 77, vec![donation_id]);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Lead"
    ));
}

#[test]
fn test_empty_selection_is_invalid() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 500);

    let result = allocate(&mut persistence, lead_id, Vec::new());

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "donation_ids"
    ));
}

#[test]
fn test_repeated_donation_is_invalid() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 500);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 200);

    let result = allocate(&mut persistence, lead_id, vec![donation_id, donation_id]);

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "donation_ids"
    ));
}

#[test]
fn test_preview_summarizes_without_writing() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let first: i64 = record_verified(&mut persistence, "First Donor", 300);
    let second: i64 = record_verified(&mut persistence, "Second Donor", 500);

    let preview: AllocationPreviewResponse = preview_lead_allocation(
        &mut persistence,
        &PreviewAllocationRequest {
            lead_id,
            donation_ids: vec![first, second],
        },
    )
    .unwrap();

    assert_eq!(preview.needed_amount, 1_000);
    assert_eq!(preview.total_selected_available, 800);
    assert_eq!(preview.final_allocation_amount, 800);
    assert_eq!(preview.shortfall, 200);

    let detail: LeadDetailResponse = get_lead(&mut persistence, lead_id).unwrap();
    assert_eq!(detail.lead.help_given, 0);
    assert!(detail.allocations.is_empty());
}

#[test]
fn test_preview_caps_at_need() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 5_000);

    let preview: AllocationPreviewResponse = preview_lead_allocation(
        &mut persistence,
        &PreviewAllocationRequest {
            lead_id,
            donation_ids: vec![donation_id],
        },
    )
    .unwrap();

    assert_eq!(preview.total_selected_available, 5_000);
    assert_eq!(preview.final_allocation_amount, 1_000);
    assert_eq!(preview.shortfall, 0);
}

#[test]
fn test_preview_rejects_unverified_donation() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record(&mut persistence, "Amina Yusuf", 500);

    let result = preview_lead_allocation(
        &mut persistence,
        &PreviewAllocationRequest {
            lead_id,
            donation_ids: vec![donation_id],
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "donation_verified"
    ));
}

#[test]
fn test_preview_names_the_unverified_donation() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let verified: i64 = record_verified(&mut persistence, "First Donor", 300);
    let pending: i64 = record(&mut persistence, "Amina Yusuf", 500);

    let err: ApiError = preview_lead_allocation(
        &mut persistence,
        &PreviewAllocationRequest {
            lead_id,
            donation_ids: vec![verified, pending],
        },
    )
    .unwrap_err();

    let ApiError::DomainRuleViolation { ref message, .. } = err else {
        panic!("expected a rule violation, got {err:?}");
    };
    assert_eq!(
        *message,
        format!("Donation {pending} is pending_verification and cannot be allocated")
    );
}
