// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, AuditEventInfo, allocate_donations, get_audit_event, get_donation_audit_timeline,
    get_lead_audit_timeline,
};

use super::helpers::{
    allocation_request, create_test_cause, create_test_user, open, record_verified, setup,
};

fn action_names(events: &[AuditEventInfo]) -> Vec<&str> {
    events.iter().map(|e| e.action_name.as_str()).collect()
}

#[test]
fn test_lead_timeline_records_allocation() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 400);
    allocate_donations(
        &mut persistence,
        &allocation_request(lead_id, vec![donation_id]),
        &create_test_user(),
        &create_test_cause(),
        3,
    )
    .unwrap();

    let timeline: Vec<AuditEventInfo> = get_lead_audit_timeline(&mut persistence, lead_id).unwrap();

    assert_eq!(action_names(&timeline), vec!["OpenLead", "AllocateDonations"]);
    let allocation_event: &AuditEventInfo = &timeline[1];
    assert_eq!(allocation_event.lead_id, Some(lead_id));
    assert_eq!(allocation_event.actor_id, "operator-7");
    assert_eq!(allocation_event.actor_type, "operator");
    assert_eq!(allocation_event.cause_id, "api-req-456");
    assert_eq!(allocation_event.before_snapshot, "help_given=0.00,needed=10.00");
    assert_eq!(allocation_event.after_snapshot, "help_given=4.00,needed=6.00");
}

#[test]
fn test_donation_timeline_includes_allocations() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 1_000);
    let donation_id: i64 = record_verified(&mut persistence, "Amina Yusuf", 400);
    allocate_donations(
        &mut persistence,
        &allocation_request(lead_id, vec![donation_id]),
        &create_test_user(),
        &create_test_cause(),
        3,
    )
    .unwrap();

    let timeline: Vec<AuditEventInfo> =
        get_donation_audit_timeline(&mut persistence, donation_id).unwrap();

    assert_eq!(
        action_names(&timeline),
        vec!["RecordDonation", "VerifyDonation", "AllocateDonations"]
    );
}

#[test]
fn test_completed_allocation_adds_no_event() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 400);
    let first: i64 = record_verified(&mut persistence, "First Donor", 400);
    let second: i64 = record_verified(&mut persistence, "Second Donor", 400);
    for donation_id in [first, second] {
        allocate_donations(
            &mut persistence,
            &allocation_request(lead_id, vec![donation_id]),
            &create_test_user(),
            &create_test_cause(),
            3,
        )
        .unwrap();
    }

    let timeline: Vec<AuditEventInfo> = get_lead_audit_timeline(&mut persistence, lead_id).unwrap();

    assert_eq!(timeline.len(), 2);
}

#[test]
fn test_get_audit_event_by_id() {
    let mut persistence = setup();
    let lead_id: i64 = open(&mut persistence, "Rahim Family", 400);
    let timeline: Vec<AuditEventInfo> = get_lead_audit_timeline(&mut persistence, lead_id).unwrap();

    let event: AuditEventInfo = get_audit_event(&mut persistence, timeline[0].event_id).unwrap();

    assert_eq!(event, timeline[0]);
}

#[test]
fn test_unknown_audit_event_is_not_found() {
    let mut persistence = setup();

    let result = get_audit_event(&mut persistence, 12_345);

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Audit event"
    ));
}

#[test]
fn test_timeline_for_unknown_lead_is_not_found() {
    let mut persistence = setup();

    let result = get_lead_audit_timeline(&mut persistence, 5);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}
