// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Amount, DomainError};

#[test]
fn test_from_major_scales_to_minor_units() {
    assert_eq!(Amount::from_major(5000).minor_units(), 500_000);
}

#[test]
fn test_display_formats_two_decimal_places() {
    assert_eq!(Amount::new(500_005).to_string(), "5000.05");
    assert_eq!(Amount::ZERO.to_string(), "0.00");
}

#[test]
fn test_checked_add_overflow_is_an_error() {
    let result: Result<Amount, DomainError> = Amount::new(u64::MAX).checked_add(Amount::new(1));
    assert!(matches!(result, Err(DomainError::AmountOverflow { .. })));
}

#[test]
fn test_saturating_sub_clamps_at_zero() {
    let a: Amount = Amount::from_major(10);
    let b: Amount = Amount::from_major(25);
    assert_eq!(a.saturating_sub(b), Amount::ZERO);
    assert_eq!(b.saturating_sub(a), Amount::from_major(15));
}

#[test]
fn test_checked_sum_of_empty_is_zero() {
    assert_eq!(Amount::checked_sum(Vec::new()).unwrap(), Amount::ZERO);
}

#[test]
fn test_checked_sum_adds_all() {
    let total: Amount = Amount::checked_sum(vec![
        Amount::from_major(1),
        Amount::from_major(2),
        Amount::new(50),
    ])
    .unwrap();
    assert_eq!(total, Amount::new(350));
}
