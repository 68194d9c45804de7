// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ApiError, retry_on_conflict};

fn conflict() -> ApiError {
    ApiError::Conflict {
        message: String::from("lead 1 changed"),
    }
}

#[test]
fn test_first_success_uses_one_attempt() {
    let result: Result<(&str, u32), ApiError> = retry_on_conflict(3, |_| Ok("done"));

    assert_eq!(result, Ok(("done", 1)));
}

#[test]
fn test_conflicts_are_retried_until_success() {
    let mut calls: u32 = 0;

    let result = retry_on_conflict(3, |attempt| {
        calls += 1;
        if attempt < 3 { Err(conflict()) } else { Ok(attempt) }
    });

    assert_eq!(result, Ok((3, 3)));
    assert_eq!(calls, 3);
}

#[test]
fn test_conflict_reported_after_last_attempt() {
    let mut calls: u32 = 0;

    let result: Result<((), u32), ApiError> = retry_on_conflict(2, |_| {
        calls += 1;
        Err(conflict())
    });

    assert_eq!(result, Err(conflict()));
    assert_eq!(calls, 2);
}

#[test]
fn test_other_errors_are_not_retried() {
    let mut calls: u32 = 0;

    let result: Result<((), u32), ApiError> = retry_on_conflict(5, |_| {
        calls += 1;
        Err(ApiError::InvalidInput {
            field: String::from("donation_ids"),
            message: String::from("No donations selected"),
        })
    });

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert_eq!(calls, 1);
}

#[test]
fn test_zero_attempts_still_runs_once() {
    let mut calls: u32 = 0;

    let result: Result<((), u32), ApiError> = retry_on_conflict(0, |_| {
        calls += 1;
        Err(conflict())
    });

    assert!(result.is_err());
    assert_eq!(calls, 1);
}
