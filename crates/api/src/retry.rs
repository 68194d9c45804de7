// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tracing::warn;

use crate::error::ApiError;

/// Load, compute and persist cycles attempted before a conflict is reported.
pub const DEFAULT_MAX_ALLOCATION_ATTEMPTS: u32 = 3;

/// Runs `operation` until it succeeds, fails with something other than a
/// conflict, or `max_attempts` cycles have run.
///
/// The closure receives the 1-based attempt number. On success the value is
/// returned with the number of attempts used. A `max_attempts` of zero is
/// treated as one.
///
/// # Errors
///
/// Returns the first non-conflict error, or the last conflict once attempts
/// are exhausted.
pub fn retry_on_conflict<T, F>(max_attempts: u32, mut operation: F) -> Result<(T, u32), ApiError>
where
    F: FnMut(u32) -> Result<T, ApiError>,
{
    let max_attempts: u32 = max_attempts.max(1);
    let mut attempt: u32 = 1;

    loop {
        match operation(attempt) {
            Ok(value) => return Ok((value, attempt)),
            Err(ApiError::Conflict { message }) if attempt < max_attempts => {
                warn!(attempt, max_attempts, %message, "Conflict, retrying");
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
