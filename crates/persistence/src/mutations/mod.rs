// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `audit`: audit event persistence
//! - `donations`: donation inserts, status updates and allocation rows
//! - `leads`: lead inserts and amount updates
//! - `transitions`: transactional orchestration (`persist_transition`)
//!
//! Row-level mutations are generated per backend by `backend_fn!`. The
//! orchestration in `transitions` is written out once per backend because it
//! opens the transaction itself.

pub mod audit;
pub mod donations;
pub mod leads;
pub mod transitions;

pub use transitions::{
    PersistTransitionResult, persist_transition_mysql, persist_transition_sqlite,
};
