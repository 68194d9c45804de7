// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `audit`: audit events and timelines
//! - `donations`: donations with their allocations, available balances
//! - `leads`: leads and their funding history
//!
//! Every query exists as a `_sqlite` and a `_mysql` function generated by
//! `backend_fn!`. The `Persistence` adapter in `lib.rs` picks one.

pub mod audit;
pub mod donations;
pub mod leads;

pub use audit::{
    get_audit_event_mysql, get_audit_event_sqlite, get_donation_audit_timeline_mysql,
    get_donation_audit_timeline_sqlite, get_lead_audit_timeline_mysql,
    get_lead_audit_timeline_sqlite,
};
pub use donations::{
    get_donation_mysql, get_donation_sqlite, get_donations_mysql, get_donations_sqlite,
    list_donations_mysql, list_donations_sqlite,
};
pub use leads::{
    get_lead_allocations_mysql, get_lead_allocations_sqlite, get_lead_mysql, get_lead_sqlite,
    list_leads_mysql, list_leads_sqlite,
};
