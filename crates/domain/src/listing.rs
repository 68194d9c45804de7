// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory filtering, sorting and pagination for operator lists.
//!
//! Sorting is stable: records that compare equal keep their input order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::donation::{Donation, DonationStatus};
use crate::error::DomainError;
use crate::lead::{FundingStatus, Lead};

/// Largest page size a caller may request.
pub const MAX_PER_PAGE: u32 = 100;

/// Page size used when none is given.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Validates the page bounds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPageRequest` if `page` is zero or
    /// `per_page` is outside `1..=MAX_PER_PAGE`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.page == 0 {
            return Err(DomainError::InvalidPageRequest {
                reason: String::from("page numbers start at 1"),
            });
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(DomainError::InvalidPageRequest {
                reason: format!("per_page must be between 1 and {MAX_PER_PAGE}"),
            });
        }
        Ok(())
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The page number.
    pub page: u32,
    /// The page size.
    pub per_page: u32,
    /// Matching items across all pages.
    pub total_items: usize,
    /// Number of pages.
    pub total_pages: usize,
}

fn paginate<T>(items: Vec<T>, request: PageRequest) -> Result<Page<T>, DomainError> {
    request.validate()?;

    let per_page: usize = request.per_page as usize;
    let total_items: usize = items.len();
    let total_pages: usize = total_items.div_ceil(per_page);
    let skip: usize = (request.page as usize - 1).saturating_mul(per_page);

    Ok(Page {
        items: items.into_iter().skip(skip).take(per_page).collect(),
        page: request.page,
        per_page: request.per_page,
        total_items,
        total_pages,
    })
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Lead sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSortKey {
    /// When the lead was opened.
    #[default]
    OpenedAt,
    /// Requested amount.
    HelpRequested,
    /// Outstanding need.
    NeededAmount,
    /// Beneficiary name, case-insensitive.
    BeneficiaryName,
}

/// Lead list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadQuery {
    /// Only leads in this funding status.
    pub funding_status: Option<FundingStatus>,
    /// Case-insensitive substring of the beneficiary name or purpose.
    pub search: Option<String>,
    /// Sort key.
    pub sort_by: LeadSortKey,
    /// Sort direction.
    pub direction: SortDirection,
    /// Page to return.
    pub page: PageRequest,
}

fn compare_leads(a: &Lead, b: &Lead, key: LeadSortKey) -> Ordering {
    match key {
        LeadSortKey::OpenedAt => a.opened_at.cmp(&b.opened_at),
        LeadSortKey::HelpRequested => a.help_requested.cmp(&b.help_requested),
        LeadSortKey::NeededAmount => a.needed_amount().cmp(&b.needed_amount()),
        LeadSortKey::BeneficiaryName => a
            .beneficiary_name
            .to_lowercase()
            .cmp(&b.beneficiary_name.to_lowercase()),
    }
}

/// Filters, sorts and paginates leads.
///
/// # Errors
///
/// Returns `DomainError::InvalidPageRequest` if the page request is invalid.
pub fn list_leads(leads: &[Lead], query: &LeadQuery) -> Result<Page<Lead>, DomainError> {
    let search: Option<&str> = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut matching: Vec<Lead> = leads
        .iter()
        .filter(|lead| {
            query
                .funding_status
                .is_none_or(|status| lead.funding_status() == status)
        })
        .filter(|lead| {
            search.is_none_or(|needle| {
                contains_ignore_case(&lead.beneficiary_name, needle)
                    || contains_ignore_case(&lead.purpose, needle)
            })
        })
        .cloned()
        .collect();

    matching.sort_by(|a, b| query.direction.apply(compare_leads(a, b, query.sort_by)));

    paginate(matching, query.page)
}

/// Donation sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationSortKey {
    /// When the donation was recorded.
    #[default]
    RecordedAt,
    /// Donated amount.
    Amount,
    /// Amount still available for allocation.
    AvailableAmount,
    /// Donor name, case-insensitive.
    DonorName,
}

/// Donation list query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DonationQuery {
    /// Only donations in this status.
    pub status: Option<DonationStatus>,
    /// Only donations that can be offered for allocation.
    pub eligible_only: bool,
    /// Case-insensitive substring of the donor name.
    pub search: Option<String>,
    /// Sort key.
    pub sort_by: DonationSortKey,
    /// Sort direction.
    pub direction: SortDirection,
    /// Page to return.
    pub page: PageRequest,
}

fn compare_donations(
    a: &(Donation, Amount),
    b: &(Donation, Amount),
    key: DonationSortKey,
) -> Ordering {
    match key {
        DonationSortKey::RecordedAt => a.0.recorded_at.cmp(&b.0.recorded_at),
        DonationSortKey::Amount => a.0.amount.cmp(&b.0.amount),
        DonationSortKey::AvailableAmount => a.1.cmp(&b.1),
        DonationSortKey::DonorName => a
            .0
            .donor_name
            .to_lowercase()
            .cmp(&b.0.donor_name.to_lowercase()),
    }
}

/// Filters, sorts and paginates donations.
///
/// # Errors
///
/// Returns an error if the page request is invalid or a donation's
/// allocations overflow.
pub fn list_donations(
    donations: &[Donation],
    query: &DonationQuery,
) -> Result<Page<Donation>, DomainError> {
    let search: Option<&str> = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let mut matching: Vec<(Donation, Amount)> = Vec::new();
    for donation in donations {
        if query.status.is_some_and(|status| donation.status != status) {
            continue;
        }
        if query.eligible_only && !donation.is_eligible_for_allocation() {
            continue;
        }
        if search.is_some_and(|needle| !contains_ignore_case(&donation.donor_name, needle)) {
            continue;
        }
        matching.push((donation.clone(), donation.available_amount()?));
    }

    matching.sort_by(|a, b| query.direction.apply(compare_donations(a, b, query.sort_by)));

    paginate(
        matching.into_iter().map(|(donation, _)| donation).collect(),
        query.page,
    )
}
