//! Client list view-model: filter, sort and paginate in memory.
//!
//! [`apply`] is a pure function of the collection and the parameters.
//! Callers reset the page to 1 whenever the search, filter or sort changes.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::status::ClientStatus;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Maximum number of rows per page.
pub const MAX_PAGE_SIZE: usize = 100;

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Status filter for the client list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    NonActive,
}

impl StatusFilter {
    fn accepts(self, status: ClientStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == ClientStatus::Active,
            StatusFilter::NonActive => status == ClientStatus::NonActive,
        }
    }
}

/// Sortable client list columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Name,
    Status,
    Email,
    Phone,
    ProjectsCount,
    TotalBudget,
    CreatedAt,
    EarliestStart,
    LatestEnd,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Everything the view-model needs besides the rows themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableParams {
    pub search: String,
    pub status: StatusFilter,
    pub sort: Option<SortColumn>,
    pub direction: SortDirection,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for TableParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: None,
            direction: SortDirection::Asc,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Row contract
// ---------------------------------------------------------------------------

/// A comparable cell value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortValue<'a> {
    Text(&'a str),
    Number(f64),
    /// `None` sorts before every instant.
    Instant(Option<NaiveDateTime>),
}

impl SortValue<'_> {
    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Text(a), SortValue::Text(b)) => compare_case_insensitive(a, b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Instant(a), SortValue::Instant(b)) => a.cmp(b),
            // A column always yields one kind of value.
            _ => Ordering::Equal,
        }
    }
}

fn compare_case_insensitive(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// What a row must expose to be listed.
pub trait ListingRow {
    fn row_id(&self) -> DbId;
    fn row_status(&self) -> ClientStatus;
    /// Fields searched by the free-text filter (name, email, phone).
    fn search_fields(&self) -> [&str; 3];
    fn sort_value(&self, column: SortColumn) -> SortValue<'_>;
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// One page of the filtered and sorted collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TablePage<T> {
    pub rows: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_matches: usize,
    pub total_pages: usize,
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// Filter, sort and paginate `rows`.
pub fn apply<'a, T: ListingRow>(rows: &'a [T], params: &TableParams) -> TablePage<&'a T> {
    let matching = filter_and_sort(rows, params);

    let page_size = clamp_page_size(params.page_size);
    let page = params.page.max(1);
    let total_matches = matching.len();
    let total_pages = total_matches.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size);
    let rows = matching.into_iter().skip(start).take(page_size).collect();

    TablePage {
        rows,
        page,
        page_size,
        total_matches,
        total_pages,
    }
}

/// Filter and sort without paginating. Used by export.
pub fn filter_and_sort<'a, T: ListingRow>(rows: &'a [T], params: &TableParams) -> Vec<&'a T> {
    let needle = params.search.trim().to_lowercase();

    let mut matching: Vec<&T> = rows
        .iter()
        .filter(|row| params.status.accepts(row.row_status()))
        .filter(|row| needle.is_empty() || matches_search(*row, &needle))
        .collect();

    if let Some(column) = params.sort {
        // `sort_by` is stable, so equal keys keep their input order in both
        // directions.
        matching.sort_by(|a, b| {
            let ord = a.sort_value(column).compare(&b.sort_value(column));
            match params.direction {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            }
        });
    }

    matching
}

fn matches_search<T: ListingRow>(row: &T, needle_lower: &str) -> bool {
    row.search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(needle_lower))
}

/// Clamp a requested page size to `1..=MAX_PAGE_SIZE`.
pub fn clamp_page_size(size: usize) -> usize {
    size.clamp(1, MAX_PAGE_SIZE)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Ids the operator has ticked, kept across page views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    ids: BTreeSet<DbId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id` if unselected, otherwise deselect it.
    pub fn toggle(&mut self, id: DbId) {
        if !self.ids.remove(&id) {
            self.ids.insert(id);
        }
    }

    /// Toggle every currently visible id as a group.
    ///
    /// When all of `visible` are already selected they are all deselected;
    /// otherwise all of them become selected. Ids not in `visible` are left
    /// alone.
    pub fn toggle_all(&mut self, visible: &[DbId]) {
        if self.is_all_selected(visible) {
            for id in visible {
                self.ids.remove(id);
            }
        } else {
            self.ids.extend(visible.iter().copied());
        }
    }

    /// Whether every visible id is selected. False for an empty page.
    pub fn is_all_selected(&self, visible: &[DbId]) -> bool {
        !visible.is_empty() && visible.iter().all(|id| self.ids.contains(id))
    }

    pub fn contains(&self, id: DbId) -> bool {
        self.ids.contains(&id)
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected ids in ascending order.
    pub fn ids(&self) -> Vec<DbId> {
        self.ids.iter().copied().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
