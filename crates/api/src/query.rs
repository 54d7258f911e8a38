//! Query parameter types for list and export endpoints.

use clientdesk_core::table::{
    clamp_page_size, SortColumn, SortDirection, StatusFilter, TableParams,
};
use serde::Deserialize;

/// `?search=&status=&sort=&dir=&page=&page_size=` on the client list.
///
/// Unknown enum values are rejected by the extractor with 400.
#[derive(Debug, Default, Deserialize)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub status: Option<StatusFilter>,
    pub sort: Option<SortColumn>,
    pub dir: Option<SortDirection>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ClientListQuery {
    /// Resolve into view-model parameters. Page 0 becomes page 1 and the page
    /// size is clamped; `default_page_size` applies when none is given.
    pub fn into_params(self, default_page_size: usize) -> TableParams {
        TableParams {
            search: self.search.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            sort: self.sort,
            direction: self.dir.unwrap_or_default(),
            page: self.page.unwrap_or(1).max(1),
            page_size: clamp_page_size(self.page_size.unwrap_or(default_page_size)),
        }
    }
}
