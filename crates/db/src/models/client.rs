//! Client entity model, form DTO, and the derived list row.

use clientdesk_core::export::ClientExportRow;
use clientdesk_core::stats::ClientStats;
use clientdesk_core::status::ClientStatus;
use clientdesk_core::table::{ListingRow, SortColumn, SortValue};
use clientdesk_core::types::{DbId, Timestamp};
use clientdesk_core::validation::ClientFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `clients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ClientStatus,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

/// Client form as submitted, before validation. Used for create and update.
///
/// Missing keys deserialize as blanks so validation can report them per field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    /// Defaults to `active` when omitted.
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl ClientInput {
    pub fn fields(&self) -> ClientFields<'_> {
        ClientFields {
            name: &self.name,
            email: &self.email,
            phone: &self.phone,
            website: self.website.as_deref(),
            status: self
                .status
                .as_deref()
                .unwrap_or(ClientStatus::default().as_str()),
        }
    }
}

/// Validated, normalized client values handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub status: ClientStatus,
    pub notes: Option<String>,
}

/// A client together with statistics derived from its projects.
#[derive(Debug, Clone, Serialize)]
pub struct ClientWithStats {
    #[serde(flatten)]
    pub client: Client,
    #[serde(flatten)]
    pub stats: ClientStats,
}

impl ClientWithStats {
    pub fn export_row(&self) -> ClientExportRow<'_> {
        ClientExportRow {
            name: &self.client.name,
            status: self.client.status.as_str(),
            email: &self.client.email,
            phone: &self.client.phone,
            website: self.client.website.as_deref(),
            projects_count: self.stats.projects_count,
            total_budget: self.stats.total_budget,
            currency: &self.stats.primary_currency,
            created_at: self.client.created_at,
            earliest_start: self.stats.earliest_start,
            latest_end: self.stats.latest_end,
            notes: self.client.notes.as_deref(),
        }
    }
}

impl ListingRow for ClientWithStats {
    fn row_id(&self) -> DbId {
        self.client.id
    }

    fn row_status(&self) -> ClientStatus {
        self.client.status
    }

    fn search_fields(&self) -> [&str; 3] {
        [
            self.client.name.as_str(),
            self.client.email.as_str(),
            self.client.phone.as_str(),
        ]
    }

    fn sort_value(&self, column: SortColumn) -> SortValue<'_> {
        let day_start = |d: chrono::NaiveDate| d.and_hms_opt(0, 0, 0);
        match column {
            SortColumn::Name => SortValue::Text(&self.client.name),
            SortColumn::Status => SortValue::Text(self.client.status.as_str()),
            SortColumn::Email => SortValue::Text(&self.client.email),
            SortColumn::Phone => SortValue::Text(&self.client.phone),
            SortColumn::ProjectsCount => SortValue::Number(self.stats.projects_count as f64),
            SortColumn::TotalBudget => SortValue::Number(self.stats.total_budget),
            SortColumn::CreatedAt => SortValue::Instant(Some(self.client.created_at.naive_utc())),
            SortColumn::EarliestStart => {
                SortValue::Instant(self.stats.earliest_start.and_then(day_start))
            }
            SortColumn::LatestEnd => SortValue::Instant(self.stats.latest_end.and_then(day_start)),
        }
    }
}
