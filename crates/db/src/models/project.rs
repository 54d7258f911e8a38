//! Project entity model and DTOs.

use clientdesk_core::normalize::blank_as_none;
use clientdesk_core::stats::ProjectFigures;
use clientdesk_core::status::ProjectStatus;
use clientdesk_core::types::{Date, DbId, Timestamp};
use clientdesk_core::validation::ProjectFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub currency: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

impl ProjectFigures for Project {
    fn currency(&self) -> Option<&str> {
        self.currency.as_deref()
    }

    fn budget(&self) -> Option<f64> {
        self.budget
    }

    fn start_date(&self) -> Option<Date> {
        self.start_date
    }

    fn end_date(&self) -> Option<Date> {
        self.end_date
    }
}

/// Project form as submitted. Used for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub name: String,
    pub description: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub budget: Option<f64>,
    pub currency: String,
    /// Defaults to `non_completed` when omitted.
    pub status: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub start_date: Option<Date>,
    #[serde(deserialize_with = "blank_as_none")]
    pub end_date: Option<Date>,
}

impl ProjectInput {
    pub fn fields(&self) -> ProjectFields<'_> {
        ProjectFields {
            name: &self.name,
            budget: self.budget,
            currency: &self.currency,
            status: self
                .status
                .as_deref()
                .unwrap_or(ProjectStatus::default().as_str()),
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

/// Validated, normalized project values handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub currency: String,
    pub status: ProjectStatus,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}
