//! Task entity model and DTOs. Tasks hang off a project.

use clientdesk_core::normalize::blank_as_none;
use clientdesk_core::status::{TaskPriority, TaskStatus};
use clientdesk_core::types::{Date, DbId, Timestamp};
use clientdesk_core::validation::TaskFields;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: TaskStatus,
    #[sqlx(try_from = "String")]
    pub priority: TaskPriority,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    /// References `team_members.id`.
    pub assignee_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub archived_at: Option<Timestamp>,
}

/// Task form as submitted. Used for create and update.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskInput {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `open`.
    pub status: Option<String>,
    /// Defaults to `medium`.
    pub priority: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub start_date: Option<Date>,
    #[serde(deserialize_with = "blank_as_none")]
    pub end_date: Option<Date>,
    #[serde(deserialize_with = "blank_as_none")]
    pub estimated_hours: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub actual_hours: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub assignee_id: Option<DbId>,
}

impl TaskInput {
    pub fn fields(&self) -> TaskFields<'_> {
        TaskFields {
            name: &self.name,
            status: self
                .status
                .as_deref()
                .unwrap_or(TaskStatus::default().as_str()),
            priority: self
                .priority
                .as_deref()
                .unwrap_or(TaskPriority::default().as_str()),
            start_date: self.start_date,
            end_date: self.end_date,
            estimated_hours: self.estimated_hours,
            actual_hours: self.actual_hours,
        }
    }
}

/// Validated, normalized task values handed to the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTask {
    pub name: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
    pub assignee_id: Option<DbId>,
}
