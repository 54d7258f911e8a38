//! Field validation for client, project and task input.
//!
//! Pure functions: every check runs synchronously on borrowed field values
//! before any mutation touches the store. Failures are collected per field so
//! a form can show every problem at once.

use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidateUrl};

use crate::status::{ClientStatus, ProjectStatus, TaskPriority, TaskStatus};
use crate::types::Date;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_NAME_LEN: usize = 255;
pub const MAX_EMAIL_LEN: usize = 255;
pub const MAX_PHONE_LEN: usize = 50;
pub const MAX_CURRENCY_LEN: usize = 3;

const PHONE_PATTERN: &str = r"^[0-9\s\-+()]+$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+$").expect("valid regex"));

static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.\-]*://").expect("valid regex"));

// ---------------------------------------------------------------------------
// Error collection
// ---------------------------------------------------------------------------

/// Field name to human-readable message, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Single-line summary, e.g. `"email: Invalid email address; phone: ..."`.
    pub fn summary(&self) -> String {
        self.iter()
            .map(|(field, msg)| format!("{field}: {msg}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.summary())
    }
}

// ---------------------------------------------------------------------------
// Input views
// ---------------------------------------------------------------------------

/// Borrowed view of a submitted client form.
#[derive(Debug, Clone, Copy)]
pub struct ClientFields<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub website: Option<&'a str>,
    pub status: &'a str,
}

/// Borrowed view of a submitted project form.
#[derive(Debug, Clone, Copy)]
pub struct ProjectFields<'a> {
    pub name: &'a str,
    pub budget: Option<f64>,
    pub currency: &'a str,
    pub status: &'a str,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

/// Borrowed view of a submitted task form.
#[derive(Debug, Clone, Copy)]
pub struct TaskFields<'a> {
    pub name: &'a str,
    pub status: &'a str,
    pub priority: &'a str,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Option<f64>,
    pub actual_hours: Option<f64>,
}

// ---------------------------------------------------------------------------
// Entity validators
// ---------------------------------------------------------------------------

/// Validate a client form.
pub fn validate_client(fields: &ClientFields<'_>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_name(&mut errors, fields.name);

    let email = fields.email.trim();
    if email.is_empty() {
        errors.add("email", "Email is required");
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.add(
            "email",
            format!("Email must be at most {MAX_EMAIL_LEN} characters"),
        );
    } else if !email.validate_email() {
        errors.add("email", "Invalid email address");
    }

    if let Err(msg) = validate_phone(fields.phone) {
        errors.add("phone", msg);
    }

    if let Some(website) = fields.website {
        if !website.trim().is_empty() && !is_valid_website(website) {
            errors.add("website", "Invalid website URL");
        }
    }

    check_enum::<ClientStatus>(&mut errors, "status", fields.status, ClientStatus::ALL);

    errors.into_result()
}

/// Validate a project form.
pub fn validate_project(fields: &ProjectFields<'_>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_name(&mut errors, fields.name);

    if let Some(budget) = fields.budget {
        if !budget.is_finite() || budget <= 0.0 {
            errors.add("budget", "Budget must be a positive number");
        }
    }

    let currency = fields.currency.trim();
    if currency.is_empty() {
        errors.add("currency", "Currency is required");
    } else if currency.chars().count() > MAX_CURRENCY_LEN {
        errors.add(
            "currency",
            format!("Currency must be at most {MAX_CURRENCY_LEN} characters"),
        );
    } else if !CURRENCY_RE.is_match(currency) {
        errors.add("currency", "Currency may only contain letters A-Z");
    }

    check_enum::<ProjectStatus>(&mut errors, "status", fields.status, ProjectStatus::ALL);
    check_date_order(&mut errors, fields.start_date, fields.end_date);

    errors.into_result()
}

/// Validate a task form.
pub fn validate_task(fields: &TaskFields<'_>) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    check_name(&mut errors, fields.name);
    check_enum::<TaskStatus>(&mut errors, "status", fields.status, TaskStatus::ALL);
    check_enum::<TaskPriority>(&mut errors, "priority", fields.priority, TaskPriority::ALL);
    check_hours(&mut errors, "estimated_hours", fields.estimated_hours);
    check_hours(&mut errors, "actual_hours", fields.actual_hours);
    check_date_order(&mut errors, fields.start_date, fields.end_date);

    errors.into_result()
}

// ---------------------------------------------------------------------------
// Single-field rules
// ---------------------------------------------------------------------------

/// Validate a phone number: required, at most 50 characters, and limited to
/// digits, spaces, hyphens, plus signs and parentheses.
pub fn validate_phone(phone: &str) -> Result<(), String> {
    let phone = phone.trim();
    if phone.is_empty() {
        return Err("Phone is required".to_string());
    }
    if phone.chars().count() > MAX_PHONE_LEN {
        return Err(format!("Phone must be at most {MAX_PHONE_LEN} characters"));
    }
    if !PHONE_RE.is_match(phone) {
        return Err(
            "Phone may only contain digits, spaces, hyphens, plus signs and parentheses"
                .to_string(),
        );
    }
    Ok(())
}

/// Whether a website parses as a URL, prefixing `https://` when the input
/// has no scheme.
pub fn is_valid_website(website: &str) -> bool {
    website_with_scheme(website).validate_url()
}

/// Prefix `https://` unless the input already names a scheme.
pub fn website_with_scheme(website: &str) -> String {
    let trimmed = website.trim();
    if SCHEME_RE.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

fn check_name(errors: &mut FieldErrors, name: &str) {
    let name = name.trim();
    if name.is_empty() {
        errors.add("name", "Name is required");
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.add("name", format!("Name must be at most {MAX_NAME_LEN} characters"));
    }
}

/// Parse one enumerated field, reporting the allowed values on failure.
pub fn parse_choice<T>(field: &str, value: &str, all: &[T]) -> Result<T, FieldErrors>
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|_| {
        let mut errors = FieldErrors::new();
        errors.add(field, choice_message(all));
        errors
    })
}

fn choice_message<T: std::fmt::Display>(all: &[T]) -> String {
    let allowed = all
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Must be one of: {allowed}")
}

fn check_enum<T>(errors: &mut FieldErrors, field: &str, value: &str, all: &[T])
where
    T: std::str::FromStr + Copy + std::fmt::Display,
{
    if value.trim().parse::<T>().is_err() {
        errors.add(field, choice_message(all));
    }
}

fn check_hours(errors: &mut FieldErrors, field: &str, hours: Option<f64>) {
    if let Some(h) = hours {
        if !h.is_finite() || h < 0.0 {
            errors.add(field, "Hours must be zero or more");
        }
    }
}

fn check_date_order(errors: &mut FieldErrors, start: Option<Date>, end: Option<Date>) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.add("end_date", "End date must be on or after the start date");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
