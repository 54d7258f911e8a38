//! Flat CSV export of the client list.
//!
//! Every field is wrapped in double quotes with inner quotes doubled, and
//! dates are rendered as `YYYY-MM-DD`.

use std::io::Write;

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::types::{Date, Timestamp};

/// Fixed export header, one entry per column.
pub const CLIENT_EXPORT_HEADER: [&str; 12] = [
    "Name",
    "Status",
    "Email",
    "Phone",
    "Website",
    "Projects",
    "Total Budget",
    "Currency",
    "Created",
    "Earliest Project",
    "Latest Project",
    "Notes",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One exported client, borrowed from the row it came from.
#[derive(Debug, Clone)]
pub struct ClientExportRow<'a> {
    pub name: &'a str,
    pub status: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub website: Option<&'a str>,
    pub projects_count: i64,
    pub total_budget: f64,
    pub currency: &'a str,
    pub created_at: Timestamp,
    pub earliest_start: Option<Date>,
    pub latest_end: Option<Date>,
    pub notes: Option<&'a str>,
}

impl ClientExportRow<'_> {
    fn record(&self) -> [String; 12] {
        [
            self.name.to_string(),
            self.status.to_string(),
            self.email.to_string(),
            self.phone.to_string(),
            self.website.unwrap_or_default().to_string(),
            self.projects_count.to_string(),
            self.total_budget.to_string(),
            self.currency.to_string(),
            self.created_at.format(DATE_FORMAT).to_string(),
            format_date(self.earliest_start),
            format_date(self.latest_end),
            self.notes.unwrap_or_default().to_string(),
        ]
    }
}

fn format_date(date: Option<Date>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}

/// Write the header and one record per row.
pub fn write_clients_csv<'a, W, I>(writer: W, rows: I) -> Result<(), csv::Error>
where
    W: Write,
    I: IntoIterator<Item = ClientExportRow<'a>>,
{
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    csv.write_record(CLIENT_EXPORT_HEADER)?;
    for row in rows {
        csv.write_record(row.record())?;
    }
    csv.flush()?;
    Ok(())
}

/// Render the export into a `String`.
pub fn clients_csv_string<'a, I>(rows: I) -> Result<String, csv::Error>
where
    I: IntoIterator<Item = ClientExportRow<'a>>,
{
    let mut buf = Vec::new();
    write_clients_csv(&mut buf, rows)?;
    // The writer only ever receives UTF-8 strings.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Download filename stamped with `today`, e.g. `clients-export-2024-05-01.csv`.
pub fn export_filename(today: Date) -> String {
    format!("clients-export-{}.csv", today.format(DATE_FORMAT))
}
