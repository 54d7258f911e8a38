//! Per-client project statistics.
//!
//! Derived on every read from a client's non-archived projects and never
//! stored. Budgets in different currencies are never added together: only
//! projects in the client's primary (most frequent) currency contribute to
//! the total.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::Date;

/// Currency reported when no project carries both a currency and a budget.
pub const DEFAULT_CURRENCY: &str = "USD";

/// The project fields the aggregation reads.
pub trait ProjectFigures {
    fn currency(&self) -> Option<&str>;
    fn budget(&self) -> Option<f64>;
    fn start_date(&self) -> Option<Date>;
    fn end_date(&self) -> Option<Date>;
}

/// Derived statistics for one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStats {
    pub projects_count: i64,
    pub total_budget: f64,
    pub primary_currency: String,
    pub earliest_start: Option<Date>,
    pub latest_end: Option<Date>,
}

impl Default for ClientStats {
    fn default() -> Self {
        Self {
            projects_count: 0,
            total_budget: 0.0,
            primary_currency: DEFAULT_CURRENCY.to_string(),
            earliest_start: None,
            latest_end: None,
        }
    }
}

/// Compute statistics over a client's projects, in input order.
pub fn compute_client_stats<P: ProjectFigures>(projects: &[P]) -> ClientStats {
    let primary = primary_currency(projects);

    let total_budget = projects
        .iter()
        .filter_map(|p| match (p.currency(), p.budget()) {
            (Some(c), Some(b)) if c == primary => Some(b),
            _ => None,
        })
        .fold(0.0, |total, budget| total + budget);

    ClientStats {
        projects_count: projects.len() as i64,
        total_budget,
        primary_currency: primary.to_string(),
        earliest_start: projects.iter().filter_map(ProjectFigures::start_date).min(),
        latest_end: projects.iter().filter_map(ProjectFigures::end_date).max(),
    }
}

/// The most frequent currency among budgeted projects.
///
/// Ties go to the currency seen first in input order.
pub fn primary_currency<P: ProjectFigures>(projects: &[P]) -> &str {
    let mut tally: IndexMap<&str, usize> = IndexMap::new();
    for project in projects {
        if let (Some(currency), Some(_)) = (project.currency(), project.budget()) {
            *tally.entry(currency).or_insert(0) += 1;
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (currency, count) in tally {
        if best.map_or(true, |(_, top)| count > top) {
            best = Some((currency, count));
        }
    }

    best.map_or(DEFAULT_CURRENCY, |(currency, _)| currency)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct P {
        currency: Option<&'static str>,
        budget: Option<f64>,
        start: Option<&'static str>,
        end: Option<&'static str>,
    }

    impl ProjectFigures for P {
        fn currency(&self) -> Option<&str> {
            self.currency
        }
        fn budget(&self) -> Option<f64> {
            self.budget
        }
        fn start_date(&self) -> Option<Date> {
            self.start.map(|s| s.parse().unwrap())
        }
        fn end_date(&self) -> Option<Date> {
            self.end.map(|s| s.parse().unwrap())
        }
    }

    fn budgeted(currency: &'static str, budget: f64) -> P {
        P {
            currency: Some(currency),
            budget: Some(budget),
            ..P::default()
        }
    }

    #[test]
    fn no_projects_yields_defaults() {
        let stats = compute_client_stats::<P>(&[]);
        assert_eq!(stats, ClientStats::default());
        assert_eq!(stats.primary_currency, "USD");
    }

    #[test]
    fn unbudgeted_projects_default_to_usd_and_zero() {
        let projects = vec![
            P {
                currency: Some("EUR"),
                ..P::default()
            },
            P {
                budget: Some(500.0),
                ..P::default()
            },
        ];
        let stats = compute_client_stats(&projects);
        assert_eq!(stats.projects_count, 2);
        assert_eq!(stats.primary_currency, "USD");
        assert_eq!(stats.total_budget, 0.0);
    }

    #[test]
    fn other_currencies_are_excluded_not_converted() {
        let projects = vec![
            budgeted("USD", 100.0),
            budgeted("USD", 50.0),
            budgeted("EUR", 1000.0),
        ];
        let stats = compute_client_stats(&projects);
        assert_eq!(stats.primary_currency, "USD");
        assert_eq!(stats.total_budget, 150.0);
        assert_eq!(stats.projects_count, 3);
    }

    #[test]
    fn currency_tie_goes_to_first_seen() {
        let projects = vec![
            budgeted("EUR", 10.0),
            budgeted("USD", 20.0),
            budgeted("USD", 30.0),
            budgeted("EUR", 40.0),
        ];
        let stats = compute_client_stats(&projects);
        assert_eq!(stats.primary_currency, "EUR");
        assert_eq!(stats.total_budget, 50.0);

        let reversed: Vec<P> = vec![
            budgeted("USD", 20.0),
            budgeted("EUR", 10.0),
            budgeted("EUR", 40.0),
            budgeted("USD", 30.0),
        ];
        assert_eq!(primary_currency(&reversed), "USD");
    }

    #[test]
    fn date_bounds_ignore_nulls() {
        let projects = vec![
            P {
                start: Some("2024-03-01"),
                end: Some("2024-06-30"),
                ..P::default()
            },
            P {
                start: Some("2024-01-15"),
                end: None,
                ..P::default()
            },
            P::default(),
        ];
        let stats = compute_client_stats(&projects);
        assert_eq!(stats.earliest_start, Some("2024-01-15".parse().unwrap()));
        assert_eq!(stats.latest_end, Some("2024-06-30".parse().unwrap()));
    }

    #[test]
    fn all_null_dates_yield_none() {
        let projects = vec![P::default(), P::default()];
        let stats = compute_client_stats(&projects);
        assert_eq!(stats.earliest_start, None);
        assert_eq!(stats.latest_end, None);
    }
}
