//! Dashboard KPIs and financial reports
//!
//! Pure arithmetic over the datasets; callers take the store lock and pass
//! the data in. Dates inside records are `YYYY-MM-DD` strings; records with
//! missing or unparseable dates simply do not count toward date-bound KPIs.

use chrono::{DateTime, Datelike, Duration, Local, NaiveDate};
use serde::Serialize;

use crate::store::{num_field, str_field, Datasets, Record};

/// The dashboard KPI payload
#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardKpis {
    /// Total value of quotes sent in the current month
    pub quotes_sent_month_total: f64,
    /// Number of approved quotes (closed sales)
    pub closed_sales: usize,
    /// Revenue received in the current month
    pub revenue_month: f64,
    /// Work orders not yet finished
    pub open_work_orders: usize,
    /// Pending receivables due within the next seven days
    pub receivables_due_week: usize,
}

/// Cash flow over pending ledger entries
#[derive(Debug, Serialize, PartialEq)]
pub struct CashFlow {
    pub total_receivable: f64,
    pub total_payable: f64,
    pub balance: f64,
}

/// Revenue report over paid ledger entries
#[derive(Debug, Serialize, PartialEq)]
pub struct RevenueReport {
    pub revenue: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Compute the dashboard KPIs as of the given instant
pub fn dashboard_kpis(data: &Datasets, now: DateTime<Local>) -> DashboardKpis {
    let today = now.date_naive();
    let week_end = today + Duration::days(7);

    let quotes_sent_month_total = data
        .quotes
        .iter()
        .filter(|q| str_field(q, "status") == Some("sent"))
        .filter(|q| in_month(date_field(q, "sent_date"), today))
        .map(|q| num_field(q, "value"))
        .sum();

    let closed_sales = data
        .quotes
        .iter()
        .filter(|q| str_field(q, "status") == Some("approved"))
        .count();

    let revenue_month = data
        .ledger_entries
        .iter()
        .filter(|l| str_field(l, "kind") == Some("receivable"))
        .filter(|l| str_field(l, "status") == Some("paid"))
        .filter(|l| in_month(date_field(l, "paid_date"), today))
        .map(|l| num_field(l, "value"))
        .sum();

    let open_work_orders = data
        .work_orders
        .iter()
        .filter(|w| str_field(w, "status") != Some("Finished"))
        .count();

    let receivables_due_week = data
        .ledger_entries
        .iter()
        .filter(|l| str_field(l, "kind") == Some("receivable"))
        .filter(|l| str_field(l, "status") == Some("pending"))
        .filter(|l| {
            date_field(l, "due_date")
                .map_or(false, |due| due >= today && due <= week_end)
        })
        .count();

    DashboardKpis {
        quotes_sent_month_total,
        closed_sales,
        revenue_month,
        open_work_orders,
        receivables_due_week,
    }
}

/// Pending receivables minus pending payables
pub fn cash_flow(entries: &[Record]) -> CashFlow {
    let total_receivable = sum_entries(entries, "receivable", "pending");
    let total_payable = sum_entries(entries, "payable", "pending");

    CashFlow {
        total_receivable,
        total_payable,
        balance: total_receivable - total_payable,
    }
}

/// Paid receivables, paid payables, and the difference
pub fn revenue_report(entries: &[Record]) -> RevenueReport {
    let revenue = sum_entries(entries, "receivable", "paid");
    let expenses = sum_entries(entries, "payable", "paid");

    RevenueReport {
        revenue,
        expenses,
        profit: revenue - expenses,
    }
}

/// Sum ledger entry values matching a kind and status
fn sum_entries(entries: &[Record], kind: &str, status: &str) -> f64 {
    entries
        .iter()
        .filter(|l| str_field(l, "kind") == Some(kind))
        .filter(|l| str_field(l, "status") == Some(status))
        .map(|l| num_field(l, "value"))
        .sum()
}

/// Parse a `YYYY-MM-DD` date field
fn date_field(record: &Record, key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(str_field(record, key)?, "%Y-%m-%d").ok()
}

/// Whether a date falls in the same calendar month as the reference day
fn in_month(date: Option<NaiveDate>, reference: NaiveDate) -> bool {
    date.map_or(false, |d| {
        d.year() == reference.year() && d.month() == reference.month()
    })
}
