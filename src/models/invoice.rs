use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashSet;

use crate::models::billing::{Billable, BillingRecord};
use crate::models::report::Period;

/// 已开票记录
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRecord {
    pub job_number: String,
    pub invoice_date: NaiveDate,
}

/// 开票键：`{jobNumber}_{month}_{year}`，month 从 1 开始
pub fn invoice_key(job_number: &str, month: u32, year: i32) -> String {
    format!("{}_{}_{}", job_number, month, year)
}

/// 已开票键集合，用于标记报表行
#[derive(Debug, Clone, Default)]
pub struct InvoicePresence {
    keys: HashSet<String>,
}

impl InvoicePresence {
    pub fn from_invoices(invoices: &[InvoiceRecord]) -> Self {
        let keys = invoices
            .iter()
            .filter(|inv| !inv.job_number.is_empty())
            .map(|inv| {
                invoice_key(
                    &inv.job_number,
                    inv.invoice_date.month(),
                    inv.invoice_date.year(),
                )
            })
            .collect();
        Self { keys }
    }

    pub fn contains(&self, job_number: &str, period: Period) -> bool {
        self.keys
            .contains(&invoice_key(job_number, period.month, period.year))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// 报表行着色规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowClass {
    Invoiced,
    NotInvoiced,
}

pub fn row_class(job_number: Option<&str>, period: Period, presence: &InvoicePresence) -> RowClass {
    match job_number {
        Some(job) if presence.contains(job, period) => RowClass::Invoiced,
        _ => RowClass::NotInvoiced,
    }
}

/// 带开票状态的计划行
#[derive(Debug, Clone, Serialize)]
pub struct AnnotatedRow {
    #[serde(flatten)]
    pub record: BillingRecord,
    pub row_class: RowClass,
}

pub fn annotate_rows(
    records: Vec<BillingRecord>,
    period: Period,
    presence: &InvoicePresence,
) -> Vec<AnnotatedRow> {
    records
        .into_iter()
        .map(|record| {
            let row_class = row_class(record.job_number(), period, presence);
            AnnotatedRow { record, row_class }
        })
        .collect()
}
