use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, Result};
use crate::format::format_in_lakhs_with;
use crate::models::category::MainCategory;
use crate::models::totals::{Summary, TotalsRow, TOTALS_HEADER};

/// 矩阵汇总 (主分类 × 列)
pub type MatrixSummary = Summary<MainCategory>;

/// 报表期间 (month 从 1 开始)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Period {
    pub month: u32,
    pub year: i32,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self> {
        if (1900..=9999).contains(&year) && NaiveDate::from_ymd_opt(year, month, 1).is_some() {
            Ok(Self { month, year })
        } else {
            Err(ReportError::InvalidPeriod { month, year })
        }
    }
}

/// 与分桶无关的全量统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PeriodMetrics {
    /// WIP 合计
    pub total_wip: BigDecimal,
    /// PO 合计 (Design + VA)
    pub total_po: BigDecimal,
    pub record_count: usize,
    /// 作业编号为空而被跳过的行数
    pub skipped_count: usize,
}

/// 单个期间的完整报表
#[derive(Debug, Clone, Serialize)]
pub struct PeriodReport {
    pub period: Period,
    pub primary: MatrixSummary,
    /// 未开票汇总，单独计算，不并入 primary
    pub not_invoiced: MatrixSummary,
    pub metrics: PeriodMetrics,
    pub generated_at: DateTime<Utc>,
}

pub const TOTAL_LABEL: &str = "Total";
pub const NOT_INVOICED_LABEL: &str = "Not Invoiced";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

impl TableRow {
    fn from_totals(label: &str, row: &TotalsRow, fraction_digits: usize) -> Self {
        Self {
            label: label.to_string(),
            cells: row
                .values()
                .iter()
                .map(|v| format_in_lakhs_with(v, fraction_digits))
                .collect(),
        }
    }
}

/// 汇总表：行标签 + 10 个金额列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl SummaryTable {
    /// 行顺序：各主分类、Total、Not Invoiced
    pub fn from_report(report: &PeriodReport, fraction_digits: usize) -> Self {
        let mut header = vec!["Category".to_string()];
        header.extend(TOTALS_HEADER.iter().map(|h| h.to_string()));

        let mut rows: Vec<TableRow> = report
            .primary
            .buckets
            .iter()
            .map(|(category, row)| TableRow::from_totals(category.label(), row, fraction_digits))
            .collect();
        rows.push(TableRow::from_totals(TOTAL_LABEL, &report.primary.total, fraction_digits));
        rows.push(TableRow::from_totals(
            NOT_INVOICED_LABEL,
            &report.not_invoiced.total,
            fraction_digits,
        ));

        Self { header, rows }
    }
}
