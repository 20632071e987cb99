use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::format::norm_cat;
use crate::models::{bucket_for, Billable, BillingRecord, ChartBucket};

/// 分类目标值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTarget {
    pub category: String,
    pub target: BigDecimal,
}

/// 只读参考数据 (经理列表、分类目标)，由调用方显式传入
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceData {
    #[serde(default)]
    pub managers: Vec<String>,
    #[serde(default)]
    pub targets: Vec<CategoryTarget>,
}

/// 目标 vs 实际 序列，按 labels 对齐
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub actual: Vec<f64>,
    pub target: Vec<f64>,
}

/// 按经理汇总的 PO 金额，按参考数据中的经理顺序对齐
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManagerSeries {
    pub managers: Vec<String>,
    pub totals: Vec<f64>,
}

fn to_chart_value(value: Option<&BigDecimal>) -> f64 {
    value.and_then(|v| v.to_f64()).unwrap_or(0.0)
}

/// 实际值按图表分类汇总，键为归一化后的分类名
pub fn actual_by_category(records: &[BillingRecord]) -> HashMap<String, BigDecimal> {
    let mut sums: HashMap<String, BigDecimal> = HashMap::new();
    for record in records {
        let Some(bucket) = bucket_for(record.job_number(), record.channel(), record.commercial_type())
        else {
            continue;
        };
        *sums
            .entry(norm_cat(bucket.label()))
            .or_insert_with(|| BigDecimal::from(0)) += record.po_amount();
    }
    sums
}

pub fn target_vs_actual(records: &[BillingRecord], reference: &ReferenceData) -> ChartSeries {
    let actual = actual_by_category(records);

    let mut targets: HashMap<String, BigDecimal> = HashMap::new();
    for t in &reference.targets {
        *targets
            .entry(norm_cat(&t.category))
            .or_insert_with(|| BigDecimal::from(0)) += &t.target;
    }

    let labels: Vec<String> = ChartBucket::ALL.iter().map(|b| b.label().to_string()).collect();
    let actual = labels
        .iter()
        .map(|l| to_chart_value(actual.get(&norm_cat(l))))
        .collect();
    let target = labels
        .iter()
        .map(|l| to_chart_value(targets.get(&norm_cat(l))))
        .collect();

    ChartSeries { labels, actual, target }
}

/// 经理汇总；不在参考列表中的经理不计入
pub fn manager_totals(records: &[BillingRecord], reference: &ReferenceData) -> ManagerSeries {
    let mut sums: HashMap<String, BigDecimal> = HashMap::new();
    for record in records.iter().filter(|r| r.job_number().is_some()) {
        let Some(manager) = record.manager.as_deref() else {
            continue;
        };
        *sums
            .entry(norm_cat(manager))
            .or_insert_with(|| BigDecimal::from(0)) += record.po_amount();
    }

    let totals = reference
        .managers
        .iter()
        .map(|m| to_chart_value(sums.get(&norm_cat(m))))
        .collect();

    ManagerSeries {
        managers: reference.managers.clone(),
        totals,
    }
}
