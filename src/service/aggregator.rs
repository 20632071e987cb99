use bigdecimal::BigDecimal;

use crate::models::{
    column_for, main_category_for, Billable, BillingRecord, Column, FlatBucket, FlatSummary,
    GrandTotalMode, MatrixSummary, PendingInvoiceRecord, PeriodMetrics,
};

/// 矩阵汇总：行 = 主分类 (渠道 × 类型)，列 = 工作类型
///
/// 作业编号为空的行直接跳过；GrandTotal 不含 VA / NPI / ECO。
pub fn aggregate_matrix<R: Billable>(records: &[R]) -> MatrixSummary {
    let mut summary = MatrixSummary::new();

    for record in records {
        let Some(job_number) = record.job_number() else {
            continue;
        };

        let category = main_category_for(record.channel(), record.commercial_type());
        let column = column_for(job_number, record.govt_tender());

        let row = summary.buckets.entry(category).or_default();
        row.add(column, record.po_amount());
        row.add_eco(record.eco());
        row.recompute_grand_total(GrandTotalMode::Matrix);

        summary.total.add(column, record.po_amount());
        summary.total.add_eco(record.eco());
        summary.total.recompute_grand_total(GrandTotalMode::Matrix);
    }

    summary
}

/// 平铺汇总：每行只落入一个桶，PO 金额累加到桶自身的字段
///
/// GrandTotal 使用平铺口径 (含 VA / NPI / ECO)。
pub fn aggregate_flat<R: Billable>(records: &[R]) -> FlatSummary {
    let mut summary = FlatSummary::new();

    for record in records {
        let Some(job_number) = record.job_number() else {
            continue;
        };

        let bucket = FlatBucket::for_job(job_number, record.channel(), record.commercial_type());
        let column = bucket.column();

        let row = summary.buckets.entry(bucket).or_default();
        row.add(column, record.po_amount());
        row.add_eco(record.eco());
        row.recompute_grand_total(GrandTotalMode::Flat);

        summary.total.add(column, record.po_amount());
        summary.total.add_eco(record.eco());
        summary.total.recompute_grand_total(GrandTotalMode::Flat);
    }

    summary
}

/// 未开票汇总，规则与矩阵汇总一致，结果单独展示为 "Not Invoiced"
pub fn aggregate_pending(records: &[PendingInvoiceRecord]) -> MatrixSummary {
    aggregate_matrix(records)
}

/// 全量统计：WIP 合计与 PO 合计，包含作业编号为空的行
pub fn period_metrics(records: &[BillingRecord]) -> PeriodMetrics {
    let mut metrics = PeriodMetrics {
        record_count: records.len(),
        ..Default::default()
    };

    for record in records {
        metrics.total_wip += &record.wip_amount;
        metrics.total_po += &record.po_amount;
        if record.job_number().is_none() {
            metrics.skipped_count += 1;
        }
    }

    metrics
}

/// 某一列在所有桶上的合计
pub fn column_sum(summary: &MatrixSummary, column: Column) -> BigDecimal {
    summary
        .buckets
        .values()
        .fold(BigDecimal::from(0), |acc, row| acc + row.get(column))
}
