use chrono::Utc;
use dashmap::DashMap;
use sqlx::PgPool;
use std::sync::Arc;

use crate::db::queries;
use crate::error::Result;
use crate::models::{
    annotate_rows, AnnotatedRow, BillingRecord, InvoicePresence, PendingInvoiceRecord, Period,
    PeriodReport, SummaryTable,
};
use crate::service::aggregator::{aggregate_matrix, aggregate_pending, period_metrics};

/// 由已加载完毕的整期数据构建报表 (纯计算)
pub fn build_period_report(
    period: Period,
    records: &[BillingRecord],
    pending: &[PendingInvoiceRecord],
) -> PeriodReport {
    PeriodReport {
        period,
        primary: aggregate_matrix(records),
        not_invoiced: aggregate_pending(pending),
        metrics: period_metrics(records),
        generated_at: Utc::now(),
    }
}

/// 开票计划报表服务
pub struct ReportService {
    pool: PgPool,
    cache: DashMap<Period, Arc<PeriodReport>>,
    cache_enabled: bool,
    fraction_digits: usize,
}

impl ReportService {
    pub fn new(pool: PgPool, cache_enabled: bool, fraction_digits: usize) -> Self {
        Self {
            pool,
            cache: DashMap::new(),
            cache_enabled,
            fraction_digits,
        }
    }

    pub fn fraction_digits(&self) -> usize {
        self.fraction_digits
    }

    /// 获取期间报表：计划行与未开票行都加载完成后才汇总
    pub async fn period_report(&self, period: Period) -> Result<Arc<PeriodReport>> {
        if self.cache_enabled {
            if let Some(cached) = self.cache.get(&period) {
                tracing::debug!("期间 {}-{:02} 报表命中缓存", period.year, period.month);
                return Ok(cached.value().clone());
            }
        }

        let start = std::time::Instant::now();
        let (records, pending) = futures::try_join!(
            queries::list_billing_records(&self.pool, period),
            queries::list_pending_invoices(&self.pool, period),
        )?;

        let report = Arc::new(build_period_report(period, &records, &pending));

        if report.metrics.skipped_count > 0 {
            tracing::debug!(
                "期间 {}-{:02}: 跳过 {} 条作业编号为空的记录",
                period.year, period.month, report.metrics.skipped_count
            );
        }
        tracing::info!(
            "期间 {}-{:02} 报表生成: 计划行 {}, 未开票行 {}, 分类 {}, 耗时 {:?}",
            period.year,
            period.month,
            records.len(),
            pending.len(),
            report.primary.buckets.len(),
            start.elapsed()
        );

        if self.cache_enabled {
            self.cache.insert(period, report.clone());
        }
        Ok(report)
    }

    pub async fn summary_table(&self, period: Period) -> Result<SummaryTable> {
        let report = self.period_report(period).await?;
        Ok(SummaryTable::from_report(&report, self.fraction_digits))
    }

    /// 计划行 + 开票状态
    pub async fn annotated_rows(&self, period: Period) -> Result<Vec<AnnotatedRow>> {
        let (records, invoices) = futures::try_join!(
            queries::list_billing_records(&self.pool, period),
            queries::list_invoices(&self.pool, period),
        )?;
        let presence = InvoicePresence::from_invoices(&invoices);
        tracing::info!(
            "期间 {}-{:02}: {} 条计划行, {} 个已开票键",
            period.year, period.month, records.len(), presence.len()
        );
        Ok(annotate_rows(records, period, &presence))
    }

    pub async fn billing_records(&self, period: Period) -> Result<Vec<BillingRecord>> {
        Ok(queries::list_billing_records(&self.pool, period).await?)
    }

    /// 清除某期间的缓存，返回是否存在
    pub fn invalidate(&self, period: Period) -> bool {
        let removed = self.cache.remove(&period).is_some();
        if !removed {
            tracing::warn!("期间 {}-{:02} 无缓存报表", period.year, period.month);
        }
        removed
    }
}
