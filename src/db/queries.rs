use crate::models::{
    BillingRecord, BillingRow, InvoiceRecord, PendingInvoiceRecord, PendingInvoiceRow, Period,
};
use sqlx::PgPool;

/// 查询某期间的开票计划行
pub async fn list_billing_records(
    pool: &PgPool,
    period: Period,
) -> Result<Vec<BillingRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, BillingRow>(
        r#"
        SELECT job_number, enq_type, type as kind,
               po_amount, eco, govt_tender, wip_amount,
               customer, manager, po_date
        FROM t_billing_planner
        WHERE month = $1
          AND year = $2
        ORDER BY id
        "#
    )
    .bind(period.month as i32)
    .bind(period.year)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(BillingRecord::from).collect())
}

/// 查询某期间的未开票行
pub async fn list_pending_invoices(
    pool: &PgPool,
    period: Period,
) -> Result<Vec<PendingInvoiceRecord>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PendingInvoiceRow>(
        r#"
        SELECT job_number, enquiry_type, type as kind,
               po_amount, eco, govt_tender, customer
        FROM t_pending_invoice
        WHERE month = $1
          AND year = $2
        ORDER BY id
        "#
    )
    .bind(period.month as i32)
    .bind(period.year)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(PendingInvoiceRecord::from).collect())
}

/// 查询某期间已开具的发票
pub async fn list_invoices(
    pool: &PgPool,
    period: Period,
) -> Result<Vec<InvoiceRecord>, sqlx::Error> {
    sqlx::query_as::<_, InvoiceRecord>(
        r#"
        SELECT job_number, invoice_date
        FROM t_invoice
        WHERE EXTRACT(MONTH FROM invoice_date) = $1
          AND EXTRACT(YEAR FROM invoice_date) = $2
        "#
    )
    .bind(period.month as i32)
    .bind(period.year)
    .fetch_all(pool)
    .await
}
