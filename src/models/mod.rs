pub mod billing;
pub mod category;
pub mod invoice;
pub mod report;
pub mod totals;

pub use billing::{parse_amount, Billable, BillingRecord, BillingRow, PendingInvoiceRecord, PendingInvoiceRow};
pub use category::{
    bucket_for, column_for, is_govt_tender, main_category_for, ChartBucket, Column, FlatBucket,
    MainCategory, WorkType, SUFFIX_RULES,
};
pub use invoice::{annotate_rows, invoice_key, row_class, AnnotatedRow, InvoicePresence, InvoiceRecord, RowClass};
pub use report::{MatrixSummary, Period, PeriodMetrics, PeriodReport, SummaryTable, TableRow};
pub use totals::{GrandTotalMode, Summary, TotalsRow, TOTALS_HEADER};

/// 平铺汇总 (每个桶只累加自身字段)
pub type FlatSummary = Summary<FlatBucket>;
