use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::models::SummaryTable;

/// 导出汇总表为 CSV
pub fn write_table_csv<W: Write>(table: &SummaryTable, output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record(&table.header)?;
    for row in &table.rows {
        let mut record = Vec::with_capacity(row.cells.len() + 1);
        record.push(row.label.as_str());
        record.extend(row.cells.iter().map(String::as_str));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

/// 通用行导出 (字段名作为表头)
pub fn write_rows_csv<W: Write, T: Serialize>(rows: &[T], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn table_to_csv_string(table: &SummaryTable) -> Result<String> {
    let mut buffer = Vec::new();
    write_table_csv(table, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

pub fn rows_to_csv_string<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows_csv(rows, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingRecord, TableRow};
    use bigdecimal::BigDecimal;

    #[test]
    fn table_csv_has_header_and_rows() {
        let table = SummaryTable {
            header: vec!["Category".into(), "Layout".into()],
            rows: vec![TableRow { label: "Total".into(), cells: vec!["2.50 L".into()] }],
        };
        let csv = table_to_csv_string(&table).unwrap();
        assert_eq!(csv, "Category,Layout\nTotal,2.50 L\n");
    }

    #[test]
    fn record_csv_uses_wire_field_names() {
        let rows = vec![BillingRecord {
            job_number: Some("J1_VA".into()),
            po_amount: BigDecimal::from(50000),
            ..Default::default()
        }];
        let csv = rows_to_csv_string(&rows).unwrap();
        let mut lines = csv.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("jobNumber,enqType,type,poAmount"));
        assert!(lines.next().unwrap().starts_with("J1_VA,,,50000"));
    }
}
