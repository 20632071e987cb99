use crate::models::category::Column;
use bigdecimal::BigDecimal;
use indexmap::IndexMap;
use serde::Serialize;
use std::hash::Hash;

/// 汇总表表头 (金额列顺序)
pub const TOTALS_HEADER: [&str; 10] = [
    "Layout",
    "Analysis",
    "GovtLayout",
    "GovtAnalysis",
    "Library",
    "DFM",
    "VA",
    "NPI",
    "ECO",
    "GrandTotal",
];

/// GrandTotal 的两种口径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrandTotalMode {
    /// 平铺汇总：Layout + Analysis + Library + DFM + VA + NPI + ECO
    Flat,
    /// 矩阵汇总：Layout + Analysis + GovtLayout + GovtAnalysis + Library + DFM
    Matrix,
}

/// 汇总行 (每个桶一行，外加一行总计)
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TotalsRow {
    #[serde(rename = "Layout")]
    pub layout: BigDecimal,
    #[serde(rename = "Analysis")]
    pub analysis: BigDecimal,
    #[serde(rename = "GovtLayout")]
    pub govt_layout: BigDecimal,
    #[serde(rename = "GovtAnalysis")]
    pub govt_analysis: BigDecimal,
    #[serde(rename = "Library")]
    pub library: BigDecimal,
    #[serde(rename = "DFM")]
    pub dfm: BigDecimal,
    #[serde(rename = "VA")]
    pub va: BigDecimal,
    #[serde(rename = "NPI")]
    pub npi: BigDecimal,
    #[serde(rename = "ECO")]
    pub eco: BigDecimal,
    #[serde(rename = "GrandTotal")]
    pub grand_total: BigDecimal,
}

impl TotalsRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: Column) -> &BigDecimal {
        match column {
            Column::Layout => &self.layout,
            Column::Analysis => &self.analysis,
            Column::GovtLayout => &self.govt_layout,
            Column::GovtAnalysis => &self.govt_analysis,
            Column::Library => &self.library,
            Column::Dfm => &self.dfm,
            Column::Va => &self.va,
            Column::Npi => &self.npi,
        }
    }

    fn get_mut(&mut self, column: Column) -> &mut BigDecimal {
        match column {
            Column::Layout => &mut self.layout,
            Column::Analysis => &mut self.analysis,
            Column::GovtLayout => &mut self.govt_layout,
            Column::GovtAnalysis => &mut self.govt_analysis,
            Column::Library => &mut self.library,
            Column::Dfm => &mut self.dfm,
            Column::Va => &mut self.va,
            Column::Npi => &mut self.npi,
        }
    }

    pub fn add(&mut self, column: Column, amount: &BigDecimal) {
        *self.get_mut(column) += amount;
    }

    pub fn add_eco(&mut self, amount: &BigDecimal) {
        self.eco += amount;
    }

    pub fn compute_grand_total_flat(&self) -> BigDecimal {
        &self.layout + &self.analysis + &self.library + &self.dfm + &self.va + &self.npi + &self.eco
    }

    pub fn compute_grand_total_matrix(&self) -> BigDecimal {
        &self.layout
            + &self.analysis
            + &self.govt_layout
            + &self.govt_analysis
            + &self.library
            + &self.dfm
    }

    pub fn recompute_grand_total(&mut self, mode: GrandTotalMode) {
        self.grand_total = match mode {
            GrandTotalMode::Flat => self.compute_grand_total_flat(),
            GrandTotalMode::Matrix => self.compute_grand_total_matrix(),
        };
    }

    /// 按 TOTALS_HEADER 顺序返回全部金额
    pub fn values(&self) -> [&BigDecimal; 10] {
        [
            &self.layout,
            &self.analysis,
            &self.govt_layout,
            &self.govt_analysis,
            &self.library,
            &self.dfm,
            &self.va,
            &self.npi,
            &self.eco,
            &self.grand_total,
        ]
    }
}

/// 汇总结果：桶 (按首次出现顺序) + 总计行
#[derive(Debug, Clone, Serialize)]
pub struct Summary<K> {
    pub buckets: IndexMap<K, TotalsRow>,
    pub total: TotalsRow,
}

impl<K: Eq + Hash> Summary<K> {
    pub fn new() -> Self {
        Self {
            buckets: IndexMap::new(),
            total: TotalsRow::new(),
        }
    }

    pub fn bucket(&self, key: &K) -> Option<&TotalsRow> {
        self.buckets.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl<K: Eq + Hash> Default for Summary<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> PartialEq for Summary<K> {
    fn eq(&self, other: &Self) -> bool {
        self.buckets == other.buckets && self.total == other.total
    }
}
