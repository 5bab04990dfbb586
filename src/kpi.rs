//! Keyword-based sales-potential KPIs.
//!
//! Each KPI counts the permits whose lowercased description contains a keyword.
//! Matching is plain substring containment, so "fence" also counts "fences" and "fenced".
//! A permit with no description never counts toward any KPI.

use crate::dataset::error::DatasetError;
use crate::types::columns::DESCRIPTION_LOWER;
use polars::prelude::*;

/// A labelled keyword whose occurrences in permit descriptions are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordKpi {
    pub label: &'static str,
    pub keyword: &'static str,
}

/// The dashboard's sales-potential KPIs, in display order.
pub const SALES_KPIS: [KeywordKpi; 4] = [
    KeywordKpi::new("Potential for Portable Toilet Sales", "bathroom"),
    KeywordKpi::new("Potential for Dumpster Sales", "demolition"),
    KeywordKpi::new("Potential for Commercial Flooring Sales", "flooring"),
    KeywordKpi::new("Potential for Fencing Sales", "fence"),
];

impl KeywordKpi {
    pub const fn new(label: &'static str, keyword: &'static str) -> Self {
        Self { label, keyword }
    }

    /// True where the description contains the keyword, ignoring case; null where there is no description.
    pub fn predicate(&self) -> Expr {
        col(DESCRIPTION_LOWER)
            .str()
            .contains_literal(lit(self.keyword.to_lowercase()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KpiCount {
    pub label: &'static str,
    pub keyword: &'static str,
    pub count: u64,
}

/// Counts matching rows for every KPI in one pass, returning results in `kpis` order.
pub fn count_keywords(frame: LazyFrame, kpis: &[KeywordKpi]) -> Result<Vec<KpiCount>, DatasetError> {
    if kpis.is_empty() {
        return Ok(Vec::new());
    }

    // Aliased by position; labels are free text and may repeat.
    let sums: Vec<Expr> = kpis
        .iter()
        .enumerate()
        .map(|(i, kpi)| {
            kpi.predicate()
                .cast(DataType::UInt64)
                .sum()
                .alias(format!("kpi_{i}"))
        })
        .collect();

    let totals = frame.select(sums).collect()?;

    kpis.iter()
        .enumerate()
        .map(|(i, kpi)| -> Result<KpiCount, DatasetError> {
            let count = totals
                .column(&format!("kpi_{i}"))?
                .u64()?
                .get(0)
                .unwrap_or(0);
            Ok(KpiCount {
                label: kpi.label,
                keyword: kpi.keyword,
                count,
            })
        })
        .collect()
}
