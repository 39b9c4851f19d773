//! Imported spreadsheet lookup, cascade tier 4.
//!
//! Imported sheets are loosely typed: key and value columns are located by
//! header-keyword heuristics rather than a fixed schema.

use serde::{Deserialize, Serialize};

use crate::adapter::{find_column, find_column_exact};
use crate::models::{Periodicity, RawRateRecord};

/// A loosely-typed imported table: string headers and string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpreadsheetTable {
    /// Column headers as found in the source file.
    pub headers: Vec<String>,
    /// Rows of cells, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

impl SpreadsheetTable {
    /// Looks up the first row matching the (region, union) key and maps its
    /// value cells into a raw rate record.
    ///
    /// Region matching is case-insensitive; the union name is compared
    /// trimmed-exact. Returns `None` when the sheet lacks key columns or no
    /// row matches.
    pub fn lookup(&self, region: &str, union_name: &str) -> Option<RawRateRecord> {
        let region_col = find_column(&self.headers, &["uf", "estado", "region", "state"])?;
        let union_col = find_column(&self.headers, &["sindicato", "union"])?;

        let voucher_col = find_column(&self.headers, &["vr_valor", "valor_vr", "vr_dia", "voucher"])
            .or_else(|| find_column_exact(&self.headers, &["vr"]));
        let meal_col = find_column(&self.headers, &["va_valor", "valor_va", "va_dia", "meal"])
            .or_else(|| find_column_exact(&self.headers, &["va"]));
        let days_col = find_column(&self.headers, &["dias", "days"]);
        let periodicity_col = find_column(&self.headers, &["period"]);

        let row = self.rows.iter().find(|row| {
            let row_region = cell(row, region_col).unwrap_or("");
            let row_union = cell(row, union_col).unwrap_or("");
            row_region.trim().eq_ignore_ascii_case(region.trim())
                && row_union.trim() == union_name.trim()
        })?;

        let mut record = RawRateRecord::new(region, union_name);
        record.voucher_rate = voucher_col
            .and_then(|c| cell(row, c))
            .map(str::to_string);
        record.meal_rate = meal_col.and_then(|c| cell(row, c)).map(str::to_string);
        record.required_days = days_col
            .and_then(|c| cell(row, c))
            .and_then(|v| v.trim().parse::<u32>().ok());
        record.periodicity = periodicity_col
            .and_then(|c| cell(row, c))
            .and_then(parse_periodicity);
        if record.is_empty() {
            return None;
        }
        Some(record)
    }
}

fn cell(row: &[String], idx: usize) -> Option<&str> {
    let value = row.get(idx)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

fn parse_periodicity(value: &str) -> Option<Periodicity> {
    let v = value.trim().to_lowercase();
    if v.starts_with("mes") || v.starts_with("mens") || v.starts_with("month") {
        Some(Periodicity::Monthly)
    } else if v.starts_with("dia") || v.starts_with("daily") {
        Some(Periodicity::Daily)
    } else {
        None
    }
}
