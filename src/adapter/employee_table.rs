//! Conversion of loose employee tables into domain records.
//!
//! One row per employee; columns are located by keyword heuristics and cell
//! values are coerced with per-row validation notes instead of hard failures.
//! Exclusion flags and the termination-notice vocabulary are resolved here so
//! the calculation core only ever sees typed fields.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    CommunicationStatus, DateInterval, Employee, ExclusionReason, ValidationNote,
};

use super::columns::{find_column, normalize_header};
use super::region::infer_region;

/// Exclusion keywords checked against category/role cell text, in priority
/// order.
const EXCLUSION_KEYWORDS: &[(&str, ExclusionReason)] = &[
    ("diretor", ExclusionReason::Director),
    ("aprendiz", ExclusionReason::Apprentice),
    ("estagi", ExclusionReason::Intern),
    ("exterior", ExclusionReason::International),
    ("fora do brasil", ExclusionReason::International),
    ("afast", ExclusionReason::OnLeave),
    ("licen", ExclusionReason::OnLeave),
];

/// Headers whose cells feed the exclusion-keyword scan.
const CATEGORY_HEADER_KEYWORDS: &[&str] = &[
    "cargo", "categoria", "funcao", "tipo", "perfil", "situacao", "status",
];

/// A loosely-typed employee dataset: string headers and string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTable {
    /// Column headers as found in the source file.
    pub headers: Vec<String>,
    /// Rows of cells, aligned with `headers`.
    pub rows: Vec<Vec<String>>,
}

struct ColumnMap {
    matricula: Option<usize>,
    name: Option<usize>,
    union_name: Option<usize>,
    region: Option<usize>,
    municipality: Option<usize>,
    admission: Option<usize>,
    termination: Option<usize>,
    notice_status: Option<usize>,
    notice_date: Option<usize>,
    categories: Vec<usize>,
    leaves: Vec<usize>,
}

impl EmployeeTable {
    fn resolve_columns(&self) -> ColumnMap {
        let h = &self.headers;
        let normalized: Vec<String> = h.iter().map(|c| normalize_header(c)).collect();
        let categories = normalized
            .iter()
            .enumerate()
            .filter(|(_, header)| {
                CATEGORY_HEADER_KEYWORDS.iter().any(|k| header.contains(k))
            })
            .map(|(idx, _)| idx)
            .collect();
        let leaves = normalized
            .iter()
            .enumerate()
            .filter(|(_, header)| header.contains("ferias") || header.contains("afast"))
            .map(|(idx, _)| idx)
            .collect();
        ColumnMap {
            matricula: find_column(h, &["matric", "id_colaborador"]),
            name: find_column(h, &["nome", "funcionario", "colaborador", "name"]),
            union_name: find_column(h, &["sind", "union"]),
            region: find_column(h, &["uf", "estado"]),
            municipality: find_column(h, &["munic"]),
            admission: find_column(h, &["admiss"]),
            termination: find_column(h, &["demiss", "deslig"]),
            notice_status: find_column(h, &["comunicado"]),
            notice_date: find_column(h, &["data_comunicado", "comunicado_data"]),
            categories,
            leaves,
        }
    }

    /// Parses every row into an [`Employee`], accumulating advisory notes
    /// for unparseable cells. Rows without a matricula are skipped with a
    /// note; no row aborts the conversion.
    pub fn parse_employees(&self) -> (Vec<Employee>, Vec<ValidationNote>) {
        let columns = self.resolve_columns();
        let mut employees = Vec::with_capacity(self.rows.len());
        let mut notes = Vec::new();

        for (row_idx, row) in self.rows.iter().enumerate() {
            let matricula = match columns.matricula.and_then(|c| cell(row, c)) {
                Some(id) => id.to_string(),
                None => {
                    notes.push(ValidationNote::new(
                        format!("row {}", row_idx + 1),
                        "Row skipped: missing matricula",
                    ));
                    continue;
                }
            };

            let union_name = columns
                .union_name
                .and_then(|c| cell(row, c))
                .unwrap_or("")
                .to_string();

            let region = columns
                .region
                .and_then(|c| cell(row, c))
                .map(|r| r.to_uppercase())
                .or_else(|| infer_region(&union_name).map(str::to_string));

            let admission_date = parse_date_cell(
                row,
                columns.admission,
                &matricula,
                "admission date",
                &mut notes,
            );
            let termination_date = parse_date_cell(
                row,
                columns.termination,
                &matricula,
                "termination date",
                &mut notes,
            );
            let notice_date = parse_date_cell(
                row,
                columns.notice_date,
                &matricula,
                "termination notice date",
                &mut notes,
            );

            let notice_status = match columns.notice_status.and_then(|c| cell(row, c)) {
                Some(text) if text.to_uppercase().contains("OK") => {
                    CommunicationStatus::Acknowledged
                }
                Some(_) => CommunicationStatus::Pending,
                None => CommunicationStatus::Unknown,
            };

            let exclusion = self.infer_exclusion(&columns, row);
            let leave_intervals =
                parse_leave_intervals(row, &columns.leaves, &matricula, &mut notes);

            employees.push(Employee {
                matricula,
                name: columns
                    .name
                    .and_then(|c| cell(row, c))
                    .unwrap_or("")
                    .to_string(),
                union_name,
                region,
                municipality: columns
                    .municipality
                    .and_then(|c| cell(row, c))
                    .map(str::to_string),
                admission_date,
                termination_date,
                termination_notice: notice_status,
                termination_notice_date: notice_date,
                leave_intervals,
                exclusion,
            });
        }

        (employees, notes)
    }

    fn infer_exclusion(&self, columns: &ColumnMap, row: &[String]) -> Option<ExclusionReason> {
        let blob: String = columns
            .categories
            .iter()
            .filter_map(|&c| cell(row, c))
            .map(|v| normalize_header(v).replace('_', " "))
            .collect::<Vec<_>>()
            .join(" ");
        EXCLUSION_KEYWORDS
            .iter()
            .find(|(keyword, _)| blob.contains(keyword))
            .map(|(_, reason)| *reason)
    }
}

fn cell(row: &[String], idx: usize) -> Option<&str> {
    let value = row.get(idx)?.trim();
    if value.is_empty() { None } else { Some(value) }
}

/// Parses a date in ISO or Brazilian day-first format.
pub(crate) fn parse_date(value: &str) -> Option<NaiveDate> {
    let v = value.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(v, "%d/%m/%Y"))
        .ok()
}

fn parse_date_cell(
    row: &[String],
    column: Option<usize>,
    matricula: &str,
    field: &str,
    notes: &mut Vec<ValidationNote>,
) -> Option<NaiveDate> {
    let raw = column.and_then(|c| cell(row, c))?;
    match parse_date(raw) {
        Some(date) => Some(date),
        None => {
            notes.push(ValidationNote::new(
                matricula,
                format!("Invalid {field}: '{raw}'"),
            ));
            None
        }
    }
}

/// Parses leave cells shaped as `"YYYY-MM-DD a YYYY-MM-DD"`.
fn parse_leave_intervals(
    row: &[String],
    columns: &[usize],
    matricula: &str,
    notes: &mut Vec<ValidationNote>,
) -> Vec<DateInterval> {
    let mut intervals = Vec::new();
    for &col in columns {
        let Some(raw) = cell(row, col) else { continue };
        let parts: Vec<&str> = raw
            .split(|c| c == 'a' || c == 'à' || c == 'A')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        let parsed = match parts.as_slice() {
            [start, end] => parse_date(start).zip(parse_date(end)),
            _ => None,
        };
        match parsed {
            Some((start, end)) if start <= end => {
                intervals.push(DateInterval { start, end });
            }
            _ => {
                notes.push(ValidationNote::new(
                    matricula,
                    format!("Invalid leave interval: '{raw}'"),
                ));
            }
        }
    }
    intervals
}
