//! Catalog loading — the tab-separated course table.
//!
//! The input is a TSV export of the course catalog with a header row.
//! Header names are matched after the same normalization applied to
//! course names (trim, strip diacritics, casefold), so `Código` and
//! `codigo` resolve to the same column. All configured columns must be
//! present in the header — a schema missing any of them aborts the run
//! with [`Error::DataFormat`] before graph construction. Individual
//! rows, by contrast, degrade: a row without a course code still yields
//! a record (the builder excludes it from the graph), and short rows
//! read as absent fields.

use std::io::BufRead;

use crate::graph::builder::normalize_name;
use crate::graph::CourseRecord;
use crate::model::CourseAttrs;
use crate::{Error, Result};

/// Names of the catalog columns the pipeline consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogColumns {
    pub code: String,
    pub name: String,
    pub recommendations: String,
    pub t: String,
    pub p: String,
    pub e: String,
    pub i: String,
}

impl Default for CatalogColumns {
    fn default() -> Self {
        Self {
            code: "codigo".to_owned(),
            name: "nome".to_owned(),
            recommendations: "recomendacoes".to_owned(),
            t: "t".to_owned(),
            p: "p".to_owned(),
            e: "e".to_owned(),
            i: "i".to_owned(),
        }
    }
}

struct ColumnIndices {
    code: usize,
    name: usize,
    recommendations: usize,
    t: usize,
    p: usize,
    e: usize,
    i: usize,
}

impl ColumnIndices {
    fn resolve(header: &str, columns: &CatalogColumns) -> Result<Self> {
        let cells: Vec<String> = header.split('\t').map(normalize_name).collect();
        let find = |wanted: &str| cells.iter().position(|c| c == &normalize_name(wanted));

        let mut missing = Vec::new();
        let mut lookup = |wanted: &str| match find(wanted) {
            Some(idx) => idx,
            None => {
                missing.push(wanted.to_owned());
                usize::MAX
            }
        };

        let indices = Self {
            code: lookup(&columns.code),
            name: lookup(&columns.name),
            recommendations: lookup(&columns.recommendations),
            t: lookup(&columns.t),
            p: lookup(&columns.p),
            e: lookup(&columns.e),
            i: lookup(&columns.i),
        };

        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(Error::DataFormat(format!(
                "catalog header is missing required columns: {}",
                missing.join(", "),
            )))
        }
    }
}

/// A cell trimmed to `None` when empty or out of range.
fn cell(cells: &[&str], idx: usize) -> Option<String> {
    let value = cells.get(idx)?.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Read the catalog into course records, in row order.
pub fn read_catalog(
    reader: impl BufRead,
    columns: &CatalogColumns,
) -> Result<Vec<CourseRecord>> {
    let mut lines = reader.lines();
    let header = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::DataFormat("catalog is empty, header row required".to_owned()))?;
    let idx = ColumnIndices::resolve(&header, columns)?;

    let mut records = Vec::new();
    for line in lines {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let cells: Vec<&str> = line.split('\t').collect();

        records.push(CourseRecord {
            code: cell(&cells, idx.code),
            name: cell(&cells, idx.name).unwrap_or_default(),
            recommendations: cell(&cells, idx.recommendations),
            attrs: CourseAttrs::new(
                cell(&cells, idx.t),
                cell(&cells, idx.p),
                cell(&cells, idx.e),
                cell(&cells, idx.i),
            ),
        });
    }

    tracing::info!(records = records.len(), "catalog loaded");
    Ok(records)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "codigo\tnome\trecomendacoes\tt\tp\te\ti";

    fn read(text: &str) -> Result<Vec<CourseRecord>> {
        read_catalog(Cursor::new(text), &CatalogColumns::default())
    }

    #[test]
    fn test_reads_records_in_order() {
        let text = format!(
            "{HEADER}\nMAT1\tCálculo I\t\t60\t0\t\t\nMAT2\tCálculo II\tCálculo I\t60\t0\t\t"
        );
        let records = read(&text).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code.as_deref(), Some("MAT1"));
        assert_eq!(records[1].recommendations.as_deref(), Some("Cálculo I"));
        assert_eq!(records[0].attrs.t.as_deref(), Some("60"));
        assert_eq!(records[0].attrs.e, None);
    }

    #[test]
    fn test_header_matching_is_accent_and_case_insensitive() {
        let text = "Código\tNome\tRecomendações\tT\tP\tE\tI\nMAT1\tCálculo I\t\t\t\t\t";
        let records = read(text).unwrap();
        assert_eq!(records[0].code.as_deref(), Some("MAT1"));
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let err = read("codigo\tnome\nMAT1\tCálculo I").unwrap_err();
        match err {
            Error::DataFormat(msg) => assert!(msg.contains("recomendacoes")),
            other => panic!("expected DataFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_is_fatal() {
        assert!(matches!(read(""), Err(Error::DataFormat(_))));
    }

    #[test]
    fn test_row_without_code_kept_as_record() {
        let text = format!("{HEADER}\n\tÓrfã\t\t\t\t\t");
        let records = read(&text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, None);
        assert_eq!(records[0].name, "Órfã");
    }

    #[test]
    fn test_short_row_reads_as_absent_fields() {
        let text = format!("{HEADER}\nMAT1\tCálculo I");
        let records = read(&text).unwrap();
        assert_eq!(records[0].recommendations, None);
        assert_eq!(records[0].attrs, CourseAttrs::default());
    }
}
