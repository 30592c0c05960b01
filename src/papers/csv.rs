use std::str::FromStr;

use chrono::NaiveDate;
use serde_json::Value;

use super::types::Row;

/// How the header line is derived from the rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderMode {
    /// Every key seen across all rows, in first-seen order.
    #[default]
    Union,
    /// Keys of the first row only. Rows with other keys lose those cells.
    FirstRow,
}

impl FromStr for HeaderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "union" => Ok(Self::Union),
            "first-row" | "first_row" | "firstrow" => Ok(Self::FirstRow),
            other => Err(format!("unknown header mode: {}", other)),
        }
    }
}

pub fn headers(rows: &[Row], mode: HeaderMode) -> Vec<String> {
    match mode {
        HeaderMode::FirstRow => rows
            .first()
            .map(|r| r.keys().cloned().collect())
            .unwrap_or_default(),
        HeaderMode::Union => {
            let mut seen = std::collections::HashSet::new();
            let mut out = Vec::new();
            for key in rows.iter().flat_map(|r| r.keys()) {
                if seen.insert(key.as_str()) {
                    out.push(key.clone());
                }
            }
            out
        }
    }
}

/// Text of a cell before quoting. Null and missing are empty.
fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

pub fn escape_cell(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

/// Serialize rows to CSV. Lines are joined with `\n`, no trailing newline.
pub fn to_csv(rows: &[Row], mode: HeaderMode) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let headers = headers(rows, mode);
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|h| escape_cell(h))
            .collect::<Vec<_>>()
            .join(","),
    );
    for row in rows {
        let line = headers
            .iter()
            .map(|h| escape_cell(&cell_text(row.get(h))))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(line);
    }
    lines.join("\n")
}

/// `<domain>_export_<YYYY-MM-DD>.csv`
pub fn export_filename(domain: &str, date: NaiveDate) -> String {
    format!("{}_export_{}.csv", domain, date.format("%Y-%m-%d"))
}
