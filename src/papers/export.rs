use chrono::NaiveDate;

use super::csv::{export_filename, to_csv, HeaderMode};
use super::rows::derive_rows;
use super::types::{find_domain, Paper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStatus {
    Pending,
    Processing,
    Complete,
    Error,
}

impl ExportStatus {
    fn marker(self) -> &'static str {
        match self {
            Self::Pending => "⚪",
            Self::Processing => "🔵",
            Self::Complete => "🟢",
            Self::Error => "🔴",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportProgress {
    pub domain: String,
    pub status: ExportStatus,
    pub message: String,
    pub count: Option<usize>,
}

/// A finished CSV ready to be sent.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub contents: String,
    pub rows: usize,
}

/// Turn one domain's papers into a CSV file. `None` when there is nothing to export.
pub fn build_export(
    domain: &str,
    papers: &[Paper],
    date: NaiveDate,
    mode: HeaderMode,
) -> Option<ExportFile> {
    if papers.is_empty() {
        return None;
    }
    let rows = derive_rows(papers);
    Some(ExportFile {
        filename: export_filename(domain, date),
        contents: to_csv(&rows, mode),
        rows: rows.len(),
    })
}

/// Progress of a multi-domain export, one entry per domain in request order.
#[derive(Debug, Clone, Default)]
pub struct ExportBoard {
    entries: Vec<ExportProgress>,
}

impl ExportBoard {
    pub fn new<S: AsRef<str>>(domains: &[S]) -> Self {
        Self {
            entries: domains
                .iter()
                .map(|d| ExportProgress {
                    domain: d.as_ref().to_string(),
                    status: ExportStatus::Pending,
                    message: "Waiting...".to_string(),
                    count: None,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[ExportProgress] {
        &self.entries
    }

    fn update(&mut self, domain: &str, status: ExportStatus, message: String, count: Option<usize>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.domain == domain) {
            entry.status = status;
            entry.message = message;
            entry.count = count;
        }
    }

    pub fn processing(&mut self, domain: &str) {
        self.update(
            domain,
            ExportStatus::Processing,
            "Querying database...".to_string(),
            None,
        );
    }

    pub fn complete(&mut self, domain: &str, count: usize) {
        let message = if count == 0 {
            "No data found".to_string()
        } else {
            format!("Successfully exported {} entries", count)
        };
        self.update(domain, ExportStatus::Complete, message, Some(count));
    }

    pub fn failed(&mut self, domain: &str, reason: &str) {
        self.update(
            domain,
            ExportStatus::Error,
            format!("Export failed: {}", reason),
            None,
        );
    }

    pub fn is_finished(&self) -> bool {
        self.entries
            .iter()
            .all(|e| matches!(e.status, ExportStatus::Complete | ExportStatus::Error))
    }

    pub fn render(&self) -> String {
        let mut out = if self.is_finished() {
            String::from("**Export Finished**\n")
        } else {
            String::from("**Export Progress**\n")
        };
        for entry in self.entries() {
            let label = find_domain(&entry.domain)
                .map(|d| d.label)
                .unwrap_or(entry.domain.as_str());
            out.push_str(&format!(
                "{} **{}**: {}\n",
                entry.status.marker(),
                label,
                entry.message
            ));
        }
        out
    }
}

/// Split a comma/space separated domain list, dropping blanks and duplicates.
pub fn parse_domain_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn paper(id: &str, output: serde_json::Value) -> Paper {
        serde_json::from_value(json!({
            "paper_id": id,
            "title": "Title",
            "output": output,
            "domain": "superconductors",
            "processed": true,
            "screened": true,
            "screen_passed": true
        }))
        .unwrap()
    }

    #[test]
    fn test_build_export_counts_rows() {
        let papers = vec![
            paper("p1", json!({"materials": [{"name": "A"}, {"name": "B"}]})),
            paper("p2", json!({})),
        ];
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let file = build_export("superconductors", &papers, date, HeaderMode::Union).unwrap();
        assert_eq!(file.rows, 3);
        assert_eq!(file.filename, "superconductors_export_2024-01-02.csv");
        assert_eq!(file.contents.lines().count(), 4);
        assert!(file.contents.starts_with("paper_id,title,authors,published_date,name\n"));
    }

    #[test]
    fn test_build_export_empty() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        assert!(build_export("quantum", &[], date, HeaderMode::Union).is_none());
    }

    #[test]
    fn test_board_lifecycle() {
        let mut board = ExportBoard::new(&["superconductors", "quantum", "magnets"]);
        assert!(board.entries().iter().all(|e| e.status == ExportStatus::Pending));

        board.processing("superconductors");
        assert_eq!(board.entries()[0].message, "Querying database...");
        board.complete("superconductors", 12);
        board.processing("quantum");
        board.complete("quantum", 0);
        assert!(!board.is_finished());
        assert!(board.render().starts_with("**Export Progress**"));
        board.failed("magnets", "relation \"papers\" does not exist");
        assert!(board.is_finished());

        let e = board.entries();
        assert_eq!(e[0].message, "Successfully exported 12 entries");
        assert_eq!(e[1].message, "No data found");
        assert_eq!(e[1].count, Some(0));
        assert_eq!(e[2].status, ExportStatus::Error);
        assert!(e[2].message.starts_with("Export failed: "));

        let text = board.render();
        assert!(text.starts_with("**Export Finished**"));
        assert!(text.contains("**Superconductors**: Successfully exported 12 entries\n"));
        assert_eq!(text.matches("12 entries").count(), 1);
        assert!(text.contains("**Magnets**: Export failed"));
    }

    #[test]
    fn test_parse_domain_list() {
        assert_eq!(
            parse_domain_list("Superconductors, quantum quantum,,magnets"),
            vec!["superconductors", "quantum", "magnets"]
        );
        assert!(parse_domain_list(" , ").is_empty());
    }
}
