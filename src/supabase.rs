use anyhow::Context;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::papers::types::Paper;

const PAPER_COLUMNS: &str =
    "paper_id,title,authors,published_date,output,domain,processed,screened,screen_passed";

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only filter over the `papers` table.
#[derive(Debug, Clone)]
pub struct PaperQuery {
    pub domain: String,
    pub processed: bool,
    pub screened: bool,
    pub screen_passed: bool,
    pub require_output: bool,
}

impl PaperQuery {
    /// Processed, screened and approved papers with analyzer output.
    pub fn screened(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            processed: true,
            screened: true,
            screen_passed: true,
            require_output: true,
        }
    }

    /// PostgREST query string pairs.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", PAPER_COLUMNS.to_string()),
            ("domain", format!("eq.{}", self.domain)),
            ("processed", format!("eq.{}", self.processed)),
            ("screened", format!("eq.{}", self.screened)),
            ("screen_passed", format!("eq.{}", self.screen_passed)),
        ];
        if self.require_output {
            params.push(("output", "not.is.null".to_string()));
        }
        params
    }
}

pub struct SupabaseClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    pub async fn fetch_papers(&self, query: &PaperQuery) -> Result<Vec<Paper>, QueryError> {
        let resp = self
            .client
            .get(self.table_url("papers"))
            .query(&query.params())
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.anon_key))
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(QueryError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let papers = decode_papers(&body)?;
        debug!(domain = %query.domain, count = papers.len(), "papers fetched");
        Ok(papers)
    }
}

/// Decode row by row; a row that still fails is logged and skipped.
fn decode_papers(body: &str) -> Result<Vec<Paper>, serde_json::Error> {
    let rows: Vec<serde_json::Value> = serde_json::from_str(body)?;
    let mut papers = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        match serde_json::from_value::<Paper>(row) {
            Ok(paper) => papers.push(paper),
            Err(e) => warn!(index, error = %e, "skipping malformed paper row"),
        }
    }
    Ok(papers)
}

/// PostgREST puts the reason in `message`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screened_query_params() {
        let params = PaperQuery::screened("superconductors").params();
        assert_eq!(params[0].0, "select");
        assert!(params[0].1.contains("screen_passed"));
        assert!(params.contains(&("domain", "eq.superconductors".to_string())));
        assert!(params.contains(&("processed", "eq.true".to_string())));
        assert!(params.contains(&("screened", "eq.true".to_string())));
        assert!(params.contains(&("screen_passed", "eq.true".to_string())));
        assert!(params.contains(&("output", "not.is.null".to_string())));
    }

    #[test]
    fn test_output_filter_optional() {
        let mut q = PaperQuery::screened("quantum");
        q.require_output = false;
        assert!(q.params().iter().all(|(k, _)| *k != "output"));
    }

    #[test]
    fn test_malformed_row_does_not_fail_batch() {
        let body = r#"[
            {"paper_id": "p1", "title": "ok", "domain": "superconductors"},
            {"paper_id": "p2", "title": null, "domain": "superconductors"},
            "not a row"
        ]"#;
        let papers = decode_papers(body).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(papers[1].paper_id, "p2");
        assert_eq!(papers[1].title, None);
    }

    #[test]
    fn test_non_array_body_is_decode_error() {
        assert!(decode_papers(r#"{"message":"nope"}"#).is_err());
    }

    #[test]
    fn test_error_message_extraction() {
        assert_eq!(
            error_message(r#"{"code":"42P01","message":"relation \"papers\" does not exist"}"#),
            "relation \"papers\" does not exist"
        );
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
    }

    #[test]
    fn test_table_url_trims_slash() {
        let config = AppConfig {
            supabase_url: "https://abc.supabase.co/".to_string(),
            supabase_anon_key: "anon".to_string(),
            discord_token: "tok".to_string(),
            guild_id: None,
            header_mode: Default::default(),
        };
        let client = SupabaseClient::new(&config).unwrap();
        assert_eq!(client.table_url("papers"), "https://abc.supabase.co/rest/v1/papers");
    }
}
