mod analysis;
mod domains;
mod export;
mod kpi;
mod timeline;

use tracing::warn;

use crate::papers::types::{Paper, AVAILABLE_DOMAINS};
use crate::state::Context;
use crate::supabase::{PaperQuery, QueryError};

/// Superconductor research dashboard
#[poise::command(
    slash_command,
    subcommands(
        "domains::domains",
        "analysis::analysis",
        "kpi::kpi",
        "export::export",
        "timeline::hypotheses",
        "timeline::timeline"
    )
)]
pub async fn hypo(_ctx: Context<'_>) -> Result<(), anyhow::Error> {
    Ok(())
}

/// Processed, screened and approved papers for a domain.
async fn fetch_screened(ctx: &Context<'_>, domain: &str) -> Result<Vec<Paper>, QueryError> {
    let result = ctx
        .data()
        .supabase
        .fetch_papers(&PaperQuery::screened(domain))
        .await;
    if let Err(e) = &result {
        warn!(domain, error = %e, "paper query failed");
    }
    result
}

/// Autocomplete for domain ids.
async fn autocomplete_domain(_ctx: Context<'_>, partial: &str) -> Vec<String> {
    let partial = partial.to_lowercase();
    AVAILABLE_DOMAINS
        .iter()
        .filter(|d| d.id.contains(&partial) || d.label.to_lowercase().contains(&partial))
        .map(|d| d.id.to_string())
        .collect()
}

/// Send a message in Discord-safe chunks (max 1990 chars), splitting on line breaks.
async fn send_chunked(ctx: &Context<'_>, text: &str) -> Result<(), anyhow::Error> {
    for chunk in split_chunks(text, 1990) {
        ctx.say(chunk).await?;
    }
    Ok(())
}

fn split_chunks(text: &str, max: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    let mut remaining = text;
    while !remaining.is_empty() {
        let mut end = remaining.len().min(max);
        while !remaining.is_char_boundary(end) {
            end -= 1;
        }
        let split_at = if end < remaining.len() {
            remaining[..end]
                .rfind('\n')
                .or_else(|| remaining[..end].rfind(' '))
                .map(|i| i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&remaining[..split_at]);
        remaining = &remaining[split_at..];
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_short_text() {
        assert_eq!(split_chunks("hello", 1990), vec!["hello"]);
        assert!(split_chunks("", 1990).is_empty());
    }

    #[test]
    fn test_split_prefers_newlines() {
        let text = "aaaa\nbbbb\ncccc";
        assert_eq!(split_chunks(text, 7), vec!["aaaa\n", "bbbb\n", "cccc"]);
    }

    #[test]
    fn test_split_respects_char_boundaries() {
        let text = "ÅÅÅÅ";
        let chunks = split_chunks(text, 3);
        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.len() <= 3));
    }
}
