use poise::serenity_prelude as serenity;
use poise::CreateReply;
use tracing::{error, info};

use super::fetch_screened;
use crate::papers::export::{build_export, parse_domain_list, ExportBoard};
use crate::papers::types::{find_domain, AVAILABLE_DOMAINS};
use crate::state::Context;

/// Export screened papers as CSV, one file per domain
#[poise::command(slash_command)]
pub async fn export(
    ctx: Context<'_>,
    #[description = "Comma-separated domain ids, e.g. superconductors,quantum"] domains: String,
) -> Result<(), anyhow::Error> {
    let selected = parse_domain_list(&domains);
    if selected.is_empty() {
        ctx.say("Please select at least one domain to export.").await?;
        return Ok(());
    }

    let unknown: Vec<&str> = selected
        .iter()
        .filter(|d| find_domain(d).is_none())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        let valid: Vec<&str> = AVAILABLE_DOMAINS.iter().map(|d| d.id).collect();
        ctx.say(format!(
            "Unknown domain(s): `{}`. Valid: `{}`",
            unknown.join("`, `"),
            valid.join("`, `")
        ))
        .await?;
        return Ok(());
    }

    ctx.defer().await?;

    let date = chrono::Utc::now().date_naive();
    let header_mode = ctx.data().header_mode;
    let mut board = ExportBoard::new(&selected);
    let progress = ctx
        .send(CreateReply::default().content(board.render()))
        .await?;

    // One domain at a time: query, build, attach.
    for domain in &selected {
        board.processing(domain);
        progress
            .edit(ctx, CreateReply::default().content(board.render()))
            .await?;

        let papers = match fetch_screened(&ctx, domain).await {
            Ok(papers) => papers,
            Err(e) => {
                error!(domain = %domain, error = %e, "export query failed");
                board.failed(domain, &e.to_string());
                continue;
            }
        };

        match build_export(domain, &papers, date, header_mode) {
            Some(file) => {
                let rows = file.rows;
                let attachment =
                    serenity::CreateAttachment::bytes(file.contents.into_bytes(), file.filename.clone());
                let sent = ctx
                    .send(
                        CreateReply::default()
                            .content(format!("`{}` ({} rows)", file.filename, rows))
                            .attachment(attachment),
                    )
                    .await;
                match sent {
                    Ok(_) => {
                        info!(domain = %domain, rows, filename = %file.filename, "domain exported");
                        board.complete(domain, rows);
                    }
                    Err(e) => {
                        error!(domain = %domain, error = %e, "failed to upload export");
                        board.failed(domain, &e.to_string());
                    }
                }
            }
            None => board.complete(domain, 0),
        }
    }

    progress
        .edit(ctx, CreateReply::default().content(board.render()))
        .await?;
    Ok(())
}
