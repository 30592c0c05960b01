use super::{autocomplete_domain, fetch_screened};
use crate::papers::summary::DomainSummary;
use crate::papers::types::find_domain;
use crate::state::Context;

/// KPI summary for a research domain
#[poise::command(slash_command)]
pub async fn kpi(
    ctx: Context<'_>,
    #[description = "Domain (default: superconductors)"]
    #[autocomplete = "autocomplete_domain"]
    domain: Option<String>,
) -> Result<(), anyhow::Error> {
    let domain = domain
        .map(|d| d.trim().to_lowercase())
        .unwrap_or_else(|| "superconductors".to_string());
    let Some(info) = find_domain(&domain) else {
        ctx.say(format!("Unknown domain `{}`. Use `/hypo domains` to list them.", domain))
            .await?;
        return Ok(());
    };

    ctx.defer().await?;

    let papers = match fetch_screened(&ctx, info.id).await {
        Ok(papers) => papers,
        Err(e) => {
            ctx.say(format!("Error loading data: {}", e)).await?;
            return Ok(());
        }
    };

    let summary = DomainSummary::of(&papers);
    let max_tc = summary
        .max_critical_temperature
        .map(|t| format!("{:.1} K", t))
        .unwrap_or_else(|| "n/a".to_string());

    ctx.say(format!(
        "**KPI Summary: {}**\n\
         Screened papers: {}\n\
         Extracted materials: {}\n\
         Papers without materials: {}\n\
         Plottable materials: {}\n\
         Cuprates: {}\n\
         Highest critical temperature: {}",
        info.label,
        summary.papers,
        summary.materials,
        summary.papers_without_materials,
        summary.plotted_points,
        summary.cuprates,
        max_tc
    ))
    .await?;
    Ok(())
}
