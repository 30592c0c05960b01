use super::send_chunked;
use crate::hypotheses::types::Verdict;
use crate::hypotheses::{TimelinePoint, VerdictTally};
use crate::papers::analysis::paper_url;
use crate::state::Context;

/// List the open hypotheses being tracked
#[poise::command(slash_command)]
pub async fn hypotheses(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let catalog = &ctx.data().hypotheses;
    if catalog.hypotheses().is_empty() {
        ctx.say("No hypotheses available.").await?;
        return Ok(());
    }

    let mut output = String::from("**Current Open Questions**\n\n");
    for h in catalog.hypotheses() {
        let tally = VerdictTally::of(&catalog.timeline(h.id));
        output.push_str(&format!(
            "`{}` {} ({} support / {} reject / {} neutral)\n",
            h.id, h.text, tally.support, tally.reject, tally.neutral
        ));
    }
    ctx.say(output).await?;
    Ok(())
}

/// Confirmation timeline for a hypothesis
#[poise::command(slash_command)]
pub async fn timeline(
    ctx: Context<'_>,
    #[description = "Hypothesis id (default: first)"] hypothesis: Option<u32>,
) -> Result<(), anyhow::Error> {
    let catalog = &ctx.data().hypotheses;
    let selected = match hypothesis {
        Some(id) => catalog.get(id),
        None => catalog.hypotheses().first(),
    };
    let Some(selected) = selected else {
        ctx.say("Unknown hypothesis. Use `/hypo hypotheses` to list them.")
            .await?;
        return Ok(());
    };

    let points = catalog.timeline(selected.id);
    if points.is_empty() {
        ctx.say(format!("**{}**\n\nNo verdicts recorded yet.", selected.text))
            .await?;
        return Ok(());
    }

    let tally = VerdictTally::of(&points);
    let mut output = format!(
        "**{}**\n{} Support {} · {} Reject {} · {} Neutral {}\nNet confirmation: {:+.3} over {} papers\n\n**Timeline** (oldest first)\n",
        selected.text,
        marker(Verdict::Support),
        tally.support,
        marker(Verdict::Reject),
        tally.reject,
        marker(Verdict::Neutral),
        tally.neutral,
        tally.net_score,
        points.len()
    );
    for point in &points {
        output.push_str(&timeline_line(point));
    }

    output.push_str("\n**Verdicts** (newest first)\n");
    for score in catalog.scores_for(selected.id) {
        let point = TimelinePoint::from(score);
        output.push_str(&format!(
            "{} **[{}](<{}>)** | {} ({})\nPaper Credibility: {:.2} | Argument Credibility: {:.2} | assessed by {}\n",
            marker(point.verdict),
            point.title,
            paper_url(&score.paper_doi),
            point.journal,
            point.date_str,
            point.paper_score.unwrap_or(0.0),
            point.argument_score.unwrap_or(0.0),
            score.model,
        ));
        if let Some(reason) = &point.reason {
            output.push_str(&format!("> {}\n", reason));
        }
    }

    send_chunked(&ctx, &output).await
}

fn marker(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Support => "🟢",
        Verdict::Reject => "🔴",
        Verdict::Neutral => "⚪",
    }
}

fn timeline_line(point: &TimelinePoint) -> String {
    format!(
        "`{}` {} {} {:+.3} `{}` {} ({})\n",
        point.date_str,
        marker(point.verdict),
        point.verdict.as_str(),
        point.score,
        point.fill,
        point.title,
        point.journal
    )
}
