use tracing::info;

use super::{fetch_screened, send_chunked};
use crate::papers::analysis::{
    collect_points, extract_year, paper_url, temperature_color, truncate_title, PointFilter,
    PointOrder, SuperconductorPoint, LEGEND_STOPS,
};
use crate::state::Context;

const DEFAULT_LIMIT: usize = 15;
const MAX_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, poise::ChoiceParameter)]
pub enum SortChoice {
    #[name = "critical temperature"]
    CriticalTemperature,
    #[name = "oxygen percentage"]
    OxygenPercentage,
    #[name = "publication date"]
    PublishedDate,
}

impl From<SortChoice> for PointOrder {
    fn from(choice: SortChoice) -> Self {
        match choice {
            SortChoice::CriticalTemperature => PointOrder::CriticalTemperature,
            SortChoice::OxygenPercentage => PointOrder::OxygenPercentage,
            SortChoice::PublishedDate => PointOrder::PublishedDate,
        }
    }
}

/// Superconductor analysis: oxygen content and lattice parameters vs critical temperature
#[poise::command(slash_command)]
pub async fn analysis(
    ctx: Context<'_>,
    #[description = "Only show cuprates (Cu and O in the composition)"] cuprates_only: Option<bool>,
    #[description = "Minimum critical temperature in K"] min_tc: Option<f64>,
    #[description = "Sort order (highest first)"] sort: Option<SortChoice>,
    #[description = "Max materials per table"] limit: Option<u32>,
) -> Result<(), anyhow::Error> {
    ctx.defer().await?;

    let papers = match fetch_screened(&ctx, "superconductors").await {
        Ok(papers) => papers,
        Err(e) => {
            ctx.say(format!("Error loading data: {}", e)).await?;
            return Ok(());
        }
    };

    let points = collect_points(&papers);
    info!(papers = papers.len(), points = points.len(), "superconductor analysis loaded");

    if points.is_empty() {
        ctx.say("No superconductor materials with critical temperature and lattice parameters found.")
            .await?;
        return Ok(());
    }

    let filter = PointFilter {
        cuprates_only: cuprates_only.unwrap_or(false),
        min_tc,
        order: sort.map(PointOrder::from).unwrap_or_default(),
    };
    let limit = limit.map_or(DEFAULT_LIMIT, |l| (l as usize).clamp(1, MAX_LIMIT));
    let shown = filter.apply(&points);

    let cuprates: Vec<&SuperconductorPoint> = shown.iter().filter(|p| p.is_cuprate()).collect();

    let mut output = format!(
        "**Superconductor Analysis** ({} papers, {} materials, {} after filters)\n\n",
        papers.len(),
        points.len(),
        shown.len()
    );

    output.push_str("**Oxygen Content vs Critical Temperature for Cuprates**\n");
    if cuprates.is_empty() {
        output.push_str("_No cuprates match the current filters._\n");
    }
    for p in cuprates.iter().take(limit) {
        output.push_str(&format!(
            "- `{}` O {:.1}% | Tc {:.1} K | {} | [{}](<{}>)\n",
            p.composition,
            p.oxygen_percentage.unwrap_or_default(),
            p.critical_temperature,
            extract_year(&p.published_date),
            truncate_title(&p.title, 60),
            paper_url(&p.paper_id),
        ));
    }

    output.push_str("\n**Lattice Parameters vs Critical Temperature**\n");
    output.push_str(&legend());
    for p in shown.iter().take(limit) {
        output.push_str(&format!(
            "- a {:.3} Å | c {:.3} Å | Tc {:.1} K `{}` | {} | [{}](<{}>)\n",
            p.lattice_a,
            p.lattice_c,
            p.critical_temperature,
            p.color(),
            extract_year(&p.published_date),
            truncate_title(&p.title, 60),
            paper_url(&p.paper_id),
        ));
    }
    if shown.len() > limit {
        output.push_str(&format!("_…and {} more_\n", shown.len() - limit));
    }

    send_chunked(&ctx, &output).await
}

fn legend() -> String {
    let stops: Vec<String> = LEGEND_STOPS
        .iter()
        .map(|t| format!("{} K `{}`", t, temperature_color(*t)))
        .collect();
    format!("Critical Temperature (K): {}\n", stops.join(" · "))
}
