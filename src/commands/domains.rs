use crate::papers::types::AVAILABLE_DOMAINS;
use crate::state::Context;

/// List research domains available for analysis and export
#[poise::command(slash_command)]
pub async fn domains(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let mut output = String::from("**Research Domains**\n\n");
    for domain in AVAILABLE_DOMAINS {
        output.push_str(&format!(
            "- **{}** (`{}`): {}\n",
            domain.label, domain.id, domain.description
        ));
    }
    ctx.say(output).await?;
    Ok(())
}
