//! `npmc search` command implementation.

use npmc_core::error::NpmcResult;
use npmc_registry::SearchObject;

use super::CommandContext;

/// Execute the `npmc search` command
pub async fn execute(query: &str, limit: i32, ctx: &CommandContext) -> NpmcResult<()> {
    let result = ctx.client.search(query, limit).await?;

    if ctx.json {
        return ctx.output.json(&result);
    }

    if result.objects.is_empty() {
        ctx.output.info(&format!("No packages match '{}'", query));
        return Ok(());
    }

    for object in &result.objects {
        ctx.output.heading(&format_hit(object));
        if let Some(description) = &object.package.description {
            ctx.output.info(&format!("  {}", description));
        }
    }
    ctx.output.info(&format!(
        "{} of {} results",
        result.objects.len(),
        result.total
    ));
    Ok(())
}

/// `name@version  score 0.95`
pub fn format_hit(object: &SearchObject) -> String {
    format!(
        "{}@{}  score {:.2}",
        object.package.name, object.package.version, object.score.final_score
    )
}
