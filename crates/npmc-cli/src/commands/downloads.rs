//! `npmc downloads` command implementation.
//!
//! Totals come from the point endpoint; `--daily` switches to the range
//! endpoint and prints one line per day.

use npmc_core::error::NpmcResult;
use npmc_registry::DownloadRangeStats;

use super::{group_digits, CommandContext};

/// Execute the `npmc downloads` command
pub async fn execute(package: &str, period: &str, daily: bool, ctx: &CommandContext) -> NpmcResult<()> {
    if daily {
        let range = ctx.client.download_range(package, period).await?;
        if let Some(error) = &range.error {
            ctx.output.warn(error);
        }
        if ctx.json {
            return ctx.output.json(&range);
        }
        ctx.output.heading(&format!("{} ({} to {})", package, range.start, range.end));
        ctx.output.fields(&daily_fields(&range));
        return Ok(());
    }

    let stats = ctx.client.download_stats(package, period).await?;
    if let Some(error) = &stats.error {
        ctx.output.warn(error);
    }
    if ctx.json {
        return ctx.output.json(&stats);
    }
    ctx.output.success(&format!(
        "{}: {} downloads ({} to {})",
        package,
        group_digits(stats.downloads),
        stats.start,
        stats.end
    ));
    Ok(())
}

/// One line per day, then the total
pub fn daily_fields(range: &DownloadRangeStats) -> Vec<(&str, String)> {
    range
        .downloads
        .iter()
        .map(|day| (day.day.as_str(), group_digits(day.downloads)))
        .chain(std::iter::once(("total", group_digits(range.total()))))
        .collect()
}
