//! `npmc mirrors` command implementation.

use serde::Serialize;

use npmc_core::error::NpmcResult;
use npmc_registry::Mirror;

use super::CommandContext;

#[derive(Debug, Serialize)]
struct MirrorEntry {
    name: &'static str,
    url: &'static str,
    active: bool,
}

/// Execute the `npmc mirrors` command
pub async fn execute(ctx: &CommandContext) -> NpmcResult<()> {
    let active = ctx.client.options().registry_url();
    let entries: Vec<MirrorEntry> = Mirror::ALL
        .into_iter()
        .map(|mirror| MirrorEntry {
            name: mirror.name(),
            url: mirror.url(),
            active: mirror.url() == active,
        })
        .collect();

    if ctx.json {
        return ctx.output.json(&entries);
    }

    let fields: Vec<(&str, String)> = entries
        .iter()
        .map(|entry| {
            let marker = if entry.active { " (active)" } else { "" };
            (entry.name, format!("{}{}", entry.url, marker))
        })
        .collect();
    ctx.output.fields(&fields);
    Ok(())
}
