//! `npmc status` command implementation.

use npmc_core::error::NpmcResult;
use npmc_registry::RegistryStatus;

use super::{group_digits, CommandContext};

/// Execute the `npmc status` command
pub async fn execute(ctx: &CommandContext) -> NpmcResult<()> {
    let status = ctx.client.registry_status().await?;

    if ctx.json {
        return ctx.output.json(&status);
    }

    ctx.output.heading(ctx.client.options().registry_url());
    ctx.output.fields(&status_fields(&status));
    Ok(())
}

pub fn status_fields(status: &RegistryStatus) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("database", status.db_name.clone()),
        ("documents", group_digits(status.doc_count)),
        ("deleted", group_digits(status.doc_del_count)),
        ("update seq", status.update_seq.to_string()),
        ("disk size", group_digits(status.disk_size)),
        ("data size", group_digits(status.data_size)),
    ];
    if status.compact_running {
        fields.push(("compaction", "running".to_string()));
    }
    fields
}
