//! `npmc show` command implementation.

use npmc_core::error::NpmcResult;
use npmc_registry::VersionRecord;

use super::CommandContext;

/// Execute the `npmc show` command
pub async fn execute(package: &str, version_or_tag: &str, ctx: &CommandContext) -> NpmcResult<()> {
    let version = ctx.client.package_version(package, version_or_tag).await?;

    if ctx.json {
        return ctx.output.json(&version);
    }

    ctx.output.heading(&format!("{}@{}", version.name, version.version));
    if version.is_deprecated() {
        ctx.output
            .warn(&format!("deprecated: {}", version.deprecated.as_deref().unwrap_or_default()));
    }
    ctx.output.fields(&version_fields(&version));
    Ok(())
}

/// Labelled lines for one published version
pub fn version_fields(version: &VersionRecord) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();

    if let Some(description) = &version.description {
        fields.push(("description", description.clone()));
    }
    if let Some(kind) = version.license.as_ref().and_then(|license| license.kind.clone()) {
        fields.push(("license", kind));
    }
    if let Some(main) = &version.main {
        fields.push(("main", main.clone()));
    }
    if let Some(tarball) = version.tarball_url() {
        fields.push(("tarball", tarball.to_string()));
    }
    if let Some(dist) = &version.dist {
        if let Some(integrity) = &dist.integrity {
            fields.push(("integrity", integrity.clone()));
        } else if !dist.shasum.is_empty() {
            fields.push(("shasum", dist.shasum.clone()));
        }
        if let Some(size) = dist.unpacked_size {
            fields.push(("unpacked size", format!("{} bytes", size)));
        }
    }

    let mut dependencies: Vec<_> = version
        .dependencies
        .iter()
        .map(|(name, range)| format!("{}@{}", name, range))
        .collect();
    dependencies.sort();
    fields.push((
        "dependencies",
        if dependencies.is_empty() {
            "none".to_string()
        } else {
            dependencies.join(", ")
        },
    ));

    if let Some(user) = &version.npm_user {
        fields.push(("published by", user.to_string()));
    }

    fields
}
