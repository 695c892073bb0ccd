//! `npmc info` command implementation.
//!
//! Prints a summary of a packument: description, latest version, dist-tags
//! and who maintains it.

use npmc_core::error::{NpmcError, NpmcResult};
use npmc_registry::PackageRecord;

use super::CommandContext;

/// Execute the `npmc info` command
pub async fn execute(package: &str, ctx: &CommandContext) -> NpmcResult<()> {
    let record = ctx.client.package(package).await?;

    if record.is_empty() {
        return Err(NpmcError::PackageNotFound {
            name: package.to_string(),
        });
    }

    if let Err(err) = record.validate() {
        ctx.output.warn(&err.to_string());
    }

    if ctx.json {
        return ctx.output.json(&record);
    }

    ctx.output.heading(&record.name);
    ctx.output.fields(&summary_fields(&record));
    Ok(())
}

/// Labelled summary lines for a packument, in display order
pub fn summary_fields(record: &PackageRecord) -> Vec<(&'static str, String)> {
    let mut fields = Vec::new();

    if let Some(description) = &record.description {
        fields.push(("description", description.clone()));
    }
    if let Some(latest) = record.dist_tags.get("latest") {
        let published = record
            .published_at(latest)
            .map(|time| format!(" (published {})", time.format("%Y-%m-%d")))
            .unwrap_or_default();
        fields.push(("latest", format!("{}{}", latest, published)));
    }

    let mut tags: Vec<_> = record
        .dist_tags
        .iter()
        .filter(|(tag, _)| tag.as_str() != "latest")
        .map(|(tag, version)| format!("{}: {}", tag, version))
        .collect();
    if !tags.is_empty() {
        tags.sort();
        fields.push(("dist-tags", tags.join(", ")));
    }

    fields.push(("versions", record.versions.len().to_string()));

    if let Some(kind) = record.license.as_ref().and_then(|license| license.kind.clone()) {
        fields.push(("license", kind));
    }
    if let Some(homepage) = &record.homepage {
        fields.push(("homepage", homepage.clone()));
    }
    if let Some(url) = record.repository.as_ref().and_then(|repo| repo.url.clone()) {
        fields.push(("repository", url));
    }
    if let Some(url) = record.bugs.as_ref().and_then(|bugs| bugs.url.clone()) {
        fields.push(("bugs", url));
    }
    if let Some(author) = &record.author {
        fields.push(("author", author.to_string()));
    }
    if !record.maintainers.is_empty() {
        let names: Vec<String> = record.maintainers.iter().map(ToString::to_string).collect();
        fields.push(("maintainers", names.join(", ")));
    }
    if let Some(deprecated) = &record.deprecated {
        fields.push(("deprecated", deprecated.clone()));
    }

    fields
}
