use crate::normalizer::normalize;
use crate::stats::{analyze_dependencies, count_entries, extract_file_types};
use crate::usage::UsageResolver;
use repograph_core::{PathEntry, RepositoryData};

/// Assemble the collaborator-facing document from a flat listing:
/// normalize, annotate usage, then derive file types, dependencies and counts.
pub fn build_repository(
    owner: impl Into<String>,
    repo: impl Into<String>,
    entries: &[PathEntry],
    usage: &UsageResolver,
) -> RepositoryData {
    let mut structure = normalize(entries);
    usage.annotate(&mut structure);

    let stats = count_entries(&structure);
    let data = RepositoryData {
        owner: owner.into(),
        repo: repo.into(),
        file_types: extract_file_types(&structure),
        dependencies: analyze_dependencies(&structure),
        file_count: Some(stats.file_count),
        dir_count: Some(stats.dir_count),
        structure,
    };

    tracing::info!(
        "Built {}: {} files, {} directories, {} file types (usage: {})",
        data.display_name(),
        stats.file_count,
        stats.dir_count,
        data.file_types.len(),
        usage
    );
    data
}
