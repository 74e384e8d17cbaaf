use repograph_core::PathEntry;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const EXTENSIONS: [&str; 8] = ["ts", "js", "css", "json", "md", "py", "rb", "txt"];

/// Flat listing of roughly `file_count` files spread over nested directories,
/// shuffled so directories do not always precede their contents.
pub fn generate_synthetic_listing(file_count: usize) -> Vec<PathEntry> {
    let mut entries = Vec::with_capacity(file_count + file_count / 4);
    for i in 0..file_count {
        let top = format!("pkg_{}", i % 16);
        let mid = format!("{}/mod_{}", top, (i / 16) % 8);
        if i < 16 {
            entries.push(PathEntry::directory(top.clone()));
        }
        if i < 128 {
            entries.push(PathEntry::directory(mid.clone()));
        }
        let ext = EXTENSIONS[i % EXTENSIONS.len()];
        entries.push(PathEntry::file_with_size(
            format!("{}/file_{}.{}", mid, i, ext),
            (i as u64 * 37) % 4096,
        ));
    }
    // Deterministic interleave: reverse every other chunk
    for chunk in entries.chunks_mut(64).step_by(2) {
        chunk.reverse();
    }
    entries
}

/// Write a listing to a JSON file inside a fresh temp directory.
pub fn write_listing(entries: &[PathEntry]) -> anyhow::Result<(TempDir, PathBuf)> {
    let temp_dir = tempfile::tempdir()?;
    let path = temp_dir.path().join("listing.json");
    fs::write(&path, serde_json::to_string(entries)?)?;
    Ok((temp_dir, path))
}
