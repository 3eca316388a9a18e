//! Input directory validation and texture discovery

use anyhow::{Context, Result, bail};
use ignore::WalkBuilder;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::texture::{FileEntry, classify};

/// Resolve `path` to an absolute path that must be an existing directory
pub fn resolve_directory(path: &Path) -> Result<PathBuf> {
    let resolved = std::path::absolute(path)
        .with_context(|| format!("Failed to resolve {}", path.display()))?;

    match std::fs::metadata(&resolved) {
        Ok(metadata) if metadata.is_dir() => Ok(resolved),
        Ok(_) => bail!("Not a directory: {}", resolved.display()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("No such directory: {}", resolved.display())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to inspect {}", resolved.display())),
    }
}

/// Recursively collect every texture below `root`.
///
/// Ignore files are not honoured and hidden files are included: a texture
/// pack is data, not a source tree. Files whose names are not texture names
/// are left out entirely. Any traversal error fails discovery.
///
/// Textures are returned sorted by path so batches are reproducible.
pub fn discover_textures(root: &Path, follow_symlinks: bool) -> Result<Vec<FileEntry>> {
    let walker = build_walker(root, follow_symlinks);

    let mut textures = Vec::new();
    let mut skipped = 0usize;
    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to walk {}", root.display()))?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            skipped += 1;
            continue;
        };
        if classify(name).is_texture() {
            textures.push(FileEntry::new(entry.path().to_path_buf(), name));
        } else {
            trace!("skipping {}", entry.path().display());
            skipped += 1;
        }
    }

    textures.sort_by(|a, b| a.path.cmp(&b.path));

    debug!(
        "discovered {} textures under {} ({} other files skipped)",
        textures.len(),
        root.display(),
        skipped
    );
    Ok(textures)
}

fn build_walker(root: &Path, follow_symlinks: bool) -> ignore::Walk {
    let mut builder = WalkBuilder::new(root);
    builder
        .standard_filters(false)
        .hidden(false)
        .follow_links(follow_symlinks);
    builder.build()
}
