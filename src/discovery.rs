use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::Result;
use crate::parser::DocumentKind;
use crate::settings::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

/// Files under `root` with the extension of `kind`, sorted by name per directory.
/// A missing root yields nothing.
pub fn list_files(root: &Path, kind: DocumentKind, recursive: bool) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        warn!(dir = %root.display(), "input directory not found");
        return Ok(Vec::new());
    }

    let mut walker = WalkDir::new(root).sort_by_file_name();
    if !recursive {
        walker = walker.max_depth(1);
    }

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && DocumentKind::from_path(entry.path()) == Some(kind) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Paths an HTML twin of a Markdown file could have: same relative path, any HTML extension.
pub fn html_twin_candidates(md_path: &Path, md_dir: &Path, html_dir: &Path) -> Vec<PathBuf> {
    let Ok(rel) = md_path.strip_prefix(md_dir) else {
        return Vec::new();
    };
    let base = html_dir.join(rel);
    DocumentKind::Html
        .extensions()
        .iter()
        .map(|ext| base.with_extension(ext))
        .collect()
}

/// The existing HTML document a Markdown file shadows, if any.
pub fn html_twin(md_path: &Path, md_dir: &Path, html_dir: &Path) -> Option<PathBuf> {
    html_twin_candidates(md_path, md_dir, html_dir)
        .into_iter()
        .find(|p| p.is_file())
}

/// All HTML documents, then the Markdown fallbacks.
pub fn discover(settings: &Settings) -> Result<Vec<Document>> {
    let mut docs: Vec<Document> = list_files(&settings.html_dir, DocumentKind::Html, settings.recursive)?
        .into_iter()
        .map(|path| Document {
            path,
            kind: DocumentKind::Html,
        })
        .collect();

    for path in list_files(&settings.md_dir, DocumentKind::Markdown, settings.recursive)? {
        if settings.skip_md_with_html_twin {
            if let Some(twin) = html_twin(&path, &settings.md_dir, &settings.html_dir) {
                debug!(md = %path.display(), html = %twin.display(), "html twin exists, skipping markdown");
                continue;
            }
        }
        docs.push(Document {
            path,
            kind: DocumentKind::Markdown,
        });
    }

    Ok(docs)
}
