pub mod html;
pub mod markdown;
pub mod normalize;

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{assemble, file_name, MonsterRecord};
use crate::settings::ExtractOptions;

pub const LEGENDARY_PHRASE: &str = "legendary actions";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Html,
    Markdown,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [DocumentKind::Html, DocumentKind::Markdown]
            .into_iter()
            .find(|kind| kind.extensions().contains(&ext.as_str()))
    }

    /// Recognized extensions, lowercase, preferred first.
    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Html => &["html", "htm"],
            DocumentKind::Markdown => &["md", "markdown"],
        }
    }
}

/// Read and parse one document. `Ok(None)` when it has no challenge rating.
pub fn parse_document(path: &Path, kind: DocumentKind, opts: &ExtractOptions) -> Result<Option<MonsterRecord>> {
    let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    Ok(parse_source(&source, path, kind, opts))
}

pub fn parse_source(source: &str, path: &Path, kind: DocumentKind, opts: &ExtractOptions) -> Option<MonsterRecord> {
    let raw = match kind {
        DocumentKind::Html => html::parse(source, path),
        DocumentKind::Markdown => markdown::parse(source),
    };
    let record = assemble(raw, path, opts);
    if record.is_none() {
        match kind {
            DocumentKind::Html => warn!(file = %file_name(path), "no CR, skipped"),
            DocumentKind::Markdown => debug!(file = %file_name(path), "no CR, skipped"),
        }
    }
    record
}
