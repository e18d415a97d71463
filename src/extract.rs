use std::path::Path;

use indicatif::ProgressBar;
use tracing::info;

use crate::discovery::{discover, Document};
use crate::error::{Error, Result};
use crate::parser::parse_document;
use crate::record::MonsterRecord;
use crate::settings::{ExtractOptions, Settings};

pub struct ExtractSummary {
    pub documents: usize,
    pub records: usize,
    pub skipped: usize,
}

/// Parse every document in order. Documents without a CR are dropped.
pub fn extract_documents(
    docs: &[Document],
    opts: &ExtractOptions,
    pb: &ProgressBar,
) -> Result<Vec<MonsterRecord>> {
    let mut records = Vec::with_capacity(docs.len());
    for doc in docs {
        if let Some(record) = parse_document(&doc.path, doc.kind, opts)? {
            records.push(record);
        }
        pb.inc(1);
    }
    Ok(records)
}

/// Pretty-printed UTF-8 JSON array, written in one go.
pub fn write_json(records: &[MonsterRecord], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(records).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, json).map_err(|e| Error::io(path, e))
}

pub fn run(settings: &Settings, pb: &ProgressBar) -> Result<ExtractSummary> {
    let docs = discover(settings)?;
    info!(
        documents = docs.len(),
        html_dir = %settings.html_dir.display(),
        md_dir = %settings.md_dir.display(),
        "discovered documents"
    );
    pb.set_length(docs.len() as u64);

    let records = extract_documents(&docs, &settings.extract_options(), pb)?;
    write_json(&records, &settings.out_file)?;

    Ok(ExtractSummary {
        documents: docs.len(),
        records: records.len(),
        skipped: docs.len() - records.len(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::*;
    use crate::record::LegendaryFlag;

    fn fixture_settings(out: PathBuf) -> Settings {
        Settings {
            html_dir: PathBuf::from("tests/fixtures/html"),
            md_dir: PathBuf::from("tests/fixtures/md"),
            out_file: out,
            ..Settings::default()
        }
    }

    #[test]
    fn fixture_run() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("monsters.json");
        let summary = run(&fixture_settings(out.clone()), &ProgressBar::hidden()).unwrap();

        // goblin.md is shadowed by goblin.html; no_cr.html and commoner.md lack a CR
        assert_eq!(summary.documents, 6);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.records, 4);

        let written: Vec<MonsterRecord> = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        let files: Vec<&str> = written.iter().map(|r| r.file.as_str()).collect();
        assert_eq!(files, vec!["adult_red_dragon.html", "goblin.html", "lich.md", "wolf_mm_2024.md"]);
        assert!(written.iter().all(|r| !r.cr.is_empty()));
        assert_eq!(written[0].has_legendary_actions, LegendaryFlag::Yes);
    }

    #[test]
    fn each_cr_less_document_costs_one_record() {
        let dir = tempfile::tempdir().unwrap();
        let html = dir.path().join("html");
        fs::create_dir_all(&html).unwrap();
        fs::write(html.join("a.html"), "<h1>A</h1><ul><li><b>CR</b> 1</li></ul>").unwrap();
        fs::write(html.join("b.html"), "<h1>B</h1><ul><li><b>CR</b> 2</li></ul>").unwrap();

        let s = Settings {
            html_dir: html.clone(),
            md_dir: dir.path().join("md"),
            out_file: dir.path().join("out.json"),
            ..Settings::default()
        };
        assert_eq!(run(&s, &ProgressBar::hidden()).unwrap().records, 2);

        fs::write(html.join("c.html"), "<h1>C</h1><p>no rating</p>").unwrap();
        let summary = run(&s, &ProgressBar::hidden()).unwrap();
        assert_eq!(summary.records, 2);
        assert_eq!(summary.skipped, 1);
    }

    #[test]
    fn non_ascii_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.json");
        let docs = vec![Document {
            path: PathBuf::from("tests/fixtures/md/lich.md"),
            kind: crate::parser::DocumentKind::Markdown,
        }];
        let mut records = extract_documents(&docs, &ExtractOptions::default(), &ProgressBar::hidden()).unwrap();
        records[0].name = "Liche Écarlate".to_string();
        write_json(&records, &out).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        assert!(text.contains("Liche Écarlate"));
        assert!(text.starts_with("[\n  {"));
    }

    #[test]
    fn rerun_overwrites_identically() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("monsters.json");
        let s = fixture_settings(out.clone());
        run(&s, &ProgressBar::hidden()).unwrap();
        let first = fs::read(&out).unwrap();
        run(&s, &ProgressBar::hidden()).unwrap();
        assert_eq!(first, fs::read(&out).unwrap());
    }
}
