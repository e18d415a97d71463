use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "monster_stats.toml";
pub const ENV_PREFIX: &str = "MONSTERS";

/// Extractor settings: defaults < `monster_stats.toml` < `MONSTERS_*` env vars.
/// Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub html_dir: PathBuf,
    pub md_dir: PathBuf,
    pub out_file: PathBuf,
    pub recursive: bool,
    pub skip_md_with_html_twin: bool,
    pub edition_marker: String,
    pub edition_source: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            html_dir: PathBuf::from("monsters_html"),
            md_dir: PathBuf::from("monsters_md"),
            out_file: PathBuf::from("monstersfromhtml.json"),
            recursive: true,
            skip_md_with_html_twin: true,
            edition_marker: "_mm_2024".to_string(),
            edition_source: "WotC SRD 5.2".to_string(),
        }
    }
}

impl Settings {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();
        let file = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .set_default("html_dir", defaults.html_dir.to_string_lossy().into_owned())?
            .set_default("md_dir", defaults.md_dir.to_string_lossy().into_owned())?
            .set_default("out_file", defaults.out_file.to_string_lossy().into_owned())?
            .set_default("recursive", defaults.recursive)?
            .set_default("skip_md_with_html_twin", defaults.skip_md_with_html_twin)?
            .set_default("edition_marker", defaults.edition_marker)?
            .set_default("edition_source", defaults.edition_source)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            edition_marker: self.edition_marker.clone(),
            edition_source: self.edition_source.clone(),
        }
    }
}

/// Per-document knobs the parsers need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub edition_marker: String,
    pub edition_source: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Settings::default().extract_options()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "html_dir = \"srd/html\"\nrecursive = false\n").unwrap();

        let s = Settings::load(Some(&path)).unwrap();
        assert_eq!(s.html_dir, PathBuf::from("srd/html"));
        assert!(!s.recursive);
        assert_eq!(s.md_dir, PathBuf::from("monsters_md"));
        assert_eq!(s.edition_source, "WotC SRD 5.2");
    }

    // Only keys no other test asserts on, since tests share the process environment.
    #[test]
    fn environment_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layered.toml");
        std::fs::write(&path, "edition_marker = \"_from_file\"\nskip_md_with_html_twin = true\n").unwrap();

        std::env::set_var("MONSTERS_EDITION_MARKER", "_from_env");
        std::env::set_var("MONSTERS_SKIP_MD_WITH_HTML_TWIN", "false");
        let loaded = Settings::load(Some(&path));
        std::env::remove_var("MONSTERS_EDITION_MARKER");
        std::env::remove_var("MONSTERS_SKIP_MD_WITH_HTML_TWIN");

        let s = loaded.unwrap();
        assert_eq!(s.edition_marker, "_from_env");
        assert!(!s.skip_md_with_html_twin);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn default_options() {
        let o = ExtractOptions::default();
        assert_eq!(o.edition_marker, "_mm_2024");
        assert_eq!(o.edition_source, "WotC SRD 5.2");
    }
}
