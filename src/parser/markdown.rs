use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{clean, extract_type_phrase, normalize_label, strip_leading_punct};
use super::LEGENDARY_PHRASE;
use crate::record::{FieldMap, RawMonster};

static FIELD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\*\*(.+?)\*\*[:,]?\s*(.+)$").unwrap());
static ITALIC_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[_*](.+?)[_*]").unwrap());

/// Markdown stat block: `# Name`, an italic type line, `**Label:** value` lines.
pub fn parse(source: &str) -> RawMonster {
    let lines: Vec<&str> = source
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    let mut fields = FieldMap::new();
    for line in &lines {
        if let Some(caps) = FIELD_RE.captures(line) {
            fields.insert(
                normalize_label(&caps[1]),
                clean(&strip_leading_punct(caps[2].trim())),
            );
        }
    }

    let name = lines
        .first()
        .map(|l| clean(l.trim_start_matches('#')))
        .unwrap_or_default();

    let mut type_text = fields.get("type").to_string();
    if type_text.is_empty() {
        type_text = lines
            .get(1)
            .and_then(|l| ITALIC_RE.captures(l))
            .map(|caps| extract_type_phrase(&caps[1]))
            .unwrap_or_default();
    }

    let has_legendary_actions = lines
        .iter()
        .any(|l| l.to_lowercase().contains(LEGENDARY_PHRASE));

    RawMonster {
        name,
        fields,
        type_text,
        has_legendary_actions,
    }
}
