use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::parser::normalize::{canonicalize_type, cut_parenthetical, first_cr_token, first_number};
use crate::settings::ExtractOptions;

pub const GEAR_NONE: &str = "None";

const CR_LABELS: &[&str] = &["cr", "challenge rating"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendaryFlag {
    Yes,
    No,
}

impl From<bool> for LegendaryFlag {
    fn from(has: bool) -> Self {
        if has {
            LegendaryFlag::Yes
        } else {
            LegendaryFlag::No
        }
    }
}

/// One creature's stat line. Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonsterRecord {
    pub name: String,
    pub cr: String,
    pub ac: String,
    pub hp: String,
    pub languages: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub skills: String,
    pub gear: String,
    pub source: String,
    #[serde(rename = "hasLegendaryActions")]
    pub has_legendary_actions: LegendaryFlag,
    pub file: String,
}

/// Normalized label -> cleaned value. Later inserts win.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    fields: HashMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: String, value: String) {
        self.fields.insert(label, value);
    }

    /// Value for `label`, or "" when absent.
    pub fn get(&self, label: &str) -> &str {
        self.fields.get(label).map(String::as_str).unwrap_or_default()
    }

    /// First non-empty value among `labels`.
    pub fn first_of(&self, labels: &[&str]) -> &str {
        labels
            .iter()
            .map(|l| self.get(l))
            .find(|v| !v.is_empty())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// What a parser pulled out of one document before normalization.
#[derive(Debug, Clone)]
pub struct RawMonster {
    pub name: String,
    pub fields: FieldMap,
    /// Type candidate, before the "(" cut and canonicalization.
    pub type_text: String,
    pub has_legendary_actions: bool,
}

pub fn challenge_rating(fields: &FieldMap) -> String {
    first_cr_token(fields.first_of(CR_LABELS))
}

/// Apply the shared field rules. `None` when the document has no CR.
pub fn assemble(raw: RawMonster, path: &Path, opts: &ExtractOptions) -> Option<MonsterRecord> {
    let cr = challenge_rating(&raw.fields);
    if cr.is_empty() {
        return None;
    }
    let f = &raw.fields;

    let gear = match f.get("gear").trim() {
        "" => GEAR_NONE.to_string(),
        g => g.to_string(),
    };

    Some(MonsterRecord {
        name: raw.name,
        cr,
        ac: first_number(f.get("armor class")),
        hp: first_number(f.get("hit points")),
        languages: f.get("languages").to_string(),
        kind: canonicalize_type(cut_parenthetical(&raw.type_text)),
        skills: f.get("skills").replace(',', ";"),
        gear,
        source: source_for(f.get("source"), path, opts),
        has_legendary_actions: raw.has_legendary_actions.into(),
        file: file_name(path),
    })
}

fn source_for(raw: &str, path: &Path, opts: &ExtractOptions) -> String {
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    if !opts.edition_marker.is_empty() && stem.ends_with(opts.edition_marker.as_str()) {
        return opts.edition_source.clone();
    }
    match raw.find(" page") {
        Some(idx) => raw[..idx].to_string(),
        None => raw.to_string(),
    }
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
