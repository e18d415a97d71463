use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

static WS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[0-9]{1,7}|#[xX][0-9a-fA-F]{1,6}|[a-zA-Z][a-zA-Z0-9]{1,15});").unwrap());
static LABEL_TAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[:–—-]\s*$").unwrap());
static LEADING_PUNCT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\s:–—-]+").unwrap());
static NUM_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());
static CR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9./]+").unwrap());

const SIZE_WORDS: &[&str] = &["tiny", "small", "medium", "large", "huge", "gargantuan"];

const CREATURE_TYPES: &[&str] = &[
    "Aberration",
    "Beast",
    "Celestial",
    "Construct",
    "Dragon",
    "Elemental",
    "Fey",
    "Fiend",
    "Giant",
    "Humanoid",
    "Monstrosity",
    "Ooze",
    "Plant",
    "Swarm",
    "Undead",
];

fn named_entity(name: &str) -> Option<&'static str> {
    let s = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "–",
        "mdash" => "—",
        "minus" => "−",
        "lsquo" => "‘",
        "rsquo" => "’",
        "ldquo" => "“",
        "rdquo" => "”",
        "hellip" => "…",
        "times" => "×",
        "frac12" => "½",
        "frac14" => "¼",
        "frac34" => "¾",
        _ => return None,
    };
    Some(s)
}

/// Decode named and numeric character references. Unknown ones stay verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    ENTITY_RE
        .replace_all(s, |caps: &Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32).map(String::from)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32).map(String::from)
            } else {
                named_entity(body).map(String::from)
            };
            decoded.unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Decode entities, collapse whitespace runs to one space, trim.
pub fn clean(text: &str) -> String {
    WS_RE.replace_all(&decode_entities(text), " ").trim().to_string()
}

/// Key form of a field label: cleaned, lowercased, trailing `:`/`-`/dash removed.
pub fn normalize_label(text: &str) -> String {
    let lower = clean(text).to_lowercase();
    LABEL_TAIL_RE.replace(&lower, "").trim_end().to_string()
}

/// Drop the `: ` / ` — ` left over after splitting "Label: value".
pub fn strip_leading_punct(text: &str) -> String {
    LEADING_PUNCT_RE.replace(text, "").into_owned()
}

pub fn first_number(text: &str) -> String {
    NUM_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// First run of digits, dots and slashes: "1/4 (XP 50)" -> "1/4".
pub fn first_cr_token(text: &str) -> String {
    CR_RE
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

/// "Large dragon, chaotic evil" -> "dragon".
pub fn extract_type_phrase(text: &str) -> String {
    let base = text.split(',').next().unwrap_or_default();
    let kept = base
        .split_whitespace()
        .filter(|t| !SIZE_WORDS.contains(&t.to_lowercase().as_str()))
        .join(" ");
    clean(&kept)
}

/// Map onto the fixed creature-type vocabulary, else upper-case the first letter.
pub fn canonicalize_type(text: &str) -> String {
    let lower = text.trim().to_lowercase();
    if let Some(canon) = CREATURE_TYPES.iter().find(|t| t.to_lowercase() == lower) {
        return canon.to_string();
    }
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Everything before the first "(": "Dragon (Chromatic)" -> "Dragon".
pub fn cut_parenthetical(text: &str) -> &str {
    text.split('(').next().unwrap_or_default().trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_collapses_and_decodes() {
        assert_eq!(clean("  Hit\n\tPoints&nbsp;&amp; more  "), "Hit Points & more");
        assert_eq!(clean("caf&#233; &#x2014; bar"), "café — bar");
        assert_eq!(clean("&bogus; stays"), "&bogus; stays");
        assert_eq!(clean(""), "");
    }

    #[test]
    fn labels() {
        assert_eq!(normalize_label("Armor Class:"), "armor class");
        assert_eq!(normalize_label(" Hit  Points — "), "hit points");
        assert_eq!(normalize_label("CR -"), "cr");
        assert_eq!(normalize_label("Armor Class :"), "armor class");
        assert_eq!(normalize_label("Skills"), "skills");
    }

    #[test]
    fn leading_punct() {
        assert_eq!(strip_leading_punct(": 15 (natural armor)"), "15 (natural armor)");
        assert_eq!(strip_leading_punct(" — Common"), "Common");
        assert_eq!(strip_leading_punct("Common"), "Common");
    }

    #[test]
    fn numbers() {
        assert_eq!(first_number("15 (natural armor)"), "15");
        assert_eq!(first_number("AC 17"), "17");
        assert_eq!(first_number(""), "");
        assert_eq!(first_number("none"), "");
    }

    #[test]
    fn cr_tokens() {
        assert_eq!(first_cr_token("1/4 (XP 50)"), "1/4");
        assert_eq!(first_cr_token("13 (10,000 XP)"), "13");
        assert_eq!(first_cr_token("1/8"), "1/8");
        assert_eq!(first_cr_token("—"), "");
    }

    #[test]
    fn type_phrase() {
        assert_eq!(extract_type_phrase("Large dragon, chaotic evil"), "dragon");
        assert_eq!(extract_type_phrase("Medium humanoid (elf), neutral"), "humanoid (elf)");
        assert_eq!(extract_type_phrase("Huge"), "");
        assert_eq!(extract_type_phrase("Gargantuan Monstrosity (Titan), Unaligned"), "Monstrosity (Titan)");
    }

    #[test]
    fn canonical_types() {
        assert_eq!(canonicalize_type("undead"), "Undead");
        assert_eq!(canonicalize_type("DRAGON"), "Dragon");
        assert_eq!(canonicalize_type("swarm of tiny beasts"), "Swarm of tiny beasts");
        assert_eq!(canonicalize_type(""), "");
    }

    #[test]
    fn parenthetical() {
        assert_eq!(cut_parenthetical("Dragon (Chromatic)"), "Dragon");
        assert_eq!(cut_parenthetical("fiend"), "fiend");
    }
}
