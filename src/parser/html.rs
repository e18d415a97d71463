use std::path::Path;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::normalize::{clean, extract_type_phrase, normalize_label, strip_leading_punct};
use super::LEGENDARY_PHRASE;
use crate::record::{file_stem, FieldMap, RawMonster};

static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1, h2").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("th").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| Selector::parse("li").unwrap());
static BOLD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("strong, b").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());
static ITALIC: LazyLock<Selector> = LazyLock::new(|| Selector::parse("em, i").unwrap());

fn text_of(el: ElementRef) -> String {
    el.text().collect()
}

/// Pull name, labeled fields, type line and legendary flag out of an HTML stat block.
pub fn parse(source: &str, path: &Path) -> RawMonster {
    let doc = Html::parse_document(source);

    let name = doc
        .select(&HEADING)
        .next()
        .map(|h| clean(&text_of(h)))
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| clean(&file_stem(path)));

    let fields = collect_fields(&doc);
    let type_text = find_type_line(&doc);
    let has_legendary_actions = doc
        .root_element()
        .text()
        .any(|t| t.to_lowercase().contains(LEGENDARY_PHRASE));

    RawMonster {
        name,
        fields,
        type_text,
        has_legendary_actions,
    }
}

/// Table rows first, then bolded list items; a label seen in both keeps the list value.
fn collect_fields(doc: &Html) -> FieldMap {
    let mut fields = FieldMap::new();

    for tr in doc.select(&ROW) {
        let Some(header) = tr.select(&TH).next().or_else(|| tr.select(&TD).next()) else {
            continue;
        };
        let data = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .find(|el| el.value().name() == "td");
        if let Some(data) = data {
            fields.insert(
                normalize_label(&text_of(header)),
                strip_leading_punct(&clean(&text_of(data))),
            );
        }
    }

    for li in doc.select(&LIST_ITEM) {
        let Some(bold) = li.select(&BOLD).next() else {
            continue;
        };
        let label = text_of(bold);
        let value = text_of(li).replace(&label, "");
        fields.insert(normalize_label(&label), strip_leading_punct(&clean(&value)));
    }

    fields
}

/// First paragraph with italics: the second span if there are several,
/// else the "size type, alignment" phrase of the only one.
fn find_type_line(doc: &Html) -> String {
    for p in doc.select(&PARAGRAPH) {
        let spans: Vec<ElementRef> = p.select(&ITALIC).collect();
        let candidate = match spans.as_slice() {
            [] => continue,
            [only] => extract_type_phrase(&text_of(*only)),
            [_, second, ..] => clean(&text_of(*second)),
        };
        if !candidate.is_empty() {
            return candidate;
        }
    }
    String::new()
}
