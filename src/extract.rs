//! Structured extraction from PrimeNG documentation pages.
//!
//! Every function here is pure over a parsed [`Html`] document. The page shapes
//! are heuristic: tables are recognised by their header keywords, and guide
//! sections are an even partition of the page's paragraphs and code blocks
//! over its `h2` headings rather than a structural association.

use crate::consts::{NON_COMPONENT_FRAGMENTS, NON_COMPONENT_PAGES};
use crate::types::{ComponentEvent, ComponentMethod, ComponentProperty, GuideSection};
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Maximum properties kept per component.
pub const MAX_PROPERTIES: usize = 20;
/// Maximum events kept per component.
pub const MAX_EVENTS: usize = 15;
/// Maximum methods kept per component.
pub const MAX_METHODS: usize = 10;
/// Usage snippets at or above this length are rejected.
pub const MAX_USAGE_LEN: usize = 300;

const MIN_PARAGRAPH_LEN: usize = 20;
const MIN_CODE_LEN: usize = 15;

macro_rules! selector {
    ($name:ident, $css:expr) => {
        static $name: LazyLock<Selector> =
            LazyLock::new(|| Selector::parse($css).expect("BUG: hardcoded CSS selector is invalid"));
    };
}

selector!(TABLE_SELECTOR, "table");
selector!(HEADER_CELL_SELECTOR, "thead th");
selector!(BODY_ROW_SELECTOR, "tbody tr");
selector!(CELL_SELECTOR, "td");
selector!(SECTION_HEADING_SELECTOR, "h2, h3");
selector!(META_DESCRIPTION_SELECTOR, r#"meta[name="description"]"#);
selector!(PRE_CODE_SELECTOR, "pre code");
selector!(H1_SELECTOR, "h1");
selector!(H2_SELECTOR, "h2");
selector!(PARAGRAPH_SELECTOR, "p");
selector!(CODE_SELECTOR, "code");
selector!(LINK_SELECTOR, "a[href]");

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// A documentation table reduced to lowercase header names and trimmed cell text.
struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    fn parse(table: ElementRef<'_>) -> Self {
        let headers = table
            .select(&HEADER_CELL_SELECTOR)
            .map(|th| element_text(th).to_lowercase())
            .collect();
        let rows = table
            .select(&BODY_ROW_SELECTOR)
            .map(|tr| tr.select(&CELL_SELECTOR).map(element_text).collect())
            .collect();
        Self { headers, rows }
    }

    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    fn is_property_table(&self) -> bool {
        self.has_column("name") && (self.has_column("type") || self.has_column("default"))
    }

    fn is_signature_table(&self) -> bool {
        self.has_column("name") && self.has_column("parameters")
    }

    fn properties(&self) -> Vec<ComponentProperty> {
        let Some(name_idx) = self.column("name") else {
            return Vec::new();
        };
        let type_idx = self.column("type");
        let default_idx = self.column("default");
        let desc_idx = self.column("description");

        self.rows
            .iter()
            .filter(|cells| cells.len() >= 3)
            .filter_map(|cells| {
                let name = cells.get(name_idx).filter(|n| !n.is_empty())?;
                Some(ComponentProperty {
                    name: name.clone(),
                    kind: type_idx
                        .and_then(|i| cells.get(i))
                        .filter(|t| !t.is_empty())
                        .cloned()
                        .unwrap_or_else(|| "any".to_string()),
                    default: default_idx.and_then(|i| cells.get(i)).cloned(),
                    description: desc_idx.and_then(|i| cells.get(i)).cloned().unwrap_or_default(),
                })
            })
            .collect()
    }

    /// Rows of a name/parameters/description table, as used by events and methods.
    fn signatures<T>(&self, build: impl Fn(String, String, String) -> T) -> Vec<T> {
        let Some(name_idx) = self.column("name") else {
            return Vec::new();
        };
        let params_idx = self.column("parameters");
        let desc_idx = self.column("description");

        self.rows
            .iter()
            .filter(|cells| cells.len() >= 2)
            .filter_map(|cells| {
                let name = cells.get(name_idx).filter(|n| !n.is_empty())?;
                Some(build(name.clone(), cell_at(cells, params_idx), cell_at(cells, desc_idx)))
            })
            .collect()
    }
}

fn cell_at(cells: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| cells.get(i)).cloned().unwrap_or_default()
}

fn tables(document: &Html) -> impl Iterator<Item = Table> + '_ {
    document.select(&TABLE_SELECTOR).map(Table::parse)
}

/// Properties from every table whose header has `name` plus `type` or `default`.
pub fn extract_properties(document: &Html) -> Vec<ComponentProperty> {
    tables(document)
        .filter(Table::is_property_table)
        .flat_map(|table| table.properties())
        .take(MAX_PROPERTIES)
        .collect()
}

/// Events from every table whose header has `name` and `parameters`.
pub fn extract_events(document: &Html) -> Vec<ComponentEvent> {
    tables(document)
        .filter(Table::is_signature_table)
        .flat_map(|table| {
            table.signatures(|name, parameters, description| ComponentEvent {
                name,
                parameters,
                description,
            })
        })
        .take(MAX_EVENTS)
        .collect()
}

/// Methods from the first table following each `h2`/`h3` mentioning "Methods".
pub fn extract_methods(document: &Html) -> Vec<ComponentMethod> {
    document
        .select(&SECTION_HEADING_SELECTOR)
        .filter(|heading| heading.text().collect::<String>().contains("Methods"))
        .filter_map(|heading| {
            heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .find(|sibling| sibling.value().name() == "table")
        })
        .flat_map(|table| {
            Table::parse(table).signatures(|name, parameters, description| ComponentMethod {
                name,
                parameters,
                description,
            })
        })
        .take(MAX_METHODS)
        .collect()
}

/// The page's meta description, or a generated sentence naming `name`.
pub fn extract_description(document: &Html, name: &str) -> String {
    document
        .select(&META_DESCRIPTION_SELECTOR)
        .next()
        .and_then(|meta| meta.value().attr("content"))
        .filter(|content| !content.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("Componente {}", name))
}

/// The first code block if it mentions `component` and is short, else `fallback`.
pub fn extract_basic_usage(document: &Html, component: &str, fallback: &str) -> String {
    document
        .select(&PRE_CODE_SELECTOR)
        .next()
        .map(element_text)
        .filter(|code| !code.is_empty() && code.contains(component) && code.chars().count() < MAX_USAGE_LEN)
        .unwrap_or_else(|| fallback.to_string())
}

/// Text of the first `h1`, or an empty string.
pub fn extract_guide_title(document: &Html) -> String {
    document.select(&H1_SELECTOR).next().map(element_text).unwrap_or_default()
}

fn is_guide_paragraph(text: &str) -> bool {
    text.chars().count() > MIN_PARAGRAPH_LEN && text != "..."
}

fn is_guide_code(text: &str) -> bool {
    text.chars().count() > MIN_CODE_LEN
        && (text.contains('\n') || text.contains("import") || text.contains("npm") || text.contains('<'))
}

fn strip_heading_anchor(text: &str) -> &str {
    let trimmed = text.trim_end();
    match trimmed.strip_suffix('#') {
        Some(rest) => rest.trim_end(),
        None => trimmed,
    }
}

/// Guide sections built by spreading paragraphs and code blocks over the `h2` headings.
pub fn extract_guide_sections(document: &Html) -> Vec<GuideSection> {
    let paragraphs: Vec<String> = document
        .select(&PARAGRAPH_SELECTOR)
        .map(element_text)
        .filter(|text| is_guide_paragraph(text))
        .collect();
    let code_blocks: Vec<String> = document
        .select(&CODE_SELECTOR)
        .map(element_text)
        .filter(|text| is_guide_code(text))
        .collect();
    let headings: Vec<String> = document
        .select(&H2_SELECTOR)
        .map(|h2| strip_heading_anchor(&element_text(h2)).to_string())
        .filter(|heading| !heading.is_empty())
        .collect();

    partition_sections(headings, &paragraphs, &code_blocks)
}

/// The run of `items` assigned to heading `index` out of `count`.
fn run<T>(items: &[T], index: usize, count: usize) -> &[T] {
    let per = (items.len() / count).max(1);
    let start = (index * per).min(items.len());
    let end = if index + 1 == count {
        items.len()
    } else {
        ((index + 1) * per).min(items.len())
    };
    &items[start..end]
}

fn partition_sections(headings: Vec<String>, paragraphs: &[String], code_blocks: &[String]) -> Vec<GuideSection> {
    if headings.is_empty() || (paragraphs.is_empty() && code_blocks.is_empty()) {
        return Vec::new();
    }

    let count = headings.len();
    headings
        .into_iter()
        .enumerate()
        .filter_map(|(i, heading)| {
            let paras = run(paragraphs, i, count);
            let codes = run(code_blocks, i, count);
            if paras.is_empty() && codes.is_empty() {
                return None;
            }
            Some(GuideSection {
                heading,
                content: paras.join("\n\n"),
                code_blocks: (!codes.is_empty()).then(|| codes.to_vec()),
            })
        })
        .collect()
}

/// Component keys linked from a navigation page, sorted and deduplicated.
pub fn extract_component_links(document: &Html) -> Vec<String> {
    let mut keys = BTreeSet::new();

    for anchor in document.select(&LINK_SELECTOR) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if !href.starts_with('/') || href == "/" || href.contains('#') {
            continue;
        }
        let segment = href[1..].split('/').next().unwrap_or_default();
        if segment.is_empty()
            || NON_COMPONENT_PAGES.contains(&segment)
            || NON_COMPONENT_FRAGMENTS.iter().any(|f| segment.contains(f))
        {
            continue;
        }
        keys.insert(segment.to_string());
    }

    keys.into_iter().collect()
}
