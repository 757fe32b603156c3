pub(crate) mod events;
pub(crate) mod ladder;
pub(crate) mod pro_points;
pub(crate) mod schedule;
pub(crate) mod tournament;

pub(crate) use ::scraper::Html;
use ::scraper::{ElementRef, Selector};
use itertools::Itertools;

use crate::error::Result;
use crate::model::SeedingRule;

/// Trimmed, whitespace-collapsed text content of an element.
pub(crate) fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .join(" ")
}

/// Extract trimmed text from the first element matching `selector` inside
/// `element`. Returns an empty string if nothing matches.
pub(crate) fn select_text(element: &ElementRef, selector: &Selector) -> String {
    element
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .unwrap_or_default()
}

/// Find the heading whose trimmed text equals `label` exactly.
pub(crate) fn find_heading<'a>(
    document: &'a Html,
    selector: &Selector,
    label: &str,
) -> Option<ElementRef<'a>> {
    document.select(selector).find(|el| element_text(el) == label)
}

/// Lower-cased comparison variant; some sections match case-insensitively.
pub(crate) fn find_heading_ci<'a>(
    document: &'a Html,
    selector: &Selector,
    label: &str,
) -> Option<ElementRef<'a>> {
    document
        .select(selector)
        .find(|el| element_text(el).to_lowercase() == label)
}

/// The immediate next sibling element, skipping text nodes.
pub(crate) fn next_element(element: ElementRef) -> Option<ElementRef> {
    element.next_siblings().filter_map(ElementRef::wrap).next()
}

/// Walk forward through sibling elements to the section's `<hr>` terminator.
pub(crate) fn rule_after(anchor: ElementRef) -> Option<ElementRef> {
    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "hr")
}

/// The first element after the section's `<hr>` terminator.
pub(crate) fn content_after_rule(anchor: ElementRef) -> Option<ElementRef> {
    rule_after(anchor).and_then(next_element)
}

/// Sibling elements between `anchor` and the next rule or heading of the
/// same level, in document order.
pub(crate) fn section_elements(anchor: ElementRef) -> Vec<ElementRef> {
    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !matches!(el.value().name(), "hr" | "h5"))
        .collect()
}

/// Pair the Nth `<h6>` inside `container` with the Nth `<p>`; extras on the
/// longer side are dropped.
pub(crate) fn paired_heading_content(container: ElementRef) -> Result<Vec<(String, String)>> {
    let heading_selector = Selector::parse("h6")?;
    let content_selector = Selector::parse("p")?;
    Ok(container
        .select(&heading_selector)
        .zip(container.select(&content_selector))
        .map(|(heading, content)| (element_text(&heading), element_text(&content)))
        .collect())
}

/// Parse a seeding-style section: `<h5>` anchor, walk to the `<hr>`, an
/// optional `<p>` description, then a container pairing `<h6>` titles with
/// `<p>` descriptions by index.
pub(crate) fn parse_seeding_section(
    document: &Html,
    label: &str,
) -> Result<(Option<String>, Vec<SeedingRule>)> {
    let h5_selector = Selector::parse("h5")?;
    let Some(anchor) = find_heading(document, &h5_selector, label) else {
        return Ok((None, Vec::new()));
    };
    let Some(mut el) = content_after_rule(anchor) else {
        return Ok((None, Vec::new()));
    };

    let mut description = None;
    if el.value().name() == "p" {
        description = Some(element_text(&el)).filter(|t| !t.is_empty());
        let Some(container) = next_element(el) else {
            return Ok((description, Vec::new()));
        };
        el = container;
    }

    let mut rules = Vec::new();
    if el.value().name() == "div" {
        rules = paired_heading_content(el)?
            .into_iter()
            .map(|(title, desc)| SeedingRule {
                title,
                description: desc,
            })
            .collect();
    }
    Ok((description, rules))
}

/// Pull the opaque tournament identifier out of an href path segment.
pub(crate) fn tournament_id_from_href(href: &str) -> Option<String> {
    let (_, rest) = href.split_once("/tournament/")?;
    let id = rest.split(['/', '?', '#']).next()?;
    (!id.is_empty()).then(|| id.to_string())
}

/// Normalize a potentially relative link to an absolute site URL.
pub(crate) fn absolute_url(base_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}
