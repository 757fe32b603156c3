use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::model::EventItem;
use crate::scraper::{
    absolute_url, element_text, section_elements, select_text, tournament_id_from_href, Html,
};

/// Parse the tournaments listing page.
///
/// The page is partitioned by `<h5>` tier headings; the cards under a
/// heading (up to the next rule or heading) all belong to that competitive
/// tier. Cards with no recognisable tournament link are dropped.
pub(crate) fn parse_events(document: &Html, base_url: &str) -> Result<Vec<EventItem>> {
    let heading_selector = Selector::parse("h5")?;
    let name_selector = Selector::parse("h6")?;
    let p_selector = Selector::parse("p")?;
    let kind_re = Regex::new(r"(?i)regional|international|open")?;

    let mut events = Vec::new();
    for heading in document.select(&heading_selector) {
        let category = element_text(&heading);
        for card in section_elements(heading) {
            if card.value().name() != "a" {
                continue;
            }
            let Some(event) =
                parse_event_card(card, &category, base_url, &name_selector, &p_selector, &kind_re)
            else {
                continue;
            };
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_event_card(
    card: ElementRef,
    category: &str,
    base_url: &str,
    name_selector: &Selector,
    p_selector: &Selector,
    kind_re: &Regex,
) -> Option<EventItem> {
    let href = card.value().attr("href")?;
    let tournament_id = tournament_id_from_href(href)?;

    let kind = card
        .select(p_selector)
        .map(|el| element_text(&el))
        .find(|text| kind_re.is_match(text))
        .unwrap_or_default();

    Some(EventItem {
        tournament_id,
        url: absolute_url(base_url, href),
        name: select_text(&card, name_selector),
        kind,
        category: category.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS_FIXTURE: &str = r##"
    <html><body>
      <h5>Tier 1</h5>
      <a href="/en-US/tournament/demacia-cup/overview">
        <h6>Demacia Cup</h6>
        <p>Regional</p>
      </a>
      <a href="/en-US/tournament/worlds-2026/overview">
        <h6>World Championship</h6>
        <p>International</p>
      </a>
      <hr>
      <h5>Open Qualifiers</h5>
      <a href="/en-US/tournament/open-q1/overview">
        <h6>Open Qualifier 1</h6>
        <p>Open</p>
      </a>
      <a href="/en-US/news/patch-notes">
        <h6>Not a tournament</h6>
      </a>
    </body></html>
    "##;

    #[test]
    fn test_parse_events_partitions_by_tier() {
        let document = Html::parse_document(EVENTS_FIXTURE);
        let events = parse_events(&document, "https://competetft.com").unwrap();

        assert_eq!(events.len(), 3);

        assert_eq!(events[0].tournament_id, "demacia-cup");
        assert_eq!(events[0].name, "Demacia Cup");
        assert_eq!(events[0].kind, "Regional");
        assert_eq!(events[0].category, "Tier 1");
        assert_eq!(
            events[0].url,
            "https://competetft.com/en-US/tournament/demacia-cup/overview"
        );

        assert_eq!(events[1].tournament_id, "worlds-2026");
        assert_eq!(events[1].kind, "International");

        assert_eq!(events[2].tournament_id, "open-q1");
        assert_eq!(events[2].category, "Open Qualifiers");
    }

    #[test]
    fn test_parse_events_drops_non_tournament_links() {
        let document = Html::parse_document(EVENTS_FIXTURE);
        let events = parse_events(&document, "https://competetft.com").unwrap();
        assert!(events.iter().all(|e| e.tournament_id != "patch-notes"));
    }

    #[test]
    fn test_parse_events_empty_page() {
        let document = Html::parse_document("<html><body><p>maintenance</p></body></html>");
        let events = parse_events(&document, "https://competetft.com").unwrap();
        assert!(events.is_empty());
    }
}
