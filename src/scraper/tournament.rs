use regex::Regex;
use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::model::{
    PlacementPrize, PlacementsPrizes, PointsAllocation, PointsDay, Region, RuleGroup,
    TournamentDetail,
};
use crate::normalize;
use crate::scraper::{
    content_after_rule, element_text, find_heading, find_heading_ci, next_element,
    paired_heading_content, Html,
};

const PLACEMENTS_LABEL: &str = "placements & prizes";
const POINTS_LABEL: &str = "Points Allocation";
const PARTICIPANTS_LABEL: &str = "participating players";

/// Assemble the aggregate record for one tournament overview page.
///
/// Every section is anchored on heading text rather than generated class
/// names; a missing section leaves its field at the empty value and never
/// aborts the sibling sections.
pub(crate) fn parse_tournament_detail(
    document: &Html,
    tournament_id: &str,
    url: &str,
) -> Result<TournamentDetail> {
    let (overview, stream_url, rules) = parse_summary(document)?;
    let (start_date, end_date) = first_text(document, "div.grid-area_title > div > div:nth-child(2)")?
        .map(|raw| normalize::parse_date_range(&raw))
        .unwrap_or((None, None));

    Ok(TournamentDetail {
        tournament_id: tournament_id.to_string(),
        url: url.to_string(),
        name: first_text(document, "div.grid-area_title h2")?,
        overview,
        stream_url,
        rules,
        status: first_text(document, "div.grid-area_title > div > div:nth-child(1)")?,
        kind: parse_kind(document)?,
        start_date,
        end_date,
        region: first_text(document, "div.grid-area_title span")?
            .map(|label| Region::from_label(&label))
            .unwrap_or_default(),
        placements_prizes: parse_placements(document)?,
        points_allocation: parse_points_allocation(document)?,
        participants: Vec::new(),
    })
}

/// The participants sub-page: names in document order, nothing else.
pub(crate) fn parse_participants(document: &Html) -> Result<Vec<String>> {
    let h5_selector = Selector::parse("h5")?;
    let Some(anchor) = find_heading_ci(document, &h5_selector, PARTICIPANTS_LABEL) else {
        return Ok(Vec::new());
    };
    let Some(container) =
        content_after_rule(anchor).filter(|el| el.value().name() == "div")
    else {
        return Ok(Vec::new());
    };

    Ok(container
        .children()
        .filter_map(ElementRef::wrap)
        .map(|el| element_text(&el))
        .filter(|name| !name.is_empty())
        .collect())
}

fn first_text(document: &Html, selector: &str) -> Result<Option<String>> {
    let selector = Selector::parse(selector)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty()))
}

/// Overview paragraph, livestream link and scoring rule groups, all hanging
/// off the document's first `<h5>`: two `<p>` siblings, then an `<hr>`
/// opening the rules walk.
fn parse_summary(
    document: &Html,
) -> Result<(Option<String>, Option<String>, Vec<RuleGroup>)> {
    let h5_selector = Selector::parse("h5")?;
    let Some(anchor) = document.select(&h5_selector).next() else {
        return Ok((None, None, Vec::new()));
    };

    let first = next_element(anchor);
    let second = first.and_then(next_element);
    let rule = second.and_then(next_element);

    let overview = first
        .filter(|el| el.value().name() == "p")
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty());

    let stream_url = match second.filter(|el| el.value().name() == "p") {
        Some(el) => {
            let link = Regex::new(r"https?://\S+")?;
            link.find(&element_text(&el)).map(|m| m.as_str().to_string())
        }
        None => None,
    };

    let mut rules = Vec::new();
    if let Some(rule) = rule.filter(|el| el.value().name() == "hr") {
        let h6_selector = Selector::parse("h6")?;
        let ul_selector = Selector::parse("ul")?;
        let li_selector = Selector::parse("li")?;

        for section in rule.next_siblings().filter_map(ElementRef::wrap) {
            let Some(heading) = section.select(&h6_selector).next() else {
                continue;
            };
            // h6 -> container div -> ul -> li
            let points = next_element(heading)
                .and_then(|container| container.select(&ul_selector).next())
                .map(|list| {
                    list.select(&li_selector)
                        .map(|item| element_text(&item))
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or_default();
            rules.push(RuleGroup {
                title: element_text(&heading),
                points,
            });
        }
    }

    Ok((overview, stream_url, rules))
}

fn parse_kind(document: &Html) -> Result<Option<String>> {
    let p_selector = Selector::parse("p")?;
    let kind = Regex::new(r"(?i)regional|international|open")?;
    Ok(document
        .select(&p_selector)
        .map(|el| element_text(&el))
        .find(|text| kind.is_match(text)))
}

fn parse_placements(document: &Html) -> Result<PlacementsPrizes> {
    let h5_selector = Selector::parse("h5")?;
    let Some(anchor) = find_heading_ci(document, &h5_selector, PLACEMENTS_LABEL) else {
        return Ok(PlacementsPrizes::default());
    };
    let Some(mut el) = content_after_rule(anchor) else {
        return Ok(PlacementsPrizes::default());
    };

    let mut description = None;
    if el.value().name() == "p" {
        description = Some(element_text(&el)).filter(|t| !t.is_empty());
        let Some(container) = next_element(el) else {
            return Ok(PlacementsPrizes {
                description,
                items: Vec::new(),
            });
        };
        el = container;
    }

    let mut items = Vec::new();
    if el.value().name() == "div" {
        items = paired_heading_content(el)?
            .into_iter()
            .map(|(position, prize)| PlacementPrize { position, prize })
            .collect();
    }

    Ok(PlacementsPrizes { description, items })
}

fn parse_points_allocation(document: &Html) -> Result<PointsAllocation> {
    let h5_selector = Selector::parse("h5")?;
    let Some(anchor) = find_heading(document, &h5_selector, POINTS_LABEL) else {
        return Ok(PointsAllocation::default());
    };
    let Some(desc) = content_after_rule(anchor) else {
        return Ok(PointsAllocation::default());
    };

    let mut allocation = PointsAllocation::default();
    if desc.value().name() == "div" {
        allocation.description = Some(element_text(&desc)).filter(|t| !t.is_empty());
    }

    let h6_selector = Selector::parse("h6")?;
    let table_selector = Selector::parse("table")?;
    let row_selector = Selector::parse("tbody tr")?;
    let td_selector = Selector::parse("td")?;

    let mut day_el = next_element(desc);
    while let Some(day) = day_el {
        if day.value().name() != "div" {
            break;
        }
        if let Some(heading) = day.select(&h6_selector).next() {
            if let Some(content) =
                next_element(heading).filter(|el| el.value().name() == "div")
            {
                let mut raw_rows = Vec::new();
                for table in content.select(&table_selector) {
                    for row in table.select(&row_selector) {
                        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
                        if cells.len() < 2 {
                            continue;
                        }
                        raw_rows.push((element_text(&cells[0]), element_text(&cells[1])));
                    }
                }
                allocation.days.push(PointsDay {
                    title: element_text(&heading),
                    points: normalize::clean_points_rows(raw_rows),
                });
            }
        }
        day_el = next_element(day);
    }

    Ok(allocation)
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Local};

    use super::*;
    use crate::model::PointsRow;

    const DETAIL_FIXTURE: &str = r##"
    <html><body>
      <div class="grid-area_title">
        <h2>Demacia Cup</h2>
        <div>
          <div>Completed</div>
          <div>Jan 9 – 11</div>
        </div>
        <span>EMEA</span>
      </div>
      <p>Regional</p>
      <section>
        <h5>Overview</h5>
        <p>Three days of double elimination lobbies.</p>
        <p>Streamed live at https://twitch.tv/competetft for all days.</p>
        <hr>
        <div>
          <h6>Scoring</h6>
          <div><ul><li>Top 4 advance</li><li>Points carry across games</li></ul></div>
        </div>
        <div>
          <h6>Tiebreakers</h6>
          <div><ul><li>Head to head record</li></ul></div>
        </div>
      </section>
      <section>
        <h5>Placements &amp; Prizes</h5>
        <hr>
        <p>Prizes are paid in USD.</p>
        <div>
          <div><h6>1st</h6><p>$5,000</p></div>
          <div><h6>2nd</h6><p>$2,500</p></div>
          <div><h6>3rd</h6><p>$1,000</p></div>
        </div>
      </section>
      <section>
        <h5>Points Allocation</h5>
        <hr>
        <div>Points are awarded per game placement.</div>
        <div>
          <h6>Day 1</h6>
          <div>
            <table><tbody>
              <tr><td>Placement</td><td>Points</td></tr>
              <tr><td>8th</td><td>1</td></tr>
              <tr><td>1st</td><td>8</td></tr>
            </tbody></table>
          </div>
        </div>
        <div>
          <h6>Day 2</h6>
          <div>
            <table><tbody>
              <tr><td>1st</td><td>10</td></tr>
            </tbody></table>
          </div>
        </div>
      </section>
    </body></html>
    "##;

    fn fixture() -> Html {
        Html::parse_document(DETAIL_FIXTURE)
    }

    #[test]
    fn test_parse_detail_header_fields() {
        let document = fixture();
        let detail = parse_tournament_detail(
            &document,
            "demacia-cup",
            "https://competetft.com/en-US/tournament/demacia-cup/overview",
        )
        .unwrap();

        assert_eq!(detail.tournament_id, "demacia-cup");
        assert_eq!(detail.name.as_deref(), Some("Demacia Cup"));
        assert_eq!(detail.status.as_deref(), Some("Completed"));
        assert_eq!(detail.kind.as_deref(), Some("Regional"));
        assert_eq!(detail.region, Region::Emea);

        let year = Local::now().year();
        assert_eq!(detail.start_date.map(|d| (d.month(), d.day())), Some((1, 9)));
        assert_eq!(detail.end_date.map(|d| (d.month(), d.day())), Some((1, 11)));
        assert_eq!(detail.start_date.map(|d| d.year()), Some(year));
    }

    #[test]
    fn test_parse_detail_summary_section() {
        let document = fixture();
        let (overview, stream_url, rules) = parse_summary(&document).unwrap();

        assert_eq!(
            overview.as_deref(),
            Some("Three days of double elimination lobbies.")
        );
        assert_eq!(stream_url.as_deref(), Some("https://twitch.tv/competetft"));
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].title, "Scoring");
        assert_eq!(
            rules[0].points,
            vec!["Top 4 advance", "Points carry across games"]
        );
        assert_eq!(rules[1].title, "Tiebreakers");
    }

    #[test]
    fn test_parse_placements_pairs_in_document_order() {
        let document = fixture();
        let placements = parse_placements(&document).unwrap();

        assert_eq!(
            placements.description.as_deref(),
            Some("Prizes are paid in USD.")
        );
        let pairs: Vec<(&str, &str)> = placements
            .items
            .iter()
            .map(|item| (item.position.as_str(), item.prize.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("1st", "$5,000"), ("2nd", "$2,500"), ("3rd", "$1,000")]
        );
    }

    #[test]
    fn test_parse_points_allocation_filters_and_sorts() {
        let document = fixture();
        let allocation = parse_points_allocation(&document).unwrap();

        assert_eq!(
            allocation.description.as_deref(),
            Some("Points are awarded per game placement.")
        );
        assert_eq!(allocation.days.len(), 2);
        assert_eq!(allocation.days[0].title, "Day 1");
        assert_eq!(
            allocation.days[0].points,
            vec![
                PointsRow {
                    placement: "1st".to_string(),
                    points: 8
                },
                PointsRow {
                    placement: "8th".to_string(),
                    points: 1
                },
            ]
        );
        assert_eq!(allocation.days[1].points.len(), 1);
    }

    #[test]
    fn test_missing_sections_yield_empty_values() {
        let document = Html::parse_document("<html><body><p>nothing here</p></body></html>");
        let detail = parse_tournament_detail(&document, "empty", "https://example.test").unwrap();

        assert_eq!(detail.name, None);
        assert_eq!(detail.overview, None);
        assert_eq!(detail.stream_url, None);
        assert!(detail.rules.is_empty());
        assert_eq!(detail.status, None);
        assert_eq!(detail.start_date, None);
        assert_eq!(detail.end_date, None);
        assert_eq!(detail.region, Region::Unknown);
        assert!(detail.placements_prizes.items.is_empty());
        assert!(detail.points_allocation.days.is_empty());
    }

    #[test]
    fn test_one_absent_section_leaves_siblings_intact() {
        // Same fixture minus the Points Allocation block.
        let trimmed = DETAIL_FIXTURE.replace("Points Allocation", "Something Else");
        let document = Html::parse_document(&trimmed);
        let detail = parse_tournament_detail(
            &document,
            "demacia-cup",
            "https://competetft.com/en-US/tournament/demacia-cup/overview",
        )
        .unwrap();

        assert!(detail.points_allocation.days.is_empty());
        assert_eq!(detail.placements_prizes.items.len(), 3);
        assert!(detail.overview.is_some());
    }

    #[test]
    fn test_placements_without_description() {
        let document = Html::parse_document(
            r##"<html><body>
              <h5>Placements &amp; Prizes</h5>
              <hr>
              <div>
                <div><h6>1st</h6><p>$100</p></div>
              </div>
            </body></html>"##,
        );
        let placements = parse_placements(&document).unwrap();
        assert_eq!(placements.description, None);
        assert_eq!(placements.items.len(), 1);
    }

    #[test]
    fn test_parse_participants() {
        let document = Html::parse_document(
            r##"<html><body>
              <h5>Participating Players</h5>
              <p>64 invited players</p>
              <hr>
              <div>
                <div>setsuko</div>
                <div>Milk</div>
                <div></div>
                <div>Dishsoap</div>
              </div>
            </body></html>"##,
        );
        let participants = parse_participants(&document).unwrap();
        assert_eq!(participants, vec!["setsuko", "Milk", "Dishsoap"]);
    }

    #[test]
    fn test_parse_participants_absent_section() {
        let document = Html::parse_document("<html><body><h5>Other</h5></body></html>");
        assert!(parse_participants(&document).unwrap().is_empty());
    }
}
