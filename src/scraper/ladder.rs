use itertools::Itertools;
use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::model::{LadderPage, LadderStanding, WeekPoints};
use crate::scraper::{element_text, find_heading, next_element, parse_seeding_section, Html};

const UPDATED_LABEL: &str = "Updated";
const NEXT_UPDATE_LABEL: &str = "Next update";
const SEEDING_LABEL: &str = "Seeding";

/// Parse the ladder standings page.
///
/// The week columns are whatever the table header says they are; cell
/// values stay raw strings. Freshness stamps are opaque text next to their
/// labels.
pub(crate) fn parse_ladder(document: &Html, url: &str) -> Result<LadderPage> {
    let (_, seeding) = parse_seeding_section(document, SEEDING_LABEL)?;

    Ok(LadderPage {
        url: url.to_string(),
        updated: labeled_value(document, UPDATED_LABEL)?,
        next_update: labeled_value(document, NEXT_UPDATE_LABEL)?,
        standings: parse_standings(document)?,
        seeding,
    })
}

/// Text of the element following the span that carries `label`.
fn labeled_value(document: &Html, label: &str) -> Result<Option<String>> {
    let span_selector = Selector::parse("span")?;
    Ok(find_heading(document, &span_selector, label)
        .and_then(next_element)
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty()))
}

fn parse_standings(document: &Html) -> Result<Vec<LadderStanding>> {
    let header_selector = Selector::parse("table thead th")?;
    let row_selector = Selector::parse("table tbody tr")?;
    let td_selector = Selector::parse("td")?;

    // Columns after rank and player are week columns, named by the header.
    let week_labels: Vec<String> = document
        .select(&header_selector)
        .skip(2)
        .map(|th| element_text(&th))
        .collect();

    let mut standings = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
        if cells.len() < 2 {
            continue;
        }
        let Ok(rank) = element_text(&cells[0]).parse::<u32>() else {
            continue;
        };

        let weekly_points = week_labels
            .iter()
            .zip(cells.iter().skip(2))
            .map(|(week, cell)| WeekPoints {
                week: week.clone(),
                points: element_text(cell),
            })
            .collect_vec();

        standings.push(LadderStanding {
            rank,
            player: element_text(&cells[1]),
            weekly_points,
        });
    }
    Ok(standings)
}
