use scraper::{ElementRef, Selector};

use crate::error::Result;
use crate::model::{ProPointsPage, ProPointsStanding, SeedingSection};
use crate::normalize;
use crate::scraper::{
    absolute_url, element_text, find_heading, next_element, parse_seeding_section,
    tournament_id_from_href, Html,
};

const ABOUT_LABEL: &str = "About";
const SEEDING_LABEL: &str = "Seeding";

/// Parse the pro points page: the standings table plus the About and
/// Seeding sections.
///
/// Standings rows are persisted append-only downstream, so extraction keeps
/// every row it can type.
pub(crate) fn parse_pro_points(document: &Html, base_url: &str) -> Result<ProPointsPage> {
    let h5_selector = Selector::parse("h5")?;

    let about = find_heading(document, &h5_selector, ABOUT_LABEL)
        .and_then(next_element)
        .filter(|el| el.value().name() == "p")
        .map(|el| element_text(&el))
        .filter(|t| !t.is_empty());

    let (description, rules) = parse_seeding_section(document, SEEDING_LABEL)?;

    Ok(ProPointsPage {
        about,
        seeding: SeedingSection { description, rules },
        players: parse_standings(document, base_url)?,
    })
}

fn parse_standings(document: &Html, base_url: &str) -> Result<Vec<ProPointsStanding>> {
    let row_selector = Selector::parse("table tbody tr")?;
    let td_selector = Selector::parse("td")?;
    let link_selector = Selector::parse(r#"a[href*="/tournament/"]"#)?;

    let mut players = Vec::new();
    for row in document.select(&row_selector) {
        let cells: Vec<ElementRef> = row.select(&td_selector).collect();
        if cells.len() < 6 {
            continue;
        }

        // Header rows have no numeric rank and drop out here.
        let Ok(rank) = element_text(&cells[0]).parse::<u32>() else {
            continue;
        };

        let (nickname, main_char) = normalize::split_nickname(&element_text(&cells[1]));

        let (tournament_id, url) = row
            .select(&link_selector)
            .next()
            .and_then(|a| {
                let href = a.value().attr("href")?;
                Some((tournament_id_from_href(href)?, absolute_url(base_url, href)))
            })
            .unwrap_or_default();

        players.push(ProPointsStanding {
            rank,
            nickname,
            main_char,
            total_points: cell_int(&cells[2]),
            demacia_cup_total: cell_int(&cells[3]),
            bilgewater_cup_total: cell_int(&cells[4]),
            shurima_cup_total: cell_int(&cells[5]),
            tournament_id,
            url,
        });
    }
    Ok(players)
}

fn cell_int(cell: &ElementRef) -> i64 {
    element_text(cell).parse().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRO_POINTS_FIXTURE: &str = r##"
    <html><body>
      <h5>About</h5>
      <p>Pro points decide seeding for the regional finals.</p>
      <h5>Seeding</h5>
      <hr>
      <p>Top cumulative totals qualify directly.</p>
      <div>
        <div><h6>Top 8</h6><p>Direct invite to the finals</p></div>
        <div><h6>Top 16</h6><p>Seeded into the last chance qualifier</p></div>
      </div>
      <table>
        <thead>
          <tr><th>Rank</th><th>Player</th><th>Total</th><th>Demacia</th><th>Bilgewater</th><th>Shurima</th></tr>
        </thead>
        <tbody>
          <tr>
            <td>Rank</td><td>Player</td><td>Total</td><td>Demacia</td><td>Bilgewater</td><td>Shurima</td>
          </tr>
          <tr>
            <td>1</td><td>setsuko Ahri#KR1</td><td>420</td><td>200</td><td>120</td><td>100</td>
            <td><a href="/en-US/tournament/demacia-cup/overview">from</a></td>
          </tr>
          <tr>
            <td>2</td><td>Milk</td><td>380</td><td>180</td><td>110</td><td>90</td>
          </tr>
        </tbody>
      </table>
    </body></html>
    "##;

    #[test]
    fn test_parse_pro_points_sections() {
        let document = Html::parse_document(PRO_POINTS_FIXTURE);
        let page = parse_pro_points(&document, "https://competetft.com").unwrap();

        assert_eq!(
            page.about.as_deref(),
            Some("Pro points decide seeding for the regional finals.")
        );
        assert_eq!(
            page.seeding.description.as_deref(),
            Some("Top cumulative totals qualify directly.")
        );
        assert_eq!(page.seeding.rules.len(), 2);
        assert_eq!(page.seeding.rules[0].title, "Top 8");
        assert_eq!(
            page.seeding.rules[1].description,
            "Seeded into the last chance qualifier"
        );
    }

    #[test]
    fn test_parse_standings_rows() {
        let document = Html::parse_document(PRO_POINTS_FIXTURE);
        let page = parse_pro_points(&document, "https://competetft.com").unwrap();

        assert_eq!(page.players.len(), 2);

        let first = &page.players[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.nickname, "setsuko");
        assert_eq!(first.main_char, "Ahri#KR1");
        assert_eq!(first.total_points, 420);
        assert_eq!(first.demacia_cup_total, 200);
        assert_eq!(first.bilgewater_cup_total, 120);
        assert_eq!(first.shurima_cup_total, 100);
        assert_eq!(first.tournament_id, "demacia-cup");
        assert_eq!(
            first.url,
            "https://competetft.com/en-US/tournament/demacia-cup/overview"
        );

        let second = &page.players[1];
        assert_eq!(second.nickname, "Milk");
        assert_eq!(second.main_char, "");
        assert_eq!(second.tournament_id, "");
    }

    #[test]
    fn test_header_rows_dropped_by_rank_parse() {
        let document = Html::parse_document(PRO_POINTS_FIXTURE);
        let page = parse_pro_points(&document, "https://competetft.com").unwrap();
        assert!(page.players.iter().all(|p| p.rank > 0));
    }

    #[test]
    fn test_parse_pro_points_empty_page() {
        let document = Html::parse_document("<html><body></body></html>");
        let page = parse_pro_points(&document, "https://competetft.com").unwrap();
        assert_eq!(page.about, None);
        assert_eq!(page.seeding.description, None);
        assert!(page.seeding.rules.is_empty());
        assert!(page.players.is_empty());
    }
}
