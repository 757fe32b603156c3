use chrono::{Datelike, Local, NaiveDate};
use scraper::{ElementRef, Selector};
use tracing::warn;

use crate::error::Result;
use crate::model::{Region, ScheduleDay, TournamentSlot};
use crate::normalize;
use crate::scraper::{
    absolute_url, element_text, section_elements, select_text, tournament_id_from_href, Html,
};

/// Parse the schedule page into one [`ScheduleDay`] per `<h5>` day heading.
///
/// Slot order within a day is discovery order; duplicate tournament ids are
/// kept here and dropped at persistence time.
pub(crate) fn parse_schedule(document: &Html, base_url: &str) -> Result<Vec<ScheduleDay>> {
    let heading_selector = Selector::parse("h5")?;
    let time_selector = Selector::parse("time")?;
    let name_selector = Selector::parse("h6")?;
    let marker_selector = Selector::parse("svg [fill]")?;

    let mut days = Vec::new();
    for heading in document.select(&heading_selector) {
        let Some(date) = day_date(&heading, &time_selector) else {
            warn!(heading = %element_text(&heading), "schedule day heading without a date");
            continue;
        };

        let tournaments = section_elements(heading)
            .into_iter()
            .filter(|el| el.value().name() == "a")
            .filter_map(|card| {
                parse_slot(card, base_url, &time_selector, &name_selector, &marker_selector)
            })
            .collect();

        days.push(ScheduleDay { date, tournaments });
    }
    Ok(days)
}

/// The day key: a machine-readable `datetime` attribute when present,
/// otherwise the heading text through the month table with the current year.
fn day_date(heading: &ElementRef, time_selector: &Selector) -> Option<NaiveDate> {
    let machine = heading
        .select(time_selector)
        .next()
        .and_then(|el| el.value().attr("datetime"))
        .and_then(|attr| NaiveDate::parse_from_str(attr.get(..10)?, "%Y-%m-%d").ok());
    if machine.is_some() {
        return machine;
    }

    normalize::parse_heading_date(&element_text(heading), Local::now().year())
}

fn parse_slot(
    card: ElementRef,
    base_url: &str,
    time_selector: &Selector,
    name_selector: &Selector,
    marker_selector: &Selector,
) -> Option<TournamentSlot> {
    let href = card.value().attr("href")?;
    let tournament_id = tournament_id_from_href(href)?;

    // Prefer the machine-readable timestamp; fall back to the page text.
    let time = card
        .select(time_selector)
        .next()
        .map(|el| {
            el.value()
                .attr("datetime")
                .and_then(normalize::clock_time)
                .unwrap_or_else(|| element_text(&el))
        })
        .unwrap_or_default();

    let region = card
        .select(marker_selector)
        .next()
        .and_then(|el| el.value().attr("fill"))
        .map(Region::from_fill)
        .unwrap_or_default();

    Some(TournamentSlot {
        tournament_id,
        url: absolute_url(base_url, href),
        time,
        name: select_text(&card, name_selector),
        region,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEDULE_FIXTURE: &str = r##"
    <html><body>
      <h5><time datetime="2026-01-09">Jan 9</time></h5>
      <a href="/en-US/tournament/demacia-cup/overview">
        <h6>Demacia Cup</h6>
        <time datetime="2026-01-09T18:30:00Z">evening</time>
        <svg viewBox="0 0 8 8"><circle fill="#FF6807" r="4"/></svg>
      </a>
      <a href="/en-US/tournament/shurima-open/overview">
        <h6>Shurima Open</h6>
        <time>8:00 PM onwards</time>
        <svg viewBox="0 0 8 8"><circle fill="#5B23B5" r="4"/></svg>
      </a>
      <hr>
      <h5><time datetime="2026-01-10">Jan 10</time></h5>
      <a href="/en-US/tournament/demacia-cup/overview">
        <h6>Demacia Cup</h6>
        <time datetime="2026-01-10T18:30:00Z">evening</time>
        <svg viewBox="0 0 8 8"><circle fill="#00FF00" r="4"/></svg>
      </a>
    </body></html>
    "##;

    #[test]
    fn test_parse_schedule_days_and_slots() {
        let document = Html::parse_document(SCHEDULE_FIXTURE);
        let days = parse_schedule(&document, "https://competetft.com").unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2026, 1, 9).unwrap());
        assert_eq!(days[0].tournaments.len(), 2);

        let first = &days[0].tournaments[0];
        assert_eq!(first.tournament_id, "demacia-cup");
        assert_eq!(first.name, "Demacia Cup");
        assert_eq!(first.region, Region::Emea);
        // Machine-readable timestamp becomes local 12-hour clock text.
        assert!(first.time.contains(':'));
        assert!(first.time.ends_with("AM") || first.time.ends_with("PM"));

        let second = &days[0].tournaments[1];
        assert_eq!(second.region, Region::Apac);
        assert_eq!(second.time, "8:00 PM onwards");
    }

    #[test]
    fn test_parse_schedule_unknown_fill() {
        let document = Html::parse_document(SCHEDULE_FIXTURE);
        let days = parse_schedule(&document, "https://competetft.com").unwrap();
        assert_eq!(days[1].tournaments[0].region, Region::Unknown);
    }

    #[test]
    fn test_day_heading_text_fallback() {
        let document = Html::parse_document(
            r##"<html><body>
              <h5>Jan 9</h5>
              <a href="/en-US/tournament/demacia-cup/overview"><h6>Demacia Cup</h6></a>
            </body></html>"##,
        );
        let days = parse_schedule(&document, "https://competetft.com").unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].date.month(), 1);
        assert_eq!(days[0].date.day(), 9);
        assert_eq!(days[0].date.year(), Local::now().year());
    }

    #[test]
    fn test_heading_without_date_is_skipped() {
        let document = Html::parse_document(
            r##"<html><body>
              <h5>Coming soon</h5>
              <a href="/en-US/tournament/demacia-cup/overview"><h6>Demacia Cup</h6></a>
            </body></html>"##,
        );
        let days = parse_schedule(&document, "https://competetft.com").unwrap();
        assert!(days.is_empty());
    }
}
