use serde::Serialize;

use crate::model::SeedingRule;

/// Everything scraped from the ladder standings page.
///
/// Not wired to persistence yet; written as a JSON artifact only.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LadderPage {
    pub url: String,
    /// Page-level freshness stamps, kept as opaque strings.
    pub updated: Option<String>,
    pub next_update: Option<String>,
    pub standings: Vec<LadderStanding>,
    pub seeding: Vec<SeedingRule>,
}

/// One ladder row: rank, player, and the per-week point columns exactly as
/// the page shows them.
#[derive(Debug, Clone, Serialize)]
pub struct LadderStanding {
    pub rank: u32,
    pub player: String,
    /// Column header paired with the raw cell text, in column order. The
    /// values are not normalized to integers.
    pub weekly_points: Vec<WeekPoints>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekPoints {
    pub week: String,
    pub points: String,
}
