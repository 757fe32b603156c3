use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::Region;

/// Aggregate record for one tournament detail page, later merged with the
/// separately fetched participants list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TournamentDetail {
    pub tournament_id: String,
    pub url: String,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub stream_url: Option<String>,
    pub rules: Vec<RuleGroup>,
    pub status: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub region: Region,
    pub placements_prizes: PlacementsPrizes,
    pub points_allocation: PointsAllocation,
    /// Display names in scrape order; the participants page carries no ids.
    #[serde(default)]
    pub participants: Vec<String>,
}

/// One titled group of scoring rules (title plus bullet points).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleGroup {
    pub title: String,
    pub points: Vec<String>,
}

/// The "Placements & Prizes" section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacementsPrizes {
    pub description: Option<String>,
    pub items: Vec<PlacementPrize>,
}

/// A position label paired with its prize text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementPrize {
    pub position: String,
    pub prize: String,
}

/// The "Points Allocation" section: one table of placement points per day.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PointsAllocation {
    pub description: Option<String>,
    pub days: Vec<PointsDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointsDay {
    pub title: String,
    /// Sorted ascending by the leading integer of the placement label.
    pub points: Vec<PointsRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsRow {
    pub placement: String,
    pub points: i64,
}
