use serde::Serialize;

use crate::error::{CtftError, Result};
use crate::model::SeedingRule;

/// Everything scraped from the pro points page in one aggregate.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProPointsPage {
    pub about: Option<String>,
    pub seeding: SeedingSection,
    pub players: Vec<ProPointsStanding>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SeedingSection {
    pub description: Option<String>,
    pub rules: Vec<SeedingRule>,
}

/// One row of the pro points standings.
///
/// `(rank, tournament_id)` is not unique in the source and these rows are
/// persisted without a duplicate check: totals are season-cumulative, so
/// each scrape appends a fresh copy.
#[derive(Debug, Clone, Serialize)]
pub struct ProPointsStanding {
    pub rank: u32,
    pub nickname: String,
    /// Split heuristically from the combined nickname cell; best-effort.
    pub main_char: String,
    pub total_points: i64,
    pub demacia_cup_total: i64,
    pub bilgewater_cup_total: i64,
    pub shurima_cup_total: i64,
    pub tournament_id: String,
    pub url: String,
}

impl ProPointsStanding {
    pub fn validate(&self) -> Result<()> {
        if self.nickname.is_empty() {
            return Err(CtftError::Validation {
                entity: "pro_points_standing",
                reason: format!("rank {} has no nickname", self.rank),
            });
        }
        if self.rank == 0 {
            return Err(CtftError::Validation {
                entity: "pro_points_standing",
                reason: format!("{} has no rank", self.nickname),
            });
        }
        Ok(())
    }
}
