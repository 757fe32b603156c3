use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{CtftError, Result};
use crate::model::Region;

/// One calendar day on the schedule page, owning the tournaments that start
/// on it in discovery order.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub tournaments: Vec<TournamentSlot>,
}

/// One tournament slot inside a schedule day.
///
/// `tournament_id` is unique within the owning day; duplicates are dropped
/// at persistence time, not here.
#[derive(Debug, Clone, Serialize)]
pub struct TournamentSlot {
    pub tournament_id: String,
    pub url: String,
    /// 12-hour clock text when a machine-readable timestamp was available,
    /// otherwise the page's human-authored text verbatim.
    pub time: String,
    pub name: String,
    pub region: Region,
}

impl TournamentSlot {
    pub fn validate(&self) -> Result<()> {
        if self.tournament_id.is_empty() {
            return Err(CtftError::Validation {
                entity: "tournament_slot",
                reason: format!("slot {:?} has no tournament_id", self.name),
            });
        }
        Ok(())
    }
}
