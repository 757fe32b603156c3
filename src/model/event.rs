use serde::Serialize;

use crate::error::{CtftError, Result};

/// One tournament entry from the events listing page.
///
/// The natural key is `tournament_id`, the opaque identifier taken from the
/// tournament's URL path.
#[derive(Debug, Clone, Serialize)]
pub struct EventItem {
    pub tournament_id: String,
    pub url: String,
    pub name: String,
    /// Type label as shown on the card ("Regional", "International", "Open").
    #[serde(rename = "type")]
    pub kind: String,
    /// Competitive tier, taken from the listing section the card sits under.
    pub category: String,
}

impl EventItem {
    /// Schema check applied before the record enters an insert batch.
    pub fn validate(&self) -> Result<()> {
        if self.tournament_id.is_empty() {
            return Err(CtftError::Validation {
                entity: "event",
                reason: "empty tournament_id".to_string(),
            });
        }
        if self.name.is_empty() {
            return Err(CtftError::Validation {
                entity: "event",
                reason: format!("event {} has no name", self.tournament_id),
            });
        }
        if self.url.is_empty() {
            return Err(CtftError::Validation {
                entity: "event",
                reason: format!("event {} has no url", self.tournament_id),
            });
        }
        Ok(())
    }
}
