use serde::{Deserialize, Serialize};
use strum_macros::EnumString;
use tracing::warn;

/// Competitive region, inferred either from a textual badge or from the
/// fill colour of the graphical marker next to a tournament slot.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    EnumString,
    strum_macros::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Apac,
    Amer,
    Emea,
    #[default]
    Unknown,
}

const FILL_APAC: &str = "#5B23B5";
const FILL_AMER: &str = "#3F34FF";
const FILL_EMEA: &str = "#FF6807";

impl Region {
    /// Map a marker's fill colour to a region. Any unrecognised colour is
    /// `Unknown`.
    pub fn from_fill(fill: &str) -> Self {
        let fill = fill.trim();
        if fill.eq_ignore_ascii_case(FILL_APAC) {
            Self::Apac
        } else if fill.eq_ignore_ascii_case(FILL_AMER) {
            Self::Amer
        } else if fill.eq_ignore_ascii_case(FILL_EMEA) {
            Self::Emea
        } else {
            Self::Unknown
        }
    }

    /// Parse a textual region badge ("APAC", "EMEA", ...).
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        label.to_uppercase().parse().unwrap_or_else(|_| {
            if !label.is_empty() {
                warn!(label, "unknown region label");
            }
            Self::Unknown
        })
    }
}

/// One titled seeding rule from the pro points or ladder page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedingRule {
    pub title: String,
    pub description: String,
}
