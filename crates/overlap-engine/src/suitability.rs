//! Per-participant convenience scoring.
//!
//! Rates one instant for one participant from their local hour and weekday.
//! The rules are order-sensitive and must stay that way:
//!
//! 1. A weekend subtracts 20 (floored at 0) and notes `"Weekend. "`.
//! 2. The hour tier then *sets* the score outright, discarding step 1's number.
//! 3. Very early hours subtract 40 from the tier score, force `poor`, and
//!    replace the reasoning text.
//!
//! | Local hour | Score | Level |
//! |------------|-------|-------|
//! | 09:00–17:59 | 100 | optimal |
//! | 07:00–08:59, 18:00–20:59 | 70 | acceptable |
//! | 06:00–06:59, 21:00–23:59 | 30 | poor |
//! | 00:00–05:59 | 0 | poor |

use std::fmt;

use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::participant::Participant;
use crate::zone::{is_weekend, parse_time_zone, TIME_FORMAT};

const WEEKEND_PENALTY: u8 = 20;
const EXTREME_HOUR_PENALTY: u8 = 40;

const OPTIMAL_SCORE: u8 = 100;
const ACCEPTABLE_SCORE: u8 = 70;
const POOR_SCORE: u8 = 30;

/// Extreme-hour override applies below this hour...
const EXTREME_EARLY_BEFORE: u32 = 6;
/// ...or above this one. Local hours never exceed 23, so this arm never fires.
const EXTREME_LATE_AFTER: u32 = 23;

/// Coarse convenience classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuitabilityLevel {
    Poor,
    Acceptable,
    Optimal,
}

impl SuitabilityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuitabilityLevel::Poor => "poor",
            SuitabilityLevel::Acceptable => "acceptable",
            SuitabilityLevel::Optimal => "optimal",
        }
    }
}

impl fmt::Display for SuitabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The convenience of one instant for one participant.
///
/// `local_time` and `reasoning` are display text derived from the instant and
/// zone; equality only compares `score` and `level`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuitabilityScore {
    /// 0–100.
    pub score: u8,
    pub level: SuitabilityLevel,
    /// Participant's wall clock as `HH:mm`.
    pub local_time: String,
    /// Advisory explanation.
    pub reasoning: String,
}

impl PartialEq for SuitabilityScore {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.level == other.level
    }
}

impl Eq for SuitabilityScore {}

/// Score `instant` for `participant` in the participant's own time zone.
///
/// # Errors
///
/// Returns [`OverlapError::InvalidTimezone`](crate::OverlapError::InvalidTimezone)
/// if the participant's zone is not a recognized IANA name.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use overlap_engine::{score_suitability, Participant, SuitabilityLevel};
///
/// // Monday 2024-07-15, 14:00 in New York (EDT)
/// let instant = Utc.with_ymd_and_hms(2024, 7, 15, 18, 0, 0).unwrap();
///
/// let ny = Participant::new("1", "Ana", "America/New_York");
/// let score = score_suitability(instant, &ny).unwrap();
/// assert_eq!(score.score, 100);
/// assert_eq!(score.level, SuitabilityLevel::Optimal);
///
/// let tokyo = Participant::new("2", "Kenji", "Asia/Tokyo");
/// let score = score_suitability(instant, &tokyo).unwrap();
/// assert_eq!(score.local_time, "03:00");
/// assert_eq!(score.score, 0);
/// ```
pub fn score_suitability(instant: DateTime<Utc>, participant: &Participant) -> Result<SuitabilityScore> {
    let tz = parse_time_zone(&participant.time_zone)?;
    Ok(score_in_zone(instant, &tz))
}

/// Score `instant` in an already-parsed zone.
pub fn score_in_zone(instant: DateTime<Utc>, tz: &Tz) -> SuitabilityScore {
    let local = instant.with_timezone(tz);
    let hour = local.hour();

    let mut score: u8 = 0;
    let mut level = SuitabilityLevel::Poor;
    let mut reasoning = String::new();

    if is_weekend(local.weekday()) {
        score = score.saturating_sub(WEEKEND_PENALTY);
        reasoning.push_str("Weekend. ");
    }

    if (9..18).contains(&hour) {
        score = OPTIMAL_SCORE;
        level = SuitabilityLevel::Optimal;
        reasoning.push_str("Perfect business hours.");
    } else if (7..9).contains(&hour) || (18..21).contains(&hour) {
        score = ACCEPTABLE_SCORE;
        level = SuitabilityLevel::Acceptable;
        reasoning.push_str("Acceptable extended hours.");
    } else if !(7..21).contains(&hour) {
        score = POOR_SCORE;
        level = SuitabilityLevel::Poor;
        reasoning.push_str("Outside normal working hours.");
    }

    if hour < EXTREME_EARLY_BEFORE || hour > EXTREME_LATE_AFTER {
        score = score.saturating_sub(EXTREME_HOUR_PENALTY);
        level = SuitabilityLevel::Poor;
        reasoning = "Very inconvenient time.".to_string();
    }

    SuitabilityScore {
        score,
        level,
        local_time: local.format(TIME_FORMAT).to_string(),
        reasoning: reasoning.trim().to_string(),
    }
}
