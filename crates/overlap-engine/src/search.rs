//! Optimal meeting slot search.
//!
//! Walks a horizon on a *reference clock* (the organizer's calendar), scores
//! every participant at each candidate instant, and returns the best-ranked
//! candidates. The reference clock only decides which instants are candidates;
//! scoring always happens in each participant's own zone.
//!
//! With [`SearchOptions::default`] the scan:
//!
//! 1. starts at 08:00 reference-local on the date of `range.start`,
//! 2. steps 30 minutes while the clock is `<= range.end`,
//! 3. skips Saturday and Sunday ticks,
//! 4. evaluates ticks whose reference hour is in `8..=20` (20:30 included),
//! 5. snaps to 08:00 the next day once the hour passes 20,
//! 6. keeps the 10 highest average scores, earlier candidates winning ties.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeDelta, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{OverlapError, Result};
use crate::participant::Participant;
use crate::suitability::{score_in_zone, SuitabilityLevel};
use crate::zone::{is_weekend, parse_time_zone};

/// Horizon the original planner scanned when the caller gave no end date.
pub const DEFAULT_HORIZON_DAYS: i64 = 14;

// ── Inputs ──────────────────────────────────────────────────────────────────

/// The instants a search may consider. `start` is inclusive; the scan may
/// begin before it on the same reference date and continues while the clock
/// is `<= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Build a range, rejecting `end` before `start`.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self> {
        if end < start {
            return Err(OverlapError::InvalidDateRange(format!(
                "end {} is before start {}",
                end.to_rfc3339(),
                start.to_rfc3339()
            )));
        }
        Ok(Self { start, end })
    }

    /// `start` through `start + days`.
    ///
    /// # Errors
    ///
    /// Returns [`OverlapError::InvalidDateRange`] if `days` is negative or the
    /// end falls outside the representable calendar.
    pub fn next_days(start: DateTime<Utc>, days: i64) -> Result<Self> {
        let end = TimeDelta::try_days(days)
            .and_then(|span| start.checked_add_signed(span))
            .ok_or_else(|| {
                OverlapError::InvalidDateRange(format!(
                    "{days} days after {} is out of range",
                    start.to_rfc3339()
                ))
            })?;
        Self::new(start, end)
    }
}

/// Tunables for [`find_optimal_slots_with_options`].
///
/// Every field has a default, so a JSON config only needs the fields it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    /// Minutes between candidate instants.
    pub step_minutes: u32,
    /// First reference-clock hour evaluated each day.
    pub day_start_hour: u32,
    /// Last reference-clock hour evaluated each day (inclusive).
    pub day_end_hour: u32,
    /// Skip Saturday and Sunday on the reference clock.
    pub skip_weekends: bool,
    /// Maximum number of slots returned.
    pub max_results: usize,
    /// Fraction of suitable participants that earns a "Good for" summary.
    pub good_ratio: f64,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            step_minutes: 30,
            day_start_hour: 8,
            day_end_hour: 20,
            skip_weekends: true,
            max_results: 10,
            good_ratio: 0.8,
        }
    }
}

impl SearchOptions {
    /// Parse options from JSON. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: SearchOptions =
            serde_json::from_str(json).map_err(|e| OverlapError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Reject options the scan cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes == 0 || self.step_minutes > 24 * 60 {
            return Err(OverlapError::InvalidOptions(format!(
                "step_minutes must be within 1..=1440, got {}",
                self.step_minutes
            )));
        }
        if self.day_end_hour > 23 {
            return Err(OverlapError::InvalidOptions(format!(
                "day_end_hour must be at most 23, got {}",
                self.day_end_hour
            )));
        }
        if self.day_start_hour > self.day_end_hour {
            return Err(OverlapError::InvalidOptions(format!(
                "day_start_hour {} is after day_end_hour {}",
                self.day_start_hour, self.day_end_hour
            )));
        }
        if self.max_results == 0 {
            return Err(OverlapError::InvalidOptions(
                "max_results must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.good_ratio) {
            return Err(OverlapError::InvalidOptions(format!(
                "good_ratio must be within 0..=1, got {}",
                self.good_ratio
            )));
        }
        Ok(())
    }
}

// ── Output ──────────────────────────────────────────────────────────────────

/// One ranked candidate meeting instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimalTimeSlot {
    pub date_time: DateTime<Utc>,
    /// Mean of every participant's score, 0–100.
    pub score: f64,
    /// E.g. "Good for 4/5 participants".
    pub reasoning: String,
    /// Participants rated above `poor`.
    pub suitable_participants: usize,
    pub total_participants: usize,
}

// ── Search ──────────────────────────────────────────────────────────────────

/// Find the best meeting slots using the host's local zone as the reference
/// clock.
///
/// `duration_minutes` does not influence scoring; it is accepted so callers can
/// pass the whole meeting request through.
///
/// # Errors
///
/// Returns [`OverlapError::InvalidTimezone`] if any participant's zone is not a
/// recognized IANA name. An empty participant list yields `Ok(vec![])`.
pub fn find_optimal_slots(
    participants: &[Participant],
    range: &DateRange,
    duration_minutes: u32,
) -> Result<Vec<OptimalTimeSlot>> {
    find_optimal_slots_in(participants, range, duration_minutes, &Local)
}

/// Find the best meeting slots using `reference` as the reference clock.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use chrono_tz::Tz;
/// use overlap_engine::{find_optimal_slots_in, DateRange, Participant};
///
/// let participants = vec![
///     Participant::new("1", "Ana", "America/New_York"),
///     Participant::new("2", "Kenji", "Asia/Tokyo"),
/// ];
/// // Monday 2024-07-15, scanned on a UTC reference clock
/// let range = DateRange::new(
///     Utc.with_ymd_and_hms(2024, 7, 15, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2024, 7, 15, 23, 59, 0).unwrap(),
/// )
/// .unwrap();
///
/// let slots = find_optimal_slots_in(&participants, &range, 60, &Tz::UTC).unwrap();
/// assert_eq!(slots.len(), 10);
/// // 07:00 in New York, 20:00 in Tokyo
/// assert_eq!(slots[0].date_time, Utc.with_ymd_and_hms(2024, 7, 15, 11, 0, 0).unwrap());
/// assert_eq!(slots[0].reasoning, "Perfect for all 2 participants");
/// ```
pub fn find_optimal_slots_in<T: TimeZone>(
    participants: &[Participant],
    range: &DateRange,
    duration_minutes: u32,
    reference: &T,
) -> Result<Vec<OptimalTimeSlot>> {
    find_optimal_slots_with_options(
        participants,
        range,
        duration_minutes,
        reference,
        &SearchOptions::default(),
    )
}

/// Find the best meeting slots with explicit scan options.
pub fn find_optimal_slots_with_options<T: TimeZone>(
    participants: &[Participant],
    range: &DateRange,
    duration_minutes: u32,
    reference: &T,
    options: &SearchOptions,
) -> Result<Vec<OptimalTimeSlot>> {
    options.validate()?;

    if participants.is_empty() {
        debug!("slot search skipped: no participants");
        return Ok(Vec::new());
    }

    // Parse every zone once, up front, so a bad zone fails the whole search
    // before any work is done.
    let zones = participants
        .iter()
        .map(|p| parse_time_zone(&p.time_zone))
        .collect::<Result<Vec<Tz>>>()?;

    let step = Duration::minutes(i64::from(options.step_minutes));
    let start_date = range.start.with_timezone(reference).date_naive();
    let mut clock = reference_day_start(reference, start_date, options.day_start_hour);

    let mut slots = Vec::new();
    let mut ticks = 0usize;

    while clock <= range.end {
        ticks += 1;
        let local = clock.with_timezone(reference);
        let weekend = options.skip_weekends && is_weekend(local.weekday());
        let in_window = (options.day_start_hour..=options.day_end_hour).contains(&local.hour());

        if !weekend && in_window {
            let slot = evaluate_slot(clock, &zones, options.good_ratio);
            trace!(
                date_time = %slot.date_time,
                score = slot.score,
                suitable = slot.suitable_participants,
                "evaluated candidate"
            );
            slots.push(slot);
        }

        clock += step;
        let local = clock.with_timezone(reference);
        if local.hour() > options.day_end_hour {
            let next_date = local.date_naive() + Duration::days(1);
            clock = reference_day_start(reference, next_date, options.day_start_hour);
        }
    }

    let evaluated = slots.len();
    slots.sort_by(|a, b| b.score.total_cmp(&a.score));
    slots.truncate(options.max_results);

    debug!(
        participants = participants.len(),
        duration_minutes,
        ticks,
        evaluated,
        returned = slots.len(),
        "slot search complete"
    );

    Ok(slots)
}

/// Score one candidate instant for every zone and summarize.
///
/// `zones` must be non-empty.
fn evaluate_slot(instant: DateTime<Utc>, zones: &[Tz], good_ratio: f64) -> OptimalTimeSlot {
    let total = zones.len();
    let mut sum = 0u32;
    let mut suitable = 0usize;

    for tz in zones {
        let s = score_in_zone(instant, tz);
        sum += u32::from(s.score);
        if s.level != SuitabilityLevel::Poor {
            suitable += 1;
        }
    }

    OptimalTimeSlot {
        date_time: instant,
        score: f64::from(sum) / total as f64,
        reasoning: summarize(suitable, total, good_ratio),
        suitable_participants: suitable,
        total_participants: total,
    }
}

fn summarize(suitable: usize, total: usize, good_ratio: f64) -> String {
    if suitable == total {
        format!("Perfect for all {total} participants")
    } else if suitable as f64 >= total as f64 * good_ratio {
        format!("Good for {suitable}/{total} participants")
    } else {
        format!("Only suitable for {suitable}/{total} participants")
    }
}

/// `hour`:00 on `date` in the reference zone, as a UTC instant.
///
/// Ambiguous local times take the earlier instant. A local time skipped by a
/// DST gap rolls forward an hour, as a wall clock would.
fn reference_day_start<T: TimeZone>(reference: &T, date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let naive = date.and_time(NaiveTime::MIN) + Duration::hours(i64::from(hour));
    reference
        .from_local_datetime(&naive)
        .earliest()
        .or_else(|| reference.from_local_datetime(&(naive + Duration::hours(1))).earliest())
        .unwrap_or_else(|| reference.from_utc_datetime(&naive))
        .with_timezone(&Utc)
}
