//! Meeting proposals with frozen suitability scores.
//!
//! A proposal scores every participant once, when it is created. Later changes
//! to a participant (a new time zone, say) do not touch existing proposals;
//! call [`MeetingProposal::rescored`] to get a fresh copy.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::participant::Participant;
use crate::suitability::{score_suitability, SuitabilityLevel, SuitabilityScore};

/// Title used when a proposal has none.
pub const DEFAULT_TITLE: &str = "Meeting";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingProposal {
    pub id: String,
    pub date_time: DateTime<Utc>,
    pub duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Participant id → score at creation time.
    pub suitability_scores: BTreeMap<String, SuitabilityScore>,
}

impl MeetingProposal {
    /// Score `participants` at `date_time` and freeze the result.
    ///
    /// # Errors
    ///
    /// Fails with [`OverlapError::InvalidTimezone`](crate::OverlapError::InvalidTimezone)
    /// if any participant's zone is unknown; no partial proposal is built.
    pub fn new(
        id: impl Into<String>,
        date_time: DateTime<Utc>,
        duration_minutes: u32,
        participants: &[Participant],
        title: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            id: id.into(),
            date_time,
            duration_minutes,
            title,
            suitability_scores: score_all(date_time, participants)?,
        })
    }

    /// A copy of this proposal scored against `participants` as they are now.
    pub fn rescored(&self, participants: &[Participant]) -> Result<Self> {
        Ok(Self {
            suitability_scores: score_all(self.date_time, participants)?,
            ..self.clone()
        })
    }

    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.date_time + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn score_for(&self, participant_id: &str) -> Option<&SuitabilityScore> {
        self.suitability_scores.get(participant_id)
    }

    /// How many of `participants` were rated optimal.
    pub fn optimal_count(&self, participants: &[Participant]) -> usize {
        self.count_level(participants, SuitabilityLevel::Optimal)
    }

    /// How many of `participants` were rated acceptable.
    pub fn acceptable_count(&self, participants: &[Participant]) -> usize {
        self.count_level(participants, SuitabilityLevel::Acceptable)
    }

    /// Rounded mean score over `participants`. Participants added after the
    /// proposal was made have no stored score and count as 0.
    pub fn overall_score(&self, participants: &[Participant]) -> u8 {
        if participants.is_empty() {
            return 0;
        }
        let sum: u32 = participants
            .iter()
            .map(|p| self.score_for(&p.id).map_or(0, |s| u32::from(s.score)))
            .sum();
        (f64::from(sum) / participants.len() as f64).round() as u8
    }

    fn count_level(&self, participants: &[Participant], level: SuitabilityLevel) -> usize {
        participants
            .iter()
            .filter(|p| self.score_for(&p.id).is_some_and(|s| s.level == level))
            .count()
    }
}

fn score_all(
    date_time: DateTime<Utc>,
    participants: &[Participant],
) -> Result<BTreeMap<String, SuitabilityScore>> {
    participants
        .iter()
        .map(|p| Ok((p.id.clone(), score_suitability(date_time, p)?)))
        .collect()
}
