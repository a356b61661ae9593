//! Session-scoped participant and proposal collections.
//!
//! Both stores keep insertion order and hand out generated ids. They live for
//! as long as the host keeps them; nothing is persisted. The search functions
//! never see a store, only the slice it exposes.

use chrono::{DateTime, Utc};
use tracing::debug;
use uuid::Uuid;

use crate::error::{OverlapError, Result};
use crate::participant::{Importance, NewParticipant, Participant, ParticipantUpdate};
use crate::proposal::MeetingProposal;
use crate::zone::parse_time_zone;

fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

// ── Participants ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ParticipantStore {
    participants: Vec<Participant>,
}

impl ParticipantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a participant under a fresh id. Importance defaults to medium.
    ///
    /// # Errors
    ///
    /// Returns [`OverlapError::InvalidTimezone`] if the zone is unknown.
    pub fn add(&mut self, new: NewParticipant) -> Result<&Participant> {
        parse_time_zone(&new.time_zone)?;

        let participant = Participant {
            id: generate_id(),
            name: new.name,
            location: new.location,
            time_zone: new.time_zone,
            importance: Some(new.importance.unwrap_or(Importance::Medium)),
            flag: new.flag,
        };
        debug!(id = %participant.id, time_zone = %participant.time_zone, "participant added");

        self.participants.push(participant);
        let index = self.participants.len() - 1;
        Ok(&self.participants[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<Participant> {
        let index = self.position(id)?;
        debug!(id, "participant removed");
        Ok(self.participants.remove(index))
    }

    /// Apply a partial update. Existing proposals keep their old scores.
    pub fn update(&mut self, id: &str, update: ParticipantUpdate) -> Result<&Participant> {
        if let Some(tz) = &update.time_zone {
            parse_time_zone(tz)?;
        }
        let index = self.position(id)?;
        update.apply_to(&mut self.participants[index]);
        debug!(id, "participant updated");
        Ok(&self.participants[index])
    }

    pub fn clear(&mut self) {
        self.participants.clear();
    }

    pub fn get(&self, id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.participants
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| OverlapError::ParticipantNotFound(id.to_string()))
    }
}

// ── Proposals ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct ProposalStore {
    proposals: Vec<MeetingProposal>,
}

impl ProposalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Score `participants` at `date_time` and store the proposal.
    pub fn add(
        &mut self,
        date_time: DateTime<Utc>,
        duration_minutes: u32,
        participants: &[Participant],
        title: Option<String>,
    ) -> Result<&MeetingProposal> {
        let proposal =
            MeetingProposal::new(generate_id(), date_time, duration_minutes, participants, title)?;
        debug!(
            id = %proposal.id,
            date_time = %proposal.date_time,
            participants = participants.len(),
            "proposal added"
        );

        self.proposals.push(proposal);
        let index = self.proposals.len() - 1;
        Ok(&self.proposals[index])
    }

    pub fn remove(&mut self, id: &str) -> Result<MeetingProposal> {
        let index = self
            .proposals
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| OverlapError::ProposalNotFound(id.to_string()))?;
        debug!(id, "proposal removed");
        Ok(self.proposals.remove(index))
    }

    pub fn clear(&mut self) {
        self.proposals.clear();
    }

    pub fn get(&self, id: &str) -> Option<&MeetingProposal> {
        self.proposals.iter().find(|p| p.id == id)
    }

    pub fn as_slice(&self) -> &[MeetingProposal] {
        &self.proposals
    }

    pub fn len(&self) -> usize {
        self.proposals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn new_participant(name: &str, tz: &str) -> NewParticipant {
        NewParticipant {
            name: name.to_string(),
            time_zone: tz.to_string(),
            ..NewParticipant::default()
        }
    }

    #[test]
    fn test_add_assigns_unique_ids_and_default_importance() {
        let mut store = ParticipantStore::new();
        let a = store.add(new_participant("Ana", "America/New_York")).unwrap().clone();
        let b = store.add(new_participant("Kenji", "Asia/Tokyo")).unwrap().clone();

        assert_ne!(a.id, b.id);
        assert_eq!(a.importance, Some(Importance::Medium));
        assert_eq!(store.len(), 2);
        assert_eq!(store.as_slice()[0].name, "Ana");
        assert_eq!(store.as_slice()[1].name, "Kenji");
    }

    #[test]
    fn test_add_keeps_explicit_importance() {
        let mut store = ParticipantStore::new();
        let p = store
            .add(NewParticipant {
                importance: Some(Importance::High),
                ..new_participant("Ana", "America/New_York")
            })
            .unwrap();
        assert_eq!(p.importance, Some(Importance::High));
    }

    #[test]
    fn test_add_rejects_unknown_zone() {
        let mut store = ParticipantStore::new();
        let err = store.add(new_participant("X", "Atlantis/Capital")).unwrap_err();
        assert!(matches!(err, OverlapError::InvalidTimezone(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_and_get() {
        let mut store = ParticipantStore::new();
        let id = store.add(new_participant("Ana", "Europe/Paris")).unwrap().id.clone();
        assert!(store.get(&id).is_some());

        let removed = store.remove(&id).unwrap();
        assert_eq!(removed.name, "Ana");
        assert!(store.get(&id).is_none());
        assert_eq!(
            store.remove(&id).unwrap_err(),
            OverlapError::ParticipantNotFound(id)
        );
    }

    #[test]
    fn test_update_is_partial() {
        let mut store = ParticipantStore::new();
        let id = store.add(new_participant("Ana", "Europe/Paris")).unwrap().id.clone();

        let updated = store
            .update(
                &id,
                ParticipantUpdate {
                    time_zone: Some("Asia/Tokyo".to_string()),
                    ..ParticipantUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.name, "Ana");
        assert_eq!(updated.time_zone, "Asia/Tokyo");
        assert_eq!(updated.id, id);
    }

    #[test]
    fn test_update_rejects_unknown_zone_and_id() {
        let mut store = ParticipantStore::new();
        let id = store.add(new_participant("Ana", "Europe/Paris")).unwrap().id.clone();

        let bad_zone = ParticipantUpdate {
            time_zone: Some("Nope/Nope".to_string()),
            ..ParticipantUpdate::default()
        };
        assert!(store.update(&id, bad_zone).is_err());
        assert_eq!(store.get(&id).unwrap().time_zone, "Europe/Paris");

        assert!(store.update("missing", ParticipantUpdate::default()).is_err());
    }

    #[test]
    fn test_clear() {
        let mut store = ParticipantStore::new();
        store.add(new_participant("Ana", "Europe/Paris")).unwrap();
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_proposal_keeps_snapshot_after_participant_update() {
        let mut people = ParticipantStore::new();
        let id = people.add(new_participant("Kenji", "Asia/Tokyo")).unwrap().id.clone();

        let mut proposals = ProposalStore::new();
        // 14:00 EDT Monday = 03:00 Tuesday in Tokyo
        let when = Utc.with_ymd_and_hms(2024, 7, 15, 18, 0, 0).unwrap();
        let proposal_id = proposals
            .add(when, 60, people.as_slice(), Some("Sync".into()))
            .unwrap()
            .id
            .clone();

        people
            .update(
                &id,
                ParticipantUpdate {
                    time_zone: Some("America/New_York".to_string()),
                    ..ParticipantUpdate::default()
                },
            )
            .unwrap();

        let stored = proposals.get(&proposal_id).unwrap();
        assert_eq!(stored.score_for(&id).unwrap().score, 0);
        assert_eq!(stored.score_for(&id).unwrap().local_time, "03:00");
    }

    #[test]
    fn test_proposal_store_remove_and_clear() {
        let mut proposals = ProposalStore::new();
        let when = Utc.with_ymd_and_hms(2024, 7, 15, 18, 0, 0).unwrap();
        let first = proposals.add(when, 30, &[], None).unwrap().id.clone();
        proposals.add(when, 45, &[], None).unwrap();
        assert_eq!(proposals.len(), 2);

        assert_eq!(proposals.remove(&first).unwrap().duration_minutes, 30);
        assert!(matches!(
            proposals.remove(&first),
            Err(OverlapError::ProposalNotFound(_))
        ));
        assert_eq!(proposals.as_slice()[0].duration_minutes, 45);

        proposals.clear();
        assert!(proposals.is_empty());
    }
}
