//! Participant records.
//!
//! The engine only reads participants. Creation, identity and mutation belong
//! to [`ParticipantStore`](crate::store::ParticipantStore) or to the caller.

use serde::{Deserialize, Serialize};

/// How much a participant's convenience matters. Carried through for callers;
/// scoring currently ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    #[default]
    Medium,
    High,
}

impl Importance {
    /// The next level in the low → medium → high → low cycle.
    pub fn next(self) -> Self {
        match self {
            Importance::Low => Importance::Medium,
            Importance::Medium => Importance::High,
            Importance::High => Importance::Low,
        }
    }
}

/// A meeting participant located in one IANA time zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// Opaque unique identifier.
    pub id: String,
    pub name: String,
    /// Free-text location, usually a city.
    #[serde(default)]
    pub location: String,
    /// IANA timezone name, e.g. `"Asia/Tokyo"`.
    pub time_zone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    /// Display emoji for the participant's country.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flag: Option<String>,
}

impl Participant {
    /// Build a participant with only the fields scoring needs.
    pub fn new(id: impl Into<String>, name: impl Into<String>, time_zone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location: String::new(),
            time_zone: time_zone.into(),
            importance: None,
            flag: None,
        }
    }
}

/// Input for [`ParticipantStore::add`](crate::store::ParticipantStore::add):
/// everything but the generated id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewParticipant {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub time_zone: String,
    #[serde(default)]
    pub importance: Option<Importance>,
    #[serde(default)]
    pub flag: Option<String>,
}

/// Partial update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub time_zone: Option<String>,
    pub importance: Option<Importance>,
    pub flag: Option<String>,
}

impl ParticipantUpdate {
    pub(crate) fn apply_to(self, participant: &mut Participant) {
        if let Some(name) = self.name {
            participant.name = name;
        }
        if let Some(location) = self.location {
            participant.location = location;
        }
        if let Some(time_zone) = self.time_zone {
            participant.time_zone = time_zone;
        }
        if let Some(importance) = self.importance {
            participant.importance = Some(importance);
        }
        if let Some(flag) = self.flag {
            participant.flag = Some(flag);
        }
    }
}
